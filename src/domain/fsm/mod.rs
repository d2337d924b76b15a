//! Generic finite-state-machine data model.
//!
//! Separates *what* transitions exist (declarative rows) from *who* may
//! invoke them (guards in the application layer) and *what happens* as a
//! side effect. The same model drives any entity kind by pointing it at a
//! different machine name.

mod errors;
mod item;
mod machine;
mod state;

pub use errors::FsmError;
pub use item::{StateMachineItem, Transition};
pub use machine::{default_catalog, MachineDefinition, MachineName, StateMachine};
pub use state::{State, StateName};
