//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth)
//! - `fsm` - Generic state machine data model (states, machines, edges, items)
//! - `lesson` - Lesson records, lifecycle actions and role guards
//! - `marketplace` - Users, teachers, categories, skills and schedule slots

pub mod foundation;
pub mod fsm;
pub mod lesson;
pub mod marketplace;
