//! State machine orchestration.

mod engine;

pub use engine::{FsmEngine, MAX_SWAP_ATTEMPTS};
