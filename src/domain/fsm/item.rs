//! Transition edges and live machine instances.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateId, StateMachineId, StateMachineItemId, TransitionId};

/// A declared legal move within one machine.
///
/// `(state_machine_id, current_state_id, next_state_id)` is unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub id: TransitionId,
    pub state_machine_id: StateMachineId,
    pub current_state_id: StateId,
    pub next_state_id: StateId,
}

/// One live instance of a machine, bound to exactly one domain entity.
///
/// Created at the owning entity's creation, seeded with the machine's start
/// state, and rewritten once per successful transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMachineItem {
    pub id: StateMachineItemId,
    pub state_machine_id: StateMachineId,
    pub state_id: StateId,
}
