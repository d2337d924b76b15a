//! State machine engine errors.
//!
//! | Error | Kind |
//! |-------|------|
//! | UnknownMachine | NotFound |
//! | ItemNotFound | NotFound |
//! | UnknownState | NotFound |
//! | IllegalTransition | IllegalTransition |
//! | Store | Infrastructure (or the store error's own kind) |

use thiserror::Error;

use super::{MachineName, StateName};
use crate::domain::foundation::{DomainError, ErrorCode, ErrorKind, StateMachineItemId};

/// Errors raised by the FSM engine.
#[derive(Debug, Clone, Error)]
pub enum FsmError {
    /// No machine with this name has been provisioned.
    #[error("State machine '{0}' is not provisioned")]
    UnknownMachine(MachineName),

    /// The instance does not exist.
    #[error("State machine item {0} not found")]
    ItemNotFound(StateMachineItemId),

    /// The state name is not part of the item's machine.
    #[error("State '{state}' is not valid for machine '{machine}'")]
    UnknownState { machine: MachineName, state: StateName },

    /// No edge leads from the current state to the requested one.
    #[error("Cannot transition from '{current}' to '{attempted}'")]
    IllegalTransition {
        current: StateName,
        attempted: StateName,
    },

    /// The backing store failed.
    #[error("State machine store error: {0}")]
    Store(#[from] DomainError),
}

impl FsmError {
    pub fn unknown_state(machine: MachineName, state: StateName) -> Self {
        FsmError::UnknownState { machine, state }
    }

    pub fn illegal_transition(current: StateName, attempted: StateName) -> Self {
        FsmError::IllegalTransition { current, attempted }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            FsmError::UnknownMachine(_) => ErrorCode::StateMachineNotFound,
            FsmError::ItemNotFound(_) => ErrorCode::StateMachineItemNotFound,
            FsmError::UnknownState { .. } => ErrorCode::StateNotFound,
            FsmError::IllegalTransition { .. } => ErrorCode::InvalidStateTransition,
            FsmError::Store(err) => err.code,
        }
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }
}
