//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, authentication types and the error
//! vocabulary shared by the FSM and lesson contexts.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedActor};
pub use errors::{DomainError, ErrorCode, ErrorKind, ValidationError};
pub use ids::{
    CategoryId, LessonId, ScheduleSlotId, StateId, StateMachineId, StateMachineItemId,
    TeacherId, TransitionId, UserId,
};
pub use timestamp::Timestamp;
