//! Application layer - Engine, Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The generic state machine engine lives in `fsm`; lesson-specific
//! commands and queries live in `handlers`.

pub mod fsm;
pub mod handlers;

pub use fsm::FsmEngine;
pub use handlers::{
    BookLessonCommand, BookLessonHandler, BookLessonResult, GetLessonHandler, GetLessonQuery,
    JoinLessonCommand, JoinLessonHandler, JoinLessonResult, LessonView, TransitionLessonCommand,
    TransitionLessonHandler, TransitionLessonResult,
};
