//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod lesson;

pub use lesson::{
    BookLessonCommand, BookLessonHandler, BookLessonResult, GetLessonHandler, GetLessonQuery,
    JoinLessonCommand, JoinLessonHandler, JoinLessonResult, LessonView, TransitionLessonCommand,
    TransitionLessonHandler, TransitionLessonResult,
};
