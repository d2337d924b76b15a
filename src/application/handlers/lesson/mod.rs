//! Lesson lifecycle handlers.
//!
//! Each handler layers role guards and side effects on top of the generic
//! [`FsmEngine`](crate::application::fsm::FsmEngine). The actor id is always
//! an explicit command field.

mod access;
mod book_lesson;
mod get_lesson;
mod join_lesson;
mod transition_lesson;

#[cfg(test)]
pub(crate) mod test_support;

pub use book_lesson::{BookLessonCommand, BookLessonHandler, BookLessonResult};
pub use get_lesson::{GetLessonHandler, GetLessonQuery, LessonView};
pub use join_lesson::{JoinLessonCommand, JoinLessonHandler, JoinLessonResult};
pub use transition_lesson::{
    TransitionLessonCommand, TransitionLessonHandler, TransitionLessonResult,
};
