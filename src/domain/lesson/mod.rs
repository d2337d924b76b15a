//! Lesson lifecycle domain.
//!
//! - `aggregate` - the lesson record and its link to a state machine item
//! - `action` - lifecycle actions with their guard, target and state policy
//! - `guard` - role guards evaluated against the requesting actor
//! - `errors` - typed failures for every lifecycle operation

mod action;
mod aggregate;
mod errors;
mod guard;

pub use action::{LessonAction, StatePolicy};
pub use aggregate::{Lesson, NewLesson};
pub use errors::LessonError;
pub use guard::{ActorContext, Guard};
