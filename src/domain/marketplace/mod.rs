//! Marketplace reference records consumed by the lesson lifecycle.
//!
//! These entities are owned by ordinary CRUD flows (signup, profile editing,
//! category management). The lifecycle only reads them, except for schedule
//! slot availability which booking flips.

mod directory;
mod schedule;

pub use directory::{Category, Teacher, TeacherSkill, User};
pub use schedule::ScheduleSlot;
