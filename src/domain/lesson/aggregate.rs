//! Lesson entity.
//!
//! A lesson's progress lives entirely in its state machine item; the lesson
//! row only holds the foreign key. There is no separate status column.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CategoryId, LessonId, ScheduleSlotId, StateMachineItemId, TeacherId, Timestamp, UserId,
};

/// A booked lesson between one student and one teacher.
///
/// # Invariants
///
/// - `student_id` is never the user behind `teacher_id`
/// - `state_item_id` references an item of the `lesson` machine and lives
///   exactly as long as the lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub student_id: UserId,
    pub teacher_id: TeacherId,
    pub category_id: CategoryId,
    pub schedule_slot_id: ScheduleSlotId,
    pub state_item_id: StateMachineItemId,
    pub created_at: Timestamp,
}

/// Lesson data before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLesson {
    pub student_id: UserId,
    pub teacher_id: TeacherId,
    pub category_id: CategoryId,
    pub schedule_slot_id: ScheduleSlotId,
    pub state_item_id: StateMachineItemId,
    pub created_at: Timestamp,
}

impl NewLesson {
    /// Attaches the store-assigned id.
    pub fn into_lesson(self, id: LessonId) -> Lesson {
        Lesson {
            id,
            student_id: self.student_id,
            teacher_id: self.teacher_id,
            category_id: self.category_id,
            schedule_slot_id: self.schedule_slot_id,
            state_item_id: self.state_item_id,
            created_at: self.created_at,
        }
    }
}

impl Lesson {
    /// Returns true if the user booked this lesson.
    pub fn is_student(&self, user_id: UserId) -> bool {
        self.student_id == user_id
    }

    /// Returns true if the teacher profile teaches this lesson.
    pub fn is_teacher(&self, teacher_id: TeacherId) -> bool {
        self.teacher_id == teacher_id
    }
}
