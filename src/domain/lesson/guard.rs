//! Role guards for lesson operations.
//!
//! Guards are a closed set of tagged variants attached to each lifecycle
//! action and evaluated uniformly, so the policy for an action is data
//! rather than a choice made at the call site.

use serde::Serialize;

use super::{Lesson, LessonError};
use crate::domain::foundation::UserId;
use crate::domain::marketplace::Teacher;

/// Who is asking: the authenticated user and, if they have one, their
/// teacher profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorContext {
    pub user_id: UserId,
    pub teacher: Option<Teacher>,
}

impl ActorContext {
    pub fn new(user_id: UserId, teacher: Option<Teacher>) -> Self {
        Self { user_id, teacher }
    }
}

/// Relationship the actor must have with the lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    /// The actor's teacher profile teaches this lesson.
    TeacherOfLesson,
    /// The actor booked this lesson.
    StudentOfLesson,
    /// Either of the above.
    EitherParty,
}

impl Guard {
    /// Evaluates the guard.
    ///
    /// # Errors
    ///
    /// - `ActorNotTeacher` if a teacher is required and the actor has no profile
    /// - `NotRelatedTeacher` if the actor's profile does not teach this lesson
    /// - `NotRelatedUser` if the actor is not the student, or not either party
    pub fn check(&self, lesson: &Lesson, actor: &ActorContext) -> Result<(), LessonError> {
        match self {
            Guard::TeacherOfLesson => {
                let teacher = actor
                    .teacher
                    .ok_or(LessonError::ActorNotTeacher(actor.user_id))?;
                if lesson.is_teacher(teacher.id) {
                    Ok(())
                } else {
                    Err(LessonError::not_related_teacher(lesson.id, actor.user_id))
                }
            }
            Guard::StudentOfLesson => {
                if lesson.is_student(actor.user_id) {
                    Ok(())
                } else {
                    Err(LessonError::not_related_user(lesson.id, actor.user_id))
                }
            }
            Guard::EitherParty => {
                if Guard::StudentOfLesson.permits(lesson, actor)
                    || Guard::TeacherOfLesson.permits(lesson, actor)
                {
                    Ok(())
                } else {
                    Err(LessonError::not_related_user(lesson.id, actor.user_id))
                }
            }
        }
    }

    /// Returns true if [`Guard::check`] would succeed.
    pub fn permits(&self, lesson: &Lesson, actor: &ActorContext) -> bool {
        self.check(lesson, actor).is_ok()
    }
}
