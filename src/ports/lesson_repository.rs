//! Lesson repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LessonId};
use crate::domain::lesson::{Lesson, NewLesson};

/// Repository port for lesson persistence.
///
/// Lessons are written once at booking; their progress lives in the
/// referenced state machine item, so there is no update method.
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Insert a lesson and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, lesson: NewLesson) -> Result<Lesson, DomainError>;

    /// Find a lesson by id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: LessonId) -> Result<Option<Lesson>, DomainError>;
}
