//! Directory reader port.
//!
//! Read-only access to the marketplace records that lesson guards and
//! booking rules consult. Every lookup returns `None` for a missing row so
//! the caller can raise the specific not-found error.

use async_trait::async_trait;

use crate::domain::foundation::{CategoryId, DomainError, TeacherId, UserId};
use crate::domain::marketplace::{Category, Teacher, TeacherSkill, User};

/// Reader port for users, teachers, categories and skills.
#[async_trait]
pub trait DirectoryReader: Send + Sync {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, DomainError>;

    async fn find_teacher(&self, id: TeacherId) -> Result<Option<Teacher>, DomainError>;

    /// Resolve the teacher profile behind a user, if any.
    async fn find_teacher_by_user(&self, user_id: UserId) -> Result<Option<Teacher>, DomainError>;

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, DomainError>;

    async fn find_teacher_skill(
        &self,
        teacher_id: TeacherId,
        category_id: CategoryId,
    ) -> Result<Option<TeacherSkill>, DomainError>;
}
