//! In-memory directory.
//!
//! The directory is read-only from the lesson workflow's point of view, so
//! it is populated up front with builder methods and needs no lock.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::foundation::{CategoryId, DomainError, TeacherId, UserId};
use crate::domain::marketplace::{Category, Teacher, TeacherSkill, User};
use crate::ports::DirectoryReader;

/// In-memory implementation of [`DirectoryReader`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    users: HashMap<UserId, User>,
    teachers: HashMap<TeacherId, Teacher>,
    categories: HashMap<CategoryId, Category>,
    skills: HashMap<(TeacherId, CategoryId), TeacherSkill>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id, user);
        self
    }

    /// Adds a teacher profile. The backing user must be added separately.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.insert(teacher.id, teacher);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.insert(category.id, category);
        self
    }

    pub fn with_skill(mut self, skill: TeacherSkill) -> Self {
        self.skills
            .insert((skill.teacher_id, skill.category_id), skill);
        self
    }
}

#[async_trait]
impl DirectoryReader for InMemoryDirectory {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.get(&id).cloned())
    }

    async fn find_teacher(&self, id: TeacherId) -> Result<Option<Teacher>, DomainError> {
        Ok(self.teachers.get(&id).copied())
    }

    async fn find_teacher_by_user(&self, user_id: UserId) -> Result<Option<Teacher>, DomainError> {
        Ok(self
            .teachers
            .values()
            .find(|teacher| teacher.is_user(user_id))
            .copied())
    }

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, DomainError> {
        Ok(self.categories.get(&id).cloned())
    }

    async fn find_teacher_skill(
        &self,
        teacher_id: TeacherId,
        category_id: CategoryId,
    ) -> Result<Option<TeacherSkill>, DomainError> {
        Ok(self.skills.get(&(teacher_id, category_id)).copied())
    }
}
