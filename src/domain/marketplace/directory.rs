//! Users, teachers, categories and teacher skills.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, TeacherId, UserId};

/// A registered user. Students are plain users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

/// Teacher profile, always backed by a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub user_id: UserId,
}

impl Teacher {
    /// Returns true if this profile belongs to the given user.
    pub fn is_user(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// A subject that lessons can be booked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub active: bool,
}

/// A teacher's claim to teach a category.
///
/// `active` is only set once the skill has been approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherSkill {
    pub teacher_id: TeacherId,
    pub category_id: CategoryId,
    pub active: bool,
}
