//! PostgreSQL implementation of DirectoryReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, TeacherId, UserId};
use crate::domain::marketplace::{Category, Teacher, TeacherSkill, User};
use crate::ports::DirectoryReader;

/// PostgreSQL implementation of the DirectoryReader port.
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TeacherRow {
    id: i64,
    user_id: i64,
}

impl From<TeacherRow> for Teacher {
    fn from(row: TeacherRow) -> Self {
        Teacher {
            id: TeacherId::new(row.id),
            user_id: UserId::new(row.user_id),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    active: bool,
}

fn db_error(what: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch {}: {}", what, e))
}

#[async_trait]
impl DirectoryReader for PostgresDirectory {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row: Option<(i64, String)> = sqlx::query_as("SELECT id, name FROM users WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("user", e))?;

        Ok(row.map(|(id, name)| User {
            id: UserId::new(id),
            name,
        }))
    }

    async fn find_teacher(&self, id: TeacherId) -> Result<Option<Teacher>, DomainError> {
        let row: Option<TeacherRow> =
            sqlx::query_as("SELECT id, user_id FROM teachers WHERE id = $1")
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("teacher", e))?;

        Ok(row.map(Teacher::from))
    }

    async fn find_teacher_by_user(&self, user_id: UserId) -> Result<Option<Teacher>, DomainError> {
        let row: Option<TeacherRow> =
            sqlx::query_as("SELECT id, user_id FROM teachers WHERE user_id = $1")
                .bind(user_id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("teacher", e))?;

        Ok(row.map(Teacher::from))
    }

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, DomainError> {
        let row: Option<CategoryRow> =
            sqlx::query_as("SELECT id, name, active FROM categories WHERE id = $1")
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("category", e))?;

        Ok(row.map(|row| Category {
            id: CategoryId::new(row.id),
            name: row.name,
            active: row.active,
        }))
    }

    async fn find_teacher_skill(
        &self,
        teacher_id: TeacherId,
        category_id: CategoryId,
    ) -> Result<Option<TeacherSkill>, DomainError> {
        let active: Option<bool> = sqlx::query_scalar(
            "SELECT active FROM teacher_skills WHERE teacher_id = $1 AND category_id = $2",
        )
        .bind(teacher_id.value())
        .bind(category_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("teacher skill", e))?;

        Ok(active.map(|active| TeacherSkill {
            teacher_id,
            category_id,
            active,
        }))
    }
}
