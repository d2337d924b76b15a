//! PostgreSQL implementation of LessonRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{
    CategoryId, DomainError, ErrorCode, LessonId, ScheduleSlotId, StateMachineItemId, TeacherId,
    Timestamp, UserId,
};
use crate::domain::lesson::{Lesson, NewLesson};
use crate::ports::LessonRepository;

/// PostgreSQL implementation of the LessonRepository port.
pub struct PostgresLessonRepository {
    pool: PgPool,
}

impl PostgresLessonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a lesson.
#[derive(Debug, sqlx::FromRow)]
struct LessonRow {
    id: i64,
    student_id: i64,
    teacher_id: i64,
    category_id: i64,
    schedule_slot_id: i64,
    state_machine_item_id: i64,
    created_at: DateTime<Utc>,
}

impl From<LessonRow> for Lesson {
    fn from(row: LessonRow) -> Self {
        Lesson {
            id: LessonId::new(row.id),
            student_id: UserId::new(row.student_id),
            teacher_id: TeacherId::new(row.teacher_id),
            category_id: CategoryId::new(row.category_id),
            schedule_slot_id: ScheduleSlotId::new(row.schedule_slot_id),
            state_item_id: StateMachineItemId::new(row.state_machine_item_id),
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl LessonRepository for PostgresLessonRepository {
    async fn insert(&self, lesson: NewLesson) -> Result<Lesson, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO lessons (
                student_id, teacher_id, category_id, schedule_slot_id,
                state_machine_item_id, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(lesson.student_id.value())
        .bind(lesson.teacher_id.value())
        .bind(lesson.category_id.value())
        .bind(lesson.schedule_slot_id.value())
        .bind(lesson.state_item_id.value())
        .bind(*lesson.created_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to save lesson: {}", e))
        })?;

        Ok(lesson.into_lesson(LessonId::new(id)))
    }

    async fn find_by_id(&self, id: LessonId) -> Result<Option<Lesson>, DomainError> {
        let row: Option<LessonRow> = sqlx::query_as(
            r#"
            SELECT id, student_id, teacher_id, category_id, schedule_slot_id,
                   state_machine_item_id, created_at
            FROM lessons
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch lesson: {}", e))
        })?;

        Ok(row.map(Lesson::from))
    }
}
