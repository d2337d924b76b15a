//! PostgreSQL implementation of ScheduleRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, ScheduleSlotId, TeacherId, Timestamp};
use crate::domain::marketplace::ScheduleSlot;
use crate::ports::ScheduleRepository;

/// PostgreSQL implementation of the ScheduleRepository port.
pub struct PostgresScheduleRepository {
    pool: PgPool,
}

impl PostgresScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SlotRow {
    id: i64,
    teacher_id: i64,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    available: bool,
}

impl From<SlotRow> for ScheduleSlot {
    fn from(row: SlotRow) -> Self {
        ScheduleSlot {
            id: ScheduleSlotId::new(row.id),
            teacher_id: TeacherId::new(row.teacher_id),
            starts_at: Timestamp::from_datetime(row.starts_at),
            ends_at: Timestamp::from_datetime(row.ends_at),
            available: row.available,
        }
    }
}

#[async_trait]
impl ScheduleRepository for PostgresScheduleRepository {
    async fn find_slot(&self, id: ScheduleSlotId) -> Result<Option<ScheduleSlot>, DomainError> {
        let row: Option<SlotRow> = sqlx::query_as(
            "SELECT id, teacher_id, starts_at, ends_at, available FROM schedule_slots WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch slot: {}", e))
        })?;

        Ok(row.map(ScheduleSlot::from))
    }

    async fn reserve_slot(&self, id: ScheduleSlotId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE schedule_slots SET available = FALSE WHERE id = $1 AND available",
        )
        .bind(id.value())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to reserve slot: {}", e))
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn release_slot(&self, id: ScheduleSlotId) -> Result<(), DomainError> {
        sqlx::query("UPDATE schedule_slots SET available = TRUE WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Failed to release slot: {}", e))
            })?;
        Ok(())
    }
}
