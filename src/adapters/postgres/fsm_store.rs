//! PostgreSQL implementation of FsmStore.
//!
//! Every check is a query; nothing from the catalog is cached in process.
//! The state swap is a single conditional `UPDATE` that re-checks both the
//! expected state and the edge, so concurrent writers to one item are
//! serialized by the row lock and the loser updates zero rows.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{
    DomainError, ErrorCode, StateId, StateMachineId, StateMachineItemId,
};
use crate::domain::fsm::{MachineName, State, StateMachine, StateMachineItem, StateName};
use crate::ports::FsmStore;

/// PostgreSQL implementation of the FsmStore port.
pub struct PostgresFsmStore {
    pool: PgPool,
}

impl PostgresFsmStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MachineRow {
    id: i64,
    name: String,
    start_state_id: i64,
}

impl TryFrom<MachineRow> for StateMachine {
    type Error = DomainError;

    fn try_from(row: MachineRow) -> Result<Self, Self::Error> {
        let name: MachineName = row.name.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid machine row: {}", e))
        })?;
        Ok(StateMachine {
            id: StateMachineId::new(row.id),
            name,
            start_state_id: StateId::new(row.start_state_id),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StateRow {
    id: i64,
    name: String,
}

impl TryFrom<StateRow> for State {
    type Error = DomainError;

    fn try_from(row: StateRow) -> Result<Self, Self::Error> {
        Ok(State::new(StateId::new(row.id), parse_state_name(&row.name)?))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ItemStateRow {
    id: i64,
    state_machine_id: i64,
    state_id: i64,
    state_name: String,
}

impl ItemStateRow {
    fn into_parts(self) -> Result<(StateMachineItem, State), DomainError> {
        let item = StateMachineItem {
            id: StateMachineItemId::new(self.id),
            state_machine_id: StateMachineId::new(self.state_machine_id),
            state_id: StateId::new(self.state_id),
        };
        let state = State::new(item.state_id, parse_state_name(&self.state_name)?);
        Ok((item, state))
    }
}

fn parse_state_name(name: &str) -> Result<StateName, DomainError> {
    name.parse().map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid state row: {}", e))
    })
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

#[async_trait]
impl FsmStore for PostgresFsmStore {
    async fn find_machine_by_name(
        &self,
        name: MachineName,
    ) -> Result<Option<StateMachine>, DomainError> {
        let row: Option<MachineRow> = sqlx::query_as(
            "SELECT id, name, start_state_id FROM state_machines WHERE name = $1",
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find state machine", e))?;

        row.map(StateMachine::try_from).transpose()
    }

    async fn find_machine(&self, id: StateMachineId) -> Result<Option<StateMachine>, DomainError> {
        let row: Option<MachineRow> =
            sqlx::query_as("SELECT id, name, start_state_id FROM state_machines WHERE id = $1")
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find state machine", e))?;

        row.map(StateMachine::try_from).transpose()
    }

    async fn find_machine_state(
        &self,
        machine_id: StateMachineId,
        name: StateName,
    ) -> Result<Option<State>, DomainError> {
        let row: Option<StateRow> = sqlx::query_as(
            r#"
            SELECT s.id, s.name
            FROM states s
            WHERE s.name = $2
              AND (
                EXISTS (
                    SELECT 1 FROM state_machines m
                    WHERE m.id = $1 AND m.start_state_id = s.id
                )
                OR EXISTS (
                    SELECT 1 FROM transitions t
                    WHERE t.state_machine_id = $1
                      AND (t.current_state_id = s.id OR t.next_state_id = s.id)
                )
              )
            "#,
        )
        .bind(machine_id.value())
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("resolve state", e))?;

        row.map(State::try_from).transpose()
    }

    async fn transition_exists(
        &self,
        machine_id: StateMachineId,
        current: StateId,
        next: StateId,
    ) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM transitions
                WHERE state_machine_id = $1 AND current_state_id = $2 AND next_state_id = $3
            )
            "#,
        )
        .bind(machine_id.value())
        .bind(current.value())
        .bind(next.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("check transition", e))
    }

    async fn next_states(
        &self,
        machine_id: StateMachineId,
        current: StateId,
    ) -> Result<Vec<State>, DomainError> {
        let rows: Vec<StateRow> = sqlx::query_as(
            r#"
            SELECT s.id, s.name
            FROM transitions t
            JOIN states s ON s.id = t.next_state_id
            WHERE t.state_machine_id = $1 AND t.current_state_id = $2
            ORDER BY t.id
            "#,
        )
        .bind(machine_id.value())
        .bind(current.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list transitions", e))?;

        rows.into_iter().map(State::try_from).collect()
    }

    async fn insert_item(
        &self,
        machine_id: StateMachineId,
        state_id: StateId,
    ) -> Result<StateMachineItem, DomainError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO state_machine_items (state_machine_id, state_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(machine_id.value())
        .bind(state_id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("create state machine item", e))?;

        Ok(StateMachineItem {
            id: StateMachineItemId::new(id),
            state_machine_id: machine_id,
            state_id,
        })
    }

    async fn delete_item(&self, id: StateMachineItemId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM state_machine_items WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete state machine item", e))?;
        Ok(())
    }

    async fn find_item_state(
        &self,
        id: StateMachineItemId,
    ) -> Result<Option<(StateMachineItem, State)>, DomainError> {
        let row: Option<ItemStateRow> = sqlx::query_as(
            r#"
            SELECT i.id, i.state_machine_id, i.state_id, s.name AS state_name
            FROM state_machine_items i
            JOIN states s ON s.id = i.state_id
            WHERE i.id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find state machine item", e))?;

        row.map(ItemStateRow::into_parts).transpose()
    }

    async fn swap_item_state(
        &self,
        id: StateMachineItemId,
        expected: StateId,
        next: StateId,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE state_machine_items i
            SET state_id = $3
            WHERE i.id = $1
              AND i.state_id = $2
              AND EXISTS (
                SELECT 1 FROM transitions t
                WHERE t.state_machine_id = i.state_machine_id
                  AND t.current_state_id = $2
                  AND t.next_state_id = $3
              )
            "#,
        )
        .bind(id.value())
        .bind(expected.value())
        .bind(next.value())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update state machine item", e))?;

        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_row_maps_to_item_and_state() {
        let row = ItemStateRow {
            id: 5,
            state_machine_id: 1,
            state_id: 4,
            state_name: "ongoing".to_string(),
        };
        let (item, state) = row.into_parts().unwrap();
        assert_eq!(item.id, StateMachineItemId::new(5));
        assert_eq!(state, State::new(StateId::new(4), StateName::Ongoing));
    }

    #[test]
    fn unknown_state_name_is_a_database_error() {
        let err = State::try_from(StateRow {
            id: 99,
            name: "paused".to_string(),
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn unknown_machine_name_is_a_database_error() {
        let err = StateMachine::try_from(MachineRow {
            id: 3,
            name: "course".to_string(),
            start_state_id: 1,
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
