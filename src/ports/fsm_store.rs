//! State machine store port.
//!
//! Persistence boundary for the FSM tables: the state catalog, machine
//! definitions, the transition edge list and live machine items. Catalog
//! rows are provisioned ahead of time; at runtime only items are written.
//!
//! # Atomicity
//!
//! [`FsmStore::swap_item_state`] is the single mutation on existing items.
//! It must behave as one atomic compare-and-swap that also re-checks the
//! edge, so two callers racing on the same item can never both move it.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, StateId, StateMachineId, StateMachineItemId};
use crate::domain::fsm::{MachineName, State, StateMachine, StateMachineItem, StateName};

/// Repository port for the FSM tables.
#[async_trait]
pub trait FsmStore: Send + Sync {
    /// Find a provisioned machine by name.
    async fn find_machine_by_name(
        &self,
        name: MachineName,
    ) -> Result<Option<StateMachine>, DomainError>;

    /// Find a provisioned machine by id.
    async fn find_machine(&self, id: StateMachineId) -> Result<Option<StateMachine>, DomainError>;

    /// Resolve a state name within one machine.
    ///
    /// Returns `None` unless the state is the machine's start state or an
    /// endpoint of one of its transitions.
    async fn find_machine_state(
        &self,
        machine_id: StateMachineId,
        name: StateName,
    ) -> Result<Option<State>, DomainError>;

    /// Returns true if the edge `(machine, current, next)` is declared.
    async fn transition_exists(
        &self,
        machine_id: StateMachineId,
        current: StateId,
        next: StateId,
    ) -> Result<bool, DomainError>;

    /// States reachable by one declared edge from `current`.
    async fn next_states(
        &self,
        machine_id: StateMachineId,
        current: StateId,
    ) -> Result<Vec<State>, DomainError>;

    /// Insert a new item in the given state.
    async fn insert_item(
        &self,
        machine_id: StateMachineId,
        state_id: StateId,
    ) -> Result<StateMachineItem, DomainError>;

    /// Remove an item. Only used to undo a creation whose owning entity was
    /// never persisted.
    async fn delete_item(&self, id: StateMachineItemId) -> Result<(), DomainError>;

    /// Load an item joined with its current state.
    async fn find_item_state(
        &self,
        id: StateMachineItemId,
    ) -> Result<Option<(StateMachineItem, State)>, DomainError>;

    /// Move an item from `expected` to `next`.
    ///
    /// Succeeds only if the item is still in `expected` and the edge
    /// `expected -> next` exists for its machine. Returns `false` when
    /// either condition no longer holds; nothing is written in that case.
    async fn swap_item_state(
        &self,
        id: StateMachineItemId,
        expected: StateId,
        next: StateId,
    ) -> Result<bool, DomainError>;
}
