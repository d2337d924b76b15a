//! Generic state machine engine.
//!
//! Stateless query and mutation operations over an [`FsmStore`]. The engine
//! knows nothing about lessons or skills: which edges exist is data, and
//! who may follow them is decided by the caller before it gets here.
//!
//! # Concurrency
//!
//! Transitions are applied with [`FsmStore::swap_item_state`]. When the
//! swap loses a race the engine re-reads the item and re-validates the edge
//! from the state the winner left behind, up to [`MAX_SWAP_ATTEMPTS`] times.
//! Losing callers therefore see `IllegalTransition` naming the winner's
//! state, never a silently overwritten one.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::foundation::{
    DomainError, ErrorCode, StateId, StateMachineId, StateMachineItemId,
};
use crate::domain::fsm::{FsmError, MachineName, State, StateMachine, StateMachineItem, StateName};
use crate::ports::FsmStore;

/// Upper bound on compare-and-swap retries for a single transition.
pub const MAX_SWAP_ATTEMPTS: usize = 3;

/// Runs any provisioned state machine.
#[derive(Clone)]
pub struct FsmEngine {
    store: Arc<dyn FsmStore>,
}

impl FsmEngine {
    pub fn new(store: Arc<dyn FsmStore>) -> Self {
        Self { store }
    }

    /// Creates a new item of `machine` in its start state.
    ///
    /// # Errors
    ///
    /// - `UnknownMachine` if the machine has not been provisioned
    pub async fn create_instance(&self, machine: MachineName) -> Result<StateMachineItem, FsmError> {
        let machine = self
            .store
            .find_machine_by_name(machine)
            .await?
            .ok_or(FsmError::UnknownMachine(machine))?;

        let item = self
            .store
            .insert_item(machine.id, machine.start_state_id)
            .await?;

        debug!(item_id = %item.id, machine = %machine.name, "Created state machine item");
        Ok(item)
    }

    /// Deletes an item whose owning entity was never persisted.
    pub async fn discard_instance(&self, item_id: StateMachineItemId) -> Result<(), FsmError> {
        self.store.delete_item(item_id).await?;
        debug!(item_id = %item_id, "Discarded state machine item");
        Ok(())
    }

    /// Returns the item's current state.
    pub async fn get_current_state(&self, item_id: StateMachineItemId) -> Result<State, FsmError> {
        let (_, state) = self.load_item(item_id).await?;
        Ok(state)
    }

    /// Returns true iff the edge `current -> next` is declared for the machine.
    pub async fn can_transition(
        &self,
        machine_id: StateMachineId,
        current: StateId,
        next: StateId,
    ) -> Result<bool, FsmError> {
        Ok(self.store.transition_exists(machine_id, current, next).await?)
    }

    /// States the item could move to next. Empty for terminal states.
    pub async fn available_transitions(
        &self,
        item_id: StateMachineItemId,
    ) -> Result<Vec<State>, FsmError> {
        let (item, state) = self.load_item(item_id).await?;
        Ok(self.store.next_states(item.state_machine_id, state.id).await?)
    }

    /// Moves the item to `next` from whatever state it is in.
    ///
    /// # Errors
    ///
    /// - `ItemNotFound` if the item does not exist
    /// - `UnknownState` if `next` is not a state of the item's machine
    /// - `IllegalTransition` if no edge leads from the current state to `next`
    pub async fn apply_transition(
        &self,
        item_id: StateMachineItemId,
        next: StateName,
    ) -> Result<State, FsmError> {
        self.transition(item_id, None, next).await
    }

    /// Moves the item to `next` only if it is still in `expected`.
    ///
    /// Used when the caller's authorization depended on the state it
    /// observed: if another writer moved the item in between, this fails
    /// with `IllegalTransition` instead of following an edge from a state
    /// the caller never validated.
    pub async fn apply_transition_from(
        &self,
        item_id: StateMachineItemId,
        expected: StateId,
        next: StateName,
    ) -> Result<State, FsmError> {
        self.transition(item_id, Some(expected), next).await
    }

    async fn transition(
        &self,
        item_id: StateMachineItemId,
        expected: Option<StateId>,
        next: StateName,
    ) -> Result<State, FsmError> {
        let (item, mut current) = self.load_item(item_id).await?;
        let machine = self.machine_of(&item).await?;

        let target = self
            .store
            .find_machine_state(machine.id, next)
            .await?
            .ok_or_else(|| FsmError::unknown_state(machine.name, next))?;

        for attempt in 1..=MAX_SWAP_ATTEMPTS {
            if expected.is_some_and(|id| id != current.id) {
                info!(
                    item_id = %item_id,
                    current = %current.name,
                    attempted = %next,
                    "Item left the expected state"
                );
                return Err(FsmError::illegal_transition(current.name, next));
            }

            if !self.can_transition(machine.id, current.id, target.id).await? {
                info!(
                    item_id = %item_id,
                    machine = %machine.name,
                    current = %current.name,
                    attempted = %next,
                    "Transition rejected"
                );
                return Err(FsmError::illegal_transition(current.name, next));
            }

            if self
                .store
                .swap_item_state(item_id, current.id, target.id)
                .await?
            {
                debug!(
                    item_id = %item_id,
                    machine = %machine.name,
                    from = %current.name,
                    to = %target.name,
                    "State machine item transitioned"
                );
                return Ok(target);
            }

            warn!(
                item_id = %item_id,
                attempt,
                observed = %current.name,
                "Concurrent transition detected, re-reading state"
            );
            current = self.get_current_state(item_id).await?;
        }

        Err(FsmError::illegal_transition(current.name, next))
    }

    async fn load_item(
        &self,
        item_id: StateMachineItemId,
    ) -> Result<(StateMachineItem, State), FsmError> {
        self.store
            .find_item_state(item_id)
            .await?
            .ok_or(FsmError::ItemNotFound(item_id))
    }

    async fn machine_of(&self, item: &StateMachineItem) -> Result<StateMachine, FsmError> {
        self.store
            .find_machine(item.state_machine_id)
            .await?
            .ok_or_else(|| {
                FsmError::Store(DomainError::new(
                    ErrorCode::InternalError,
                    format!(
                        "Item {} references missing machine {}",
                        item.id, item.state_machine_id
                    ),
                ))
            })
    }
}
