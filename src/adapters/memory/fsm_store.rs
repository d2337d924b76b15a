//! In-memory FSM store.
//!
//! Catalog rows are built once from [`MachineDefinition`]s and never change;
//! only items sit behind a lock. Ids are assigned the same way the SQL
//! migration assigns them, so both stores agree on state ids.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, StateId, StateMachineId, StateMachineItemId, TransitionId,
};
use crate::domain::fsm::{
    default_catalog, MachineDefinition, MachineName, State, StateMachine, StateMachineItem,
    StateName, Transition,
};
use crate::ports::FsmStore;

/// In-memory implementation of [`FsmStore`].
#[derive(Debug, Clone)]
pub struct InMemoryFsmStore {
    states: Vec<State>,
    machines: Vec<StateMachine>,
    transitions: Vec<Transition>,
    items: Arc<RwLock<HashMap<StateMachineItemId, StateMachineItem>>>,
    next_item_id: Arc<AtomicI64>,
}

impl InMemoryFsmStore {
    /// Store provisioned with the default lesson and skill machines.
    pub fn new() -> Self {
        Self::with_definitions(default_catalog())
    }

    /// Store provisioned with exactly the given machines.
    pub fn with_definitions(definitions: impl IntoIterator<Item = MachineDefinition>) -> Self {
        let states: Vec<State> = StateName::ALL
            .iter()
            .enumerate()
            .map(|(i, name)| State::new(StateId::new(i as i64 + 1), *name))
            .collect();

        let state_id = |name: StateName| {
            states
                .iter()
                .find(|s| s.name == name)
                .map(|s| s.id)
                .unwrap_or_else(|| unreachable!("catalog covers every state name"))
        };

        let mut machines = Vec::new();
        let mut transitions = Vec::new();
        for (i, definition) in definitions.into_iter().enumerate() {
            let machine = StateMachine {
                id: StateMachineId::new(i as i64 + 1),
                name: definition.name,
                start_state_id: state_id(definition.start),
            };
            for (from, to) in &definition.transitions {
                transitions.push(Transition {
                    id: TransitionId::new(transitions.len() as i64 + 1),
                    state_machine_id: machine.id,
                    current_state_id: state_id(*from),
                    next_state_id: state_id(*to),
                });
            }
            machines.push(machine);
        }

        Self {
            states,
            machines,
            transitions,
            items: Arc::new(RwLock::new(HashMap::new())),
            next_item_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Number of live items (useful for tests).
    pub async fn item_count(&self) -> usize {
        self.items.read().await.len()
    }

    fn state(&self, id: StateId) -> Option<State> {
        self.states.iter().find(|s| s.id == id).copied()
    }

    fn has_edge(&self, machine_id: StateMachineId, current: StateId, next: StateId) -> bool {
        self.transitions.iter().any(|t| {
            t.state_machine_id == machine_id
                && t.current_state_id == current
                && t.next_state_id == next
        })
    }
}

impl Default for InMemoryFsmStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FsmStore for InMemoryFsmStore {
    async fn find_machine_by_name(
        &self,
        name: MachineName,
    ) -> Result<Option<StateMachine>, DomainError> {
        Ok(self.machines.iter().find(|m| m.name == name).copied())
    }

    async fn find_machine(&self, id: StateMachineId) -> Result<Option<StateMachine>, DomainError> {
        Ok(self.machines.iter().find(|m| m.id == id).copied())
    }

    async fn find_machine_state(
        &self,
        machine_id: StateMachineId,
        name: StateName,
    ) -> Result<Option<State>, DomainError> {
        let Some(machine) = self.machines.iter().find(|m| m.id == machine_id) else {
            return Ok(None);
        };
        let Some(state) = self.states.iter().find(|s| s.name == name).copied() else {
            return Ok(None);
        };

        let in_machine = machine.start_state_id == state.id
            || self.transitions.iter().any(|t| {
                t.state_machine_id == machine_id
                    && (t.current_state_id == state.id || t.next_state_id == state.id)
            });

        Ok(in_machine.then_some(state))
    }

    async fn transition_exists(
        &self,
        machine_id: StateMachineId,
        current: StateId,
        next: StateId,
    ) -> Result<bool, DomainError> {
        Ok(self.has_edge(machine_id, current, next))
    }

    async fn next_states(
        &self,
        machine_id: StateMachineId,
        current: StateId,
    ) -> Result<Vec<State>, DomainError> {
        Ok(self
            .transitions
            .iter()
            .filter(|t| t.state_machine_id == machine_id && t.current_state_id == current)
            .filter_map(|t| self.state(t.next_state_id))
            .collect())
    }

    async fn insert_item(
        &self,
        machine_id: StateMachineId,
        state_id: StateId,
    ) -> Result<StateMachineItem, DomainError> {
        let item = StateMachineItem {
            id: StateMachineItemId::new(self.next_item_id.fetch_add(1, Ordering::SeqCst)),
            state_machine_id: machine_id,
            state_id,
        };
        self.items.write().await.insert(item.id, item);
        Ok(item)
    }

    async fn delete_item(&self, id: StateMachineItemId) -> Result<(), DomainError> {
        self.items.write().await.remove(&id);
        Ok(())
    }

    async fn find_item_state(
        &self,
        id: StateMachineItemId,
    ) -> Result<Option<(StateMachineItem, State)>, DomainError> {
        let items = self.items.read().await;
        Ok(items
            .get(&id)
            .and_then(|item| self.state(item.state_id).map(|state| (*item, state))))
    }

    async fn swap_item_state(
        &self,
        id: StateMachineItemId,
        expected: StateId,
        next: StateId,
    ) -> Result<bool, DomainError> {
        let mut items = self.items.write().await;
        let Some(item) = items.get_mut(&id) else {
            return Ok(false);
        };
        if item.state_id != expected || !self.has_edge(item.state_machine_id, expected, next) {
            return Ok(false);
        }
        item.state_id = next;
        Ok(true)
    }
}
