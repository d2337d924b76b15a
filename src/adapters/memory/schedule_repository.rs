//! In-memory schedule slots.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ScheduleSlotId};
use crate::domain::marketplace::ScheduleSlot;
use crate::ports::ScheduleRepository;

/// In-memory implementation of [`ScheduleRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryScheduleRepository {
    slots: Arc<RwLock<HashMap<ScheduleSlotId, ScheduleSlot>>>,
}

impl InMemoryScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with the given slots.
    pub fn with_slots(slots: impl IntoIterator<Item = ScheduleSlot>) -> Self {
        Self {
            slots: Arc::new(RwLock::new(
                slots.into_iter().map(|slot| (slot.id, slot)).collect(),
            )),
        }
    }

    /// Current availability of a slot (useful for tests).
    pub async fn is_available(&self, id: ScheduleSlotId) -> Option<bool> {
        self.slots.read().await.get(&id).map(|slot| slot.available)
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepository {
    async fn find_slot(&self, id: ScheduleSlotId) -> Result<Option<ScheduleSlot>, DomainError> {
        Ok(self.slots.read().await.get(&id).copied())
    }

    async fn reserve_slot(&self, id: ScheduleSlotId) -> Result<bool, DomainError> {
        let mut slots = self.slots.write().await;
        match slots.get_mut(&id) {
            Some(slot) if slot.available => {
                slot.available = false;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn release_slot(&self, id: ScheduleSlotId) -> Result<(), DomainError> {
        if let Some(slot) = self.slots.write().await.get_mut(&id) {
            slot.available = true;
        }
        Ok(())
    }
}
