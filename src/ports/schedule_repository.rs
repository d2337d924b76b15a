//! Schedule slot repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ScheduleSlotId};
use crate::domain::marketplace::ScheduleSlot;

/// Repository port for teacher schedule slots.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn find_slot(&self, id: ScheduleSlotId) -> Result<Option<ScheduleSlot>, DomainError>;

    /// Mark a slot unavailable if it is still available.
    ///
    /// Returns `false` if the slot was already taken (or does not exist);
    /// the check and the write happen as one conditional update.
    async fn reserve_slot(&self, id: ScheduleSlotId) -> Result<bool, DomainError>;

    /// Make a slot available again. Used to undo a reservation when the
    /// rest of a booking fails.
    async fn release_slot(&self, id: ScheduleSlotId) -> Result<(), DomainError>;
}
