//! Teacher schedule slots.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ScheduleSlotId, TeacherId, Timestamp};

/// A bookable window in a teacher's calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub id: ScheduleSlotId,
    pub teacher_id: TeacherId,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub available: bool,
}

impl ScheduleSlot {
    /// Returns true if the slot is in this teacher's calendar.
    pub fn belongs_to(&self, teacher_id: TeacherId) -> bool {
        self.teacher_id == teacher_id
    }
}
