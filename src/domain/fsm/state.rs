//! State catalog entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateId, ValidationError};

/// Closed vocabulary of state names.
///
/// Names are unique across the catalog; a machine uses the subset that its
/// start state and transitions mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateName {
    Pending,
    Planned,
    Rejected,
    Ongoing,
    Cancelled,
    Finished,
    Approved,
    Conflicted,
    Completed,
}

impl StateName {
    /// Every name in the catalog, in provisioning order.
    pub const ALL: [StateName; 9] = [
        StateName::Pending,
        StateName::Planned,
        StateName::Rejected,
        StateName::Ongoing,
        StateName::Cancelled,
        StateName::Finished,
        StateName::Approved,
        StateName::Conflicted,
        StateName::Completed,
    ];

    /// Returns the persisted name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StateName::Pending => "pending",
            StateName::Planned => "planned",
            StateName::Rejected => "rejected",
            StateName::Ongoing => "ongoing",
            StateName::Cancelled => "cancelled",
            StateName::Finished => "finished",
            StateName::Approved => "approved",
            StateName::Conflicted => "conflicted",
            StateName::Completed => "completed",
        }
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("state", format!("unknown state name '{}'", s))
            })
    }
}

/// A row of the state catalog. Immutable reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    pub name: StateName,
}

impl State {
    pub fn new(id: StateId, name: StateName) -> Self {
        Self { id, name }
    }
}
