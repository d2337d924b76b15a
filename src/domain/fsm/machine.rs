//! State machine definitions and the provisioned catalog.
//!
//! A machine is stored as three kinds of rows: the machine itself (name and
//! start state), the shared state catalog, and a declarative edge list.
//! [`MachineDefinition`] is the source of truth for what gets provisioned;
//! the SQL migration and the in-memory store both seed from the same graph.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::StateName;
use crate::domain::foundation::{StateId, StateMachineId, ValidationError};

/// Closed set of lifecycle kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineName {
    Lesson,
    Skill,
}

impl MachineName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineName::Lesson => "lesson",
            MachineName::Skill => "skill",
        }
    }
}

impl fmt::Display for MachineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MachineName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lesson" => Ok(MachineName::Lesson),
            "skill" => Ok(MachineName::Skill),
            other => Err(ValidationError::invalid_format(
                "machine",
                format!("unknown state machine '{}'", other),
            )),
        }
    }
}

/// A provisioned state machine row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMachine {
    pub id: StateMachineId,
    pub name: MachineName,
    pub start_state_id: StateId,
}

/// Declarative description of a machine: its start state and legal edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineDefinition {
    pub name: MachineName,
    pub start: StateName,
    pub transitions: Vec<(StateName, StateName)>,
}

impl MachineDefinition {
    /// Builds a definition, rejecting duplicate edges.
    pub fn new(
        name: MachineName,
        start: StateName,
        transitions: Vec<(StateName, StateName)>,
    ) -> Result<Self, ValidationError> {
        let mut seen = BTreeSet::new();
        for edge in &transitions {
            if !seen.insert(*edge) {
                return Err(ValidationError::invalid_format(
                    "transitions",
                    format!("duplicate transition {} -> {} in {}", edge.0, edge.1, name),
                ));
            }
        }
        Ok(Self {
            name,
            start,
            transitions,
        })
    }

    /// Lesson lifecycle: requested, then planned or rejected, then run to
    /// completion or cancelled along the way.
    pub fn lesson() -> Self {
        use StateName::*;
        Self {
            name: MachineName::Lesson,
            start: Pending,
            transitions: vec![
                (Pending, Planned),
                (Pending, Rejected),
                (Planned, Ongoing),
                (Planned, Cancelled),
                (Ongoing, Finished),
                (Ongoing, Cancelled),
            ],
        }
    }

    /// Teacher skill approval.
    pub fn skill() -> Self {
        use StateName::*;
        Self {
            name: MachineName::Skill,
            start: Pending,
            transitions: vec![
                (Pending, Approved),
                (Pending, Rejected),
                (Pending, Conflicted),
                (Conflicted, Approved),
                (Conflicted, Rejected),
                (Approved, Completed),
            ],
        }
    }

    /// States valid for this machine: the start state plus every edge endpoint.
    pub fn states(&self) -> BTreeSet<StateName> {
        let mut states = BTreeSet::new();
        states.insert(self.start);
        for (from, to) in &self.transitions {
            states.insert(*from);
            states.insert(*to);
        }
        states
    }

    /// Returns true if the edge `from -> to` is declared.
    pub fn allows(&self, from: StateName, to: StateName) -> bool {
        self.transitions.contains(&(from, to))
    }

    /// States with no outgoing edge.
    pub fn terminal_states(&self) -> BTreeSet<StateName> {
        self.states()
            .into_iter()
            .filter(|state| !self.transitions.iter().any(|(from, _)| from == state))
            .collect()
    }
}

/// Every machine provisioned at deploy time.
pub fn default_catalog() -> Vec<MachineDefinition> {
    vec![MachineDefinition::lesson(), MachineDefinition::skill()]
}
