//! Strongly-typed identifier value objects.
//!
//! Every persisted row is keyed by a database-assigned 64-bit integer.
//! Wrapping each key in its own newtype keeps a `TeacherId` from being
//! passed where a `UserId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Generates an integer-backed identifier newtype.
///
/// ```ignore
/// define_id!(
///     /// Unique identifier for a lesson.
///     LessonId
/// );
/// let id = LessonId::new(42);
/// assert_eq!(id.value(), 42);
/// ```
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database key.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw database key.
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a registered user (students are plain users).
    UserId
);

define_id!(
    /// Unique identifier for a teacher profile. A teacher is always backed by a user.
    TeacherId
);

define_id!(
    /// Unique identifier for a subject category.
    CategoryId
);

define_id!(
    /// Unique identifier for a bookable schedule slot.
    ScheduleSlotId
);

define_id!(
    /// Unique identifier for a lesson.
    LessonId
);

define_id!(
    /// Unique identifier for a state in the state catalog.
    StateId
);

define_id!(
    /// Unique identifier for a state machine definition.
    StateMachineId
);

define_id!(
    /// Unique identifier for a declared transition edge.
    TransitionId
);

define_id!(
    /// Unique identifier for a live state machine instance.
    StateMachineItemId
);
