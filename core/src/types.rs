//! Shared primitive types used across the entire simulation.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trial's position in its batch. Indices start at 1.
pub type TrialIndex = u64;

/// One of the three doors on stage.
///
/// Serializes as its number (1, 2 or 3), which is also how it
/// appears in the CSV export and the rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Door {
    One,
    Two,
    Three,
}

impl Door {
    /// All doors, in ascending order. Candidate lists are always
    /// built by filtering this array so their order is stable.
    pub const ALL: [Door; 3] = [Door::One, Door::Two, Door::Three];

    pub fn number(self) -> u8 {
        match self {
            Door::One   => 1,
            Door::Two   => 2,
            Door::Three => 3,
        }
    }

    pub fn from_number(n: u8) -> SimResult<Self> {
        match n {
            1 => Ok(Door::One),
            2 => Ok(Door::Two),
            3 => Ok(Door::Three),
            other => Err(SimError::InvalidDoor { value: other as u64 }),
        }
    }
}

impl TryFrom<u8> for Door {
    type Error = SimError;

    fn try_from(n: u8) -> SimResult<Self> {
        Door::from_number(n)
    }
}

impl From<Door> for u8 {
    fn from(door: Door) -> u8 {
        door.number()
    }
}

impl fmt::Display for Door {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
