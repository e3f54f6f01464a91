//! The two fixed rails and their depot endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DEPOT_LEFT, DEPOT_RIGHT, HALF_CARRIAGE};

/// One of the two parallel tracks a carriage is permanently assigned to.
///
/// The first rail runs from the right depot toward the left depot
/// (increasing position); the second runs the opposite way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rail {
    First,
    Second,
}

impl Rail {
    /// Both rails, in the order spawn decisions are evaluated.
    pub const BOTH: [Self; 2] = [Self::First, Self::Second];

    /// Sign of the per-tick position delta on this rail.
    #[must_use]
    pub const fn direction(self) -> i32 {
        match self {
            Self::First => 1,
            Self::Second => -1,
        }
    }

    /// Position a freshly spawned carriage starts from.
    #[must_use]
    pub const fn spawn_position(self) -> i32 {
        match self {
            Self::First => DEPOT_RIGHT,
            Self::Second => DEPOT_LEFT,
        }
    }

    /// Depot wall coordinate this rail runs toward.
    #[must_use]
    pub const fn destination_wall(self) -> i32 {
        match self {
            Self::First => DEPOT_LEFT,
            Self::Second => DEPOT_RIGHT,
        }
    }

    /// Position at which the carriage center touches the destination wall.
    /// Width-adjusted so the body, not just a point, stays inside the depot.
    #[must_use]
    pub const fn depot_position(self) -> i32 {
        self.destination_wall() - HALF_CARRIAGE
    }

    /// Whether `position` lies on the travelled span of this rail, spawn and
    /// depot endpoints inclusive.
    #[must_use]
    pub const fn contains(self, position: i32) -> bool {
        let (lo, hi) = match self {
            Self::First => (self.spawn_position(), self.depot_position()),
            Self::Second => (self.depot_position(), self.spawn_position()),
        };
        lo <= position && position <= hi
    }

    /// Lowercase label used in human-readable event text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
        }
    }
}

impl fmt::Display for Rail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
