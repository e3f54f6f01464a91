//! The carriage entity, the only mutable object in the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::HALF_CARRIAGE;
use crate::rail::Rail;

/// Unique carriage number. Allocated globally as `max existing + 1` (or 1
/// for an empty registry), so numbers keep increasing for as long as a
/// higher-numbered carriage remains on the track.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CarriageId(pub u32);

impl fmt::Display for CarriageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single carriage shuttling between the depots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carriage {
    pub id: CarriageId,
    /// Assigned at spawn, immutable thereafter.
    pub rail: Rail,
    /// Track coordinate; the body center sits at `position + HALF_CARRIAGE`.
    pub position: i32,
    /// Ticks spent at the current station, `0..=STATION_TICKS`.
    pub dwell_ticks: u32,
    pub is_broken: bool,
    /// Derived each tick: dwelling at a station, not broken, mining off.
    pub door_open: bool,
}

impl Carriage {
    /// New carriage at its rail's spawn endpoint, doors shut, not broken.
    #[must_use]
    pub const fn spawn_at(id: CarriageId, rail: Rail) -> Self {
        Self {
            id,
            rail,
            position: rail.spawn_position(),
            dwell_ticks: 0,
            is_broken: false,
            door_open: false,
        }
    }

    /// Width-adjusted coordinate compared against stations and depot walls.
    #[must_use]
    pub const fn center(&self) -> i32 {
        self.position + HALF_CARRIAGE
    }

    /// Whether the carriage stands exactly at its rail's depot endpoint.
    /// Exact equality is sound: step size divides every span, so the
    /// endpoint is hit, never overshot.
    #[must_use]
    pub const fn at_depot(&self) -> bool {
        self.position == self.rail.depot_position()
    }

    /// Distance travelled from the spawn endpoint.
    #[must_use]
    pub const fn distance_from_spawn(&self) -> i32 {
        (self.position - self.rail.spawn_position()).abs()
    }
}
