//! Registry owning the active carriages and the spawn/remove rules.

use std::collections::BTreeMap;

use crate::carriage::{Carriage, CarriageId};
use crate::constants::{NEW_CARRIAGE_INTERVAL, STATION_COUNT};
use crate::error::InvariantViolation;
use crate::rail::Rail;

/// Owner of the active carriage set, keyed by id so snapshots come out in
/// id order for free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarriageRegistry {
    carriages: BTreeMap<CarriageId, Carriage>,
}

impl CarriageRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next global id: highest existing plus one, or 1 when empty.
    fn next_id(&self) -> CarriageId {
        self.carriages
            .keys()
            .next_back()
            .map_or(CarriageId(1), |id| CarriageId(id.0 + 1))
    }

    /// Place a new carriage at the rail's spawn endpoint. Returns `None`
    /// without touching the registry when the rail is already full; callers
    /// are expected to pre-check with [`Self::spawn_eligible`].
    pub fn spawn(&mut self, rail: Rail) -> Option<CarriageId> {
        if self.rail_count(rail) >= STATION_COUNT {
            return None;
        }
        let id = self.next_id();
        self.carriages.insert(id, Carriage::spawn_at(id, rail));
        Some(id)
    }

    /// Delete a carriage, returning it if it existed.
    pub fn remove(&mut self, id: CarriageId) -> Option<Carriage> {
        self.carriages.remove(&id)
    }

    /// Insert a pre-built carriage, replacing any entry with the same id.
    /// Used by harnesses that stage specific track states.
    pub fn insert(&mut self, carriage: Carriage) -> Option<Carriage> {
        self.carriages.insert(carriage.id, carriage)
    }

    /// Whether a new carriage may enter `rail` this tick: the rail is empty,
    /// or its newest carriage has cleared the spawn spacing and the rail is
    /// below capacity.
    #[must_use]
    pub fn spawn_eligible(&self, rail: Rail) -> bool {
        let newest = self
            .carriages
            .values()
            .filter(|c| c.rail == rail)
            .max_by_key(|c| c.id);
        let Some(newest) = newest else {
            return true;
        };
        newest.distance_from_spawn() > NEW_CARRIAGE_INTERVAL
            && self.rail_count(rail) < STATION_COUNT
    }

    #[must_use]
    pub fn rail_count(&self, rail: Rail) -> usize {
        self.carriages.values().filter(|c| c.rail == rail).count()
    }

    #[must_use]
    pub fn get(&self, id: CarriageId) -> Option<&Carriage> {
        self.carriages.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.carriages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carriages.is_empty()
    }

    /// Carriages in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Carriage> {
        self.carriages.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Carriage> {
        self.carriages.values_mut()
    }

    /// The broken carriage, if any. At most one exists at a time.
    #[must_use]
    pub fn broken(&self) -> Option<&Carriage> {
        self.carriages.values().find(|c| c.is_broken)
    }

    /// Clear `is_broken` on every carriage (fix-all semantics).
    pub fn clear_broken(&mut self) {
        for carriage in self.carriages.values_mut() {
            carriage.is_broken = false;
        }
    }

    /// Ids of carriages standing exactly at their depot endpoint.
    #[must_use]
    pub fn depot_residents(&self) -> Vec<CarriageId> {
        self.carriages
            .values()
            .filter(|c| c.at_depot())
            .map(|c| c.id)
            .collect()
    }

    /// Check the structural invariants of the carriage set. A violation is
    /// fatal to the tick that produced it.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut broken: Option<CarriageId> = None;
        for carriage in self.carriages.values() {
            if carriage.is_broken {
                if let Some(first) = broken {
                    return Err(InvariantViolation::DoubleBreakage {
                        first,
                        second: carriage.id,
                    });
                }
                broken = Some(carriage.id);
            }
            if !carriage.rail.contains(carriage.position) {
                return Err(InvariantViolation::OutOfBounds {
                    id: carriage.id,
                    position: carriage.position,
                });
            }
        }
        for rail in Rail::BOTH {
            let count = self.rail_count(rail);
            if count > STATION_COUNT {
                return Err(InvariantViolation::OverCapacity {
                    rail,
                    count,
                    limit: STATION_COUNT,
                });
            }
        }
        Ok(())
    }
}
