//! Tick orchestrator and the engine facade the collaborators drive.

use serde::{Deserialize, Serialize};

use crate::carriage::{Carriage, CarriageId};
use crate::error::SimError;
use crate::events::{Event, EventLog, RetireReason};
use crate::modes::ModeController;
use crate::movement::{self, MovementCtx};
use crate::rail::Rail;
use crate::registry::CarriageRegistry;
use crate::seed::RngStreams;

/// Full ordered-by-id view of the simulation for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub carriages: Vec<Carriage>,
    pub mining: bool,
    pub man_on_rail: Option<Rail>,
}

/// Result of one advanced tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub snapshot: Snapshot,
    pub events: EventLog,
}

/// The simulation engine: single-writer, non-reentrant, tick-driven.
///
/// An external driver calls [`MetroSim::tick`] at a fixed cadence
/// (nominally every [`crate::constants::TICK_MS`] milliseconds); commands
/// are synchronous mutations applied between ticks. The engine performs no
/// I/O and holds no timer.
#[derive(Debug, Clone)]
pub struct MetroSim {
    registry: CarriageRegistry,
    modes: ModeController,
    rng: RngStreams,
}

impl MetroSim {
    /// Empty simulation; the first tick seeds the canonical two carriages.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            registry: CarriageRegistry::new(),
            modes: ModeController::new(),
            rng: RngStreams::from_user_seed(seed),
        }
    }

    /// Assemble an engine around a pre-staged carriage set. Rejects a set
    /// that already violates the track invariants.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Invariant` when the supplied registry is
    /// inconsistent.
    pub fn from_parts(
        registry: CarriageRegistry,
        modes: ModeController,
        rng: RngStreams,
    ) -> Result<Self, SimError> {
        registry.validate()?;
        Ok(Self {
            registry,
            modes,
            rng,
        })
    }

    /// Read-only view for rendering, independent of ticking.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            carriages: self.registry.iter().cloned().collect(),
            mining: self.modes.mining(),
            man_on_rail: self.modes.man_on_rail(),
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &CarriageRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn modes(&self) -> &ModeController {
        &self.modes
    }

    /// Flip mining mode.
    pub fn toggle_mining(&mut self) -> Event {
        self.modes.toggle_mining()
    }

    /// Drop a man on a random rail, or clear the one already down.
    pub fn drop_or_clear_fallen_man(&mut self) -> Event {
        self.modes.drop_or_clear_fallen_man(self.rng.rail())
    }

    /// Explicitly place or clear the fallen man.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidCommand` when a man is already down on the
    /// other rail.
    pub fn set_fallen_man(&mut self, target: Option<Rail>) -> Result<Option<Event>, SimError> {
        self.modes.set_fallen_man(target)
    }

    /// Break a random carriage, or fix all when one is already broken.
    pub fn toggle_break(&mut self) -> Option<Event> {
        self.modes.toggle_break(&mut self.registry, self.rng.breakage())
    }

    /// Advance the simulation by one tick.
    ///
    /// The tick is atomic: sub-steps run against a working copy which is
    /// validated before committing, so a failed tick leaves state untouched.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Invariant` when the tick would violate a track
    /// invariant; the simulation should be halted rather than re-ticked.
    pub fn tick(&mut self) -> Result<TickOutcome, SimError> {
        let mut registry = self.registry.clone();
        let mut events = EventLog::new();

        // 1. The broken carriage retires at its depot, mining or not.
        let broken_at_depot = registry
            .iter()
            .find(|c| c.is_broken && c.at_depot())
            .map(|c| c.id);
        if let Some(id) = broken_at_depot {
            registry.remove(id);
            events.push(Event::CarriageRetired {
                id,
                reason: RetireReason::BrokenRetired,
            });
        }

        // 2. Mining sweep: every depot resident leaves in one batch.
        if self.modes.mining() {
            let ids = registry.depot_residents();
            for id in &ids {
                registry.remove(*id);
            }
            if ids.len() == 1 {
                events.push(Event::CarriageRetired {
                    id: ids[0],
                    reason: RetireReason::MinedRetired,
                });
            } else if !ids.is_empty() {
                events.push(Event::CarriagesRetired {
                    ids,
                    reason: RetireReason::MinedRetired,
                });
            }
        }

        // 3 and 4. Spawn decisions, first rail then second, one spawn each.
        let mut spawned: Vec<CarriageId> = Vec::new();
        if !self.modes.mining() {
            let respawn_all = registry.is_empty();
            for rail in Rail::BOTH {
                if (respawn_all || registry.spawn_eligible(rail))
                    && let Some(id) = registry.spawn(rail)
                {
                    spawned.push(id);
                    events.push(Event::CarriageStarted { id, rail });
                }
            }
        }

        // 5. Movement over everything steps 1-4 did not touch.
        let modes = self.modes;
        for carriage in registry.iter_mut() {
            if spawned.contains(&carriage.id) {
                continue;
            }
            let ctx = MovementCtx {
                blocked: modes.blocked(carriage.rail),
                mining: modes.mining(),
            };
            *carriage = movement::advance(carriage, ctx);
        }

        registry.validate()?;
        self.registry = registry;
        Ok(TickOutcome {
            snapshot: self.snapshot(),
            events,
        })
    }
}
