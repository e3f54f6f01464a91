//! The two cross-cutting anomaly modes and the breakage command.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::events::Event;
use crate::rail::Rail;
use crate::registry::CarriageRegistry;

/// Tracks mining mode and the fallen-man rail block, and mediates the
/// commands that flip them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeController {
    mining: bool,
    man_on_rail: Option<Rail>,
}

impl ModeController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether arriving carriages are retired at the depot instead of
    /// wrapping.
    #[must_use]
    pub const fn mining(&self) -> bool {
        self.mining
    }

    /// The rail currently blocked by a fallen man, if any.
    #[must_use]
    pub const fn man_on_rail(&self) -> Option<Rail> {
        self.man_on_rail
    }

    /// Whether movement on `rail` is frozen this tick.
    #[must_use]
    pub fn blocked(&self, rail: Rail) -> bool {
        self.man_on_rail == Some(rail)
    }

    /// Flip mining mode.
    pub fn toggle_mining(&mut self) -> Event {
        self.mining = !self.mining;
        Event::MiningToggled {
            enabled: self.mining,
        }
    }

    /// Toggle the fallen-man block: drop a man on a pseudo-randomly chosen
    /// rail, or clear the one already down. Calling twice in succession
    /// restores the original state.
    pub fn drop_or_clear_fallen_man<R: Rng>(&mut self, rng: &mut R) -> Event {
        if self.man_on_rail.take().is_some() {
            return Event::ManCleared;
        }
        let rail = Rail::BOTH[rng.gen_range(0..Rail::BOTH.len())];
        self.man_on_rail = Some(rail);
        Event::ManFell { rail }
    }

    /// Explicit setter behind the toggle. Dropping a second man while one is
    /// already down on the other rail is rejected; there is no queueing of
    /// simultaneous falls.
    pub fn set_fallen_man(&mut self, target: Option<Rail>) -> Result<Option<Event>, SimError> {
        match (self.man_on_rail, target) {
            (Some(current), Some(requested)) if current != requested => {
                Err(SimError::InvalidCommand {
                    reason: format!("a man is already down on the {current} rail"),
                })
            }
            (Some(_), Some(_)) | (None, None) => Ok(None),
            (None, Some(rail)) => {
                self.man_on_rail = Some(rail);
                Ok(Some(Event::ManFell { rail }))
            }
            (Some(_), None) => {
                self.man_on_rail = None;
                Ok(Some(Event::ManCleared))
            }
        }
    }

    /// Break a random carriage, or fix all carriages when one is already
    /// broken. Returns `None` when there is nothing to break or fix.
    pub fn toggle_break<R: Rng>(
        &mut self,
        registry: &mut CarriageRegistry,
        rng: &mut R,
    ) -> Option<Event> {
        if registry.broken().is_some() {
            registry.clear_broken();
            return Some(Event::CarriagesFixed);
        }
        let ids: Vec<_> = registry.iter().map(|c| c.id).collect();
        if ids.is_empty() {
            return None;
        }
        let id = ids[rng.gen_range(0..ids.len())];
        for carriage in registry.iter_mut() {
            if carriage.id == id {
                carriage.is_broken = true;
            }
        }
        Some(Event::CarriageBroken { id })
    }
}
