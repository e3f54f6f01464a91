//! Human-describable occurrences emitted by ticks and commands.
//!
//! The engine owns the event data; the excluded logger collaborator renders
//! one line per event, timestamped on its side. [`format_log_line`] keeps
//! the on-disk line format reproducible end to end.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::carriage::CarriageId;
use crate::rail::Rail;

/// Inline event buffer; a tick rarely produces more than a handful.
pub type EventLog = SmallVec<[Event; 4]>;

/// Why a carriage was removed at the depot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RetireReason {
    /// Broken carriage reached its depot endpoint.
    BrokenRetired,
    /// Removed by the mining sweep at the depot.
    MinedRetired,
}

impl RetireReason {
    const fn phrase(self) -> &'static str {
        match self {
            Self::BrokenRetired => "after breaking down",
            Self::MinedRetired => "for mining service",
        }
    }
}

/// State change worth one log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    CarriageStarted { id: CarriageId, rail: Rail },
    CarriageRetired { id: CarriageId, reason: RetireReason },
    CarriagesRetired { ids: Vec<CarriageId>, reason: RetireReason },
    MiningToggled { enabled: bool },
    ManFell { rail: Rail },
    ManCleared,
    CarriageBroken { id: CarriageId },
    CarriagesFixed,
}

impl Event {
    /// Log line body for this event.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::CarriageStarted { id, rail } => {
                format!("Carriage with number {id} started on the {rail} rail")
            }
            Self::CarriageRetired { id, reason } => {
                format!("Carriage with number {id} was retired {}", reason.phrase())
            }
            Self::CarriagesRetired { ids, reason } => {
                let numbers = ids
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Carriages with numbers {numbers} were retired {}", reason.phrase())
            }
            Self::MiningToggled { enabled: true } => "Mining mode enabled".to_string(),
            Self::MiningToggled { enabled: false } => "Mining mode disabled".to_string(),
            Self::ManFell { rail } => format!("Men fell on {rail} rail"),
            Self::ManCleared => "The fallen man was cleared from the rails".to_string(),
            Self::CarriageBroken { id } => {
                format!("Carriage with number {id} was broken")
            }
            Self::CarriagesFixed => "All carriages were fixed".to_string(),
        }
    }
}

/// Render one log line exactly as the append-only logger writes it:
/// timestamp, a tab, then the message with interior newlines collapsed.
#[must_use]
pub fn format_log_line(timestamp: &str, message: &str) -> String {
    let collapsed = message.replace('\n', "; ");
    format!("{timestamp}\t{collapsed}")
}
