//! Error taxonomy for the simulation engine.
//!
//! User-driven toggles are total and never fail; errors surface only for
//! defensively rejected commands and for invariant violations, which are
//! fatal because they indicate a logic defect rather than bad input.
//! A spawn attempt on a full rail is a silent no-op, not an error.

use thiserror::Error;

use crate::carriage::CarriageId;
use crate::rail::Rail;

/// Structural invariants of the carriage set. Any violation halts the
/// simulation; the tick that produced it is rolled back, never committed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("carriages {first} and {second} are broken at the same time")]
    DoubleBreakage {
        first: CarriageId,
        second: CarriageId,
    },
    #[error("carriage {id} left the track at position {position}")]
    OutOfBounds { id: CarriageId, position: i32 },
    #[error("{rail} rail holds {count} carriages (limit {limit})")]
    OverCapacity {
        rail: Rail,
        count: usize,
        limit: usize,
    },
}

/// Top-level engine error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A command was rejected because it conflicts with current mode state.
    /// The toggle-style commands never produce this; it guards the explicit
    /// setter surface.
    #[error("invalid command: {reason}")]
    InvalidCommand { reason: String },
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}
