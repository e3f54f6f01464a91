#![forbid(unsafe_code)]
//! Metroline Simulation Engine
//!
//! Platform-agnostic core logic for the Metroline two-rail tram shuttle.
//! This crate owns the deterministic, tick-driven state machine - carriage
//! lifecycle, station dwell, depot wrap and retirement, and the two anomaly
//! modes (mining and the fallen-man rail block) - without UI or I/O
//! dependencies. Rendering, window integration and the append-only event
//! logger are external collaborators consuming the snapshots and events
//! this crate returns.
//!
//! The engine assumes single-writer, non-reentrant access: one driver calls
//! [`MetroSim::tick`] at a fixed cadence and applies commands between ticks.

pub mod carriage;
pub mod constants;
pub mod error;
pub mod events;
pub mod modes;
pub mod movement;
pub mod rail;
pub mod registry;
pub mod seed;
pub mod sim;

// Re-export commonly used types
pub use carriage::{Carriage, CarriageId};
pub use error::{InvariantViolation, SimError};
pub use events::{Event, EventLog, RetireReason, format_log_line};
pub use modes::ModeController;
pub use movement::{MovementCtx, advance};
pub use rail::Rail;
pub use registry::CarriageRegistry;
pub use seed::RngStreams;
pub use sim::{MetroSim, Snapshot, TickOutcome};
