//! Centralized layout and timing constants for the Metroline simulation.
//!
//! These values define the deterministic math for the core engine. Keeping
//! them together ensures the track geometry can only be adjusted via code
//! changes reviewed in version control, rather than through external assets.

/// Track coordinate of the right-hand depot wall.
pub const DEPOT_RIGHT: i32 = 150;
/// Track coordinate of the left-hand depot wall.
pub const DEPOT_LEFT: i32 = 1050;

/// Carriage body width in track units.
pub const CARRIAGE_WIDTH: i32 = 70;
/// Offset from a carriage's stored position to its body center.
pub const HALF_CARRIAGE: i32 = CARRIAGE_WIDTH / 2;

/// Nominal milliseconds between ticks. The engine holds no timer; this is
/// the cadence the external driver is expected to call `tick()` at.
pub const TICK_MS: u64 = 50;
/// Distance a moving carriage covers per tick.
pub const STEP: i32 = 5;

/// Number of stations between the depots.
pub const STATION_COUNT: usize = 5;
/// Gap between adjacent station centers (and between a depot wall and the
/// nearest station).
pub const ROAD_LENGTH: i32 = (DEPOT_LEFT - DEPOT_RIGHT) / (STATION_COUNT as i32 + 1);

/// Total dwell time at a station, in milliseconds.
pub const STATION_DWELL_MS: u64 = 2_000;
/// Dwell duration expressed in ticks.
pub const STATION_TICKS: u32 = (STATION_DWELL_MS / TICK_MS) as u32;

/// Minimum distance the newest carriage on a rail must have advanced from
/// the spawn endpoint before another carriage may enter behind it.
pub const NEW_CARRIAGE_INTERVAL: i32 = ROAD_LENGTH;

/// Center coordinate of the station at `index` (0-based, right to left).
#[must_use]
pub const fn station_position(index: usize) -> i32 {
    DEPOT_RIGHT + ROAD_LENGTH * (index as i32 + 1)
}

/// Whether a carriage center coordinate coincides with a station.
#[must_use]
pub const fn is_station(center: i32) -> bool {
    center > DEPOT_RIGHT && center < DEPOT_LEFT && (center - DEPOT_RIGHT) % ROAD_LENGTH == 0
}
