//! Pure single-carriage, single-tick movement transition.

use crate::carriage::Carriage;
use crate::constants::{STATION_TICKS, STEP, is_station};

/// Per-rail conditions the movement model needs beyond the carriage itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementCtx {
    /// A person has fallen on this carriage's rail; movement is frozen.
    pub blocked: bool,
    /// Mining mode keeps doors shut even while dwelling.
    pub mining: bool,
}

/// Advance one carriage by one tick.
///
/// Carriages due for retirement were already removed by the orchestrator,
/// so a carriage standing at the depot endpoint here always takes the wrap
/// back to its spawn endpoint.
#[must_use]
pub fn advance(carriage: &Carriage, ctx: MovementCtx) -> Carriage {
    if ctx.blocked {
        return carriage.clone();
    }

    let mut next = carriage.clone();
    if carriage.at_depot() {
        next.position = carriage.rail.spawn_position();
        next.dwell_ticks = 0;
        next.door_open = false;
        return next;
    }

    // Dwell is forced over once the full duration has elapsed; until then a
    // carriage counts as at-station while mid-dwell or when its center
    // lands on a station coordinate.
    let at_station = if carriage.dwell_ticks >= STATION_TICKS {
        false
    } else {
        carriage.dwell_ticks > 0 || is_station(carriage.center())
    };

    if at_station {
        next.dwell_ticks = carriage.dwell_ticks + 1;
        next.door_open = !carriage.is_broken && !ctx.mining;
    } else {
        next.dwell_ticks = 0;
        next.door_open = false;
        next.position = carriage.position + carriage.rail.direction() * STEP;
    }
    next
}
