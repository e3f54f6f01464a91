//! Mining, breakage and fallen-man scenarios across the engine boundary.

use metroline_sim::constants::STEP;
use metroline_sim::{
    Carriage, CarriageId, CarriageRegistry, Event, MetroSim, ModeController, Rail,
    RetireReason, RngStreams,
};

fn staged_sim(carriages: Vec<Carriage>) -> MetroSim {
    let mut registry = CarriageRegistry::new();
    for carriage in carriages {
        registry.insert(carriage);
    }
    MetroSim::from_parts(registry, ModeController::new(), RngStreams::from_user_seed(0))
        .expect("staged registry is consistent")
}

fn parked_at_depot(id: u32, rail: Rail) -> Carriage {
    let mut carriage = Carriage::spawn_at(CarriageId(id), rail);
    carriage.position = rail.depot_position();
    carriage
}

#[test]
fn mining_sweeps_a_depot_resident_within_the_same_tick() {
    let mut sim = staged_sim(vec![
        parked_at_depot(1, Rail::First),
        Carriage::spawn_at(CarriageId(2), Rail::Second),
    ]);
    sim.toggle_mining();

    let outcome = sim.tick().expect("tick");
    assert_eq!(
        outcome.events.as_slice(),
        [Event::CarriageRetired {
            id: CarriageId(1),
            reason: RetireReason::MinedRetired,
        }]
    );
    let carriages = outcome.snapshot.carriages;
    assert_eq!(carriages.len(), 1);
    assert_eq!(carriages[0].id, CarriageId(2));
    // The survivor on the other rail is unaffected and keeps moving.
    assert_eq!(
        carriages[0].position,
        Rail::Second.spawn_position() - STEP
    );
}

#[test]
fn mining_retires_several_depot_residents_in_one_batch() {
    let mut sim = staged_sim(vec![
        parked_at_depot(1, Rail::First),
        parked_at_depot(2, Rail::Second),
    ]);
    sim.toggle_mining();

    let outcome = sim.tick().expect("tick");
    assert_eq!(
        outcome.events.as_slice(),
        [Event::CarriagesRetired {
            ids: vec![CarriageId(1), CarriageId(2)],
            reason: RetireReason::MinedRetired,
        }]
    );
    assert!(outcome.snapshot.carriages.is_empty());

    // Mining on: the empty track stays empty.
    let outcome = sim.tick().expect("tick");
    assert!(outcome.snapshot.carriages.is_empty());
    assert!(outcome.events.is_empty());

    // Mining off again: the canonical pair comes back.
    sim.toggle_mining();
    let outcome = sim.tick().expect("tick");
    let ids: Vec<_> = outcome.snapshot.carriages.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![CarriageId(1), CarriageId(2)]);
}

#[test]
fn broken_retirement_takes_precedence_over_the_mining_sweep() {
    let mut broken = parked_at_depot(4, Rail::First);
    broken.is_broken = true;
    let mut sim = staged_sim(vec![broken]);
    sim.toggle_mining();

    let outcome = sim.tick().expect("tick");
    assert_eq!(
        outcome.events.as_slice(),
        [Event::CarriageRetired {
            id: CarriageId(4),
            reason: RetireReason::BrokenRetired,
        }]
    );
}

#[test]
fn a_broken_carriage_runs_to_the_depot_and_is_not_replaced_by_id() {
    let mut nearly_home = Carriage::spawn_at(CarriageId(1), Rail::First);
    nearly_home.position = Rail::First.depot_position() - STEP;
    nearly_home.is_broken = true;
    let mut sim = staged_sim(vec![nearly_home]);

    // Tick one: the carriage steps onto the depot endpoint; the vacated
    // spawn spacing also admits a fresh carriage behind it.
    let outcome = sim.tick().expect("tick");
    let one = outcome
        .snapshot
        .carriages
        .iter()
        .find(|c| c.id == CarriageId(1))
        .expect("still on track");
    assert!(one.at_depot());
    assert!(outcome.events.iter().any(|e| matches!(
        e,
        Event::CarriageStarted { id: CarriageId(2), rail: Rail::First }
    )));

    // Tick two: retirement, and nothing backfills id 1.
    let outcome = sim.tick().expect("tick");
    assert!(outcome.events.contains(&Event::CarriageRetired {
        id: CarriageId(1),
        reason: RetireReason::BrokenRetired,
    }));
    assert!(
        outcome
            .snapshot
            .carriages
            .iter()
            .all(|c| c.id != CarriageId(1))
    );

    // Any later spawn continues above the highest live id.
    for _ in 0..200 {
        let outcome = sim.tick().expect("tick");
        for event in &outcome.events {
            if let Event::CarriageStarted { id, .. } = event {
                assert!(*id > CarriageId(2));
            }
        }
    }
}

#[test]
fn a_fallen_man_freezes_exactly_one_rail() {
    let mut sim = MetroSim::new(21);
    sim.tick().expect("tick");
    sim.tick().expect("tick");

    let event = sim.drop_or_clear_fallen_man();
    let Event::ManFell { rail: blocked } = event else {
        panic!("expected a man to fall, got {event:?}");
    };

    let before = sim.snapshot();
    for _ in 0..10 {
        let outcome = sim.tick().expect("tick");
        for carriage in &outcome.snapshot.carriages {
            let prior = before
                .carriages
                .iter()
                .find(|c| c.id == carriage.id)
                .expect("fleet membership is stable here");
            if carriage.rail == blocked {
                assert_eq!(carriage.position, prior.position);
                assert_eq!(carriage.dwell_ticks, prior.dwell_ticks);
            }
        }
    }
    // The other rail kept advancing the whole time.
    let after = sim.snapshot();
    for carriage in &after.carriages {
        if carriage.rail != blocked {
            let prior = before
                .carriages
                .iter()
                .find(|c| c.id == carriage.id)
                .expect("fleet membership is stable here");
            assert_ne!(carriage.position, prior.position);
        }
    }

    // Clearing the man releases the rail on the next tick.
    assert_eq!(sim.drop_or_clear_fallen_man(), Event::ManCleared);
    let released = sim.tick().expect("tick");
    for carriage in &released.snapshot.carriages {
        if carriage.rail == blocked {
            let prior = after
                .carriages
                .iter()
                .find(|c| c.id == carriage.id)
                .expect("fleet membership is stable here");
            assert_ne!(carriage.position, prior.position);
        }
    }
}

#[test]
fn drop_then_clear_returns_mode_state_to_its_origin() {
    let mut sim = MetroSim::new(2);
    assert_eq!(sim.snapshot().man_on_rail, None);
    sim.drop_or_clear_fallen_man();
    assert!(sim.snapshot().man_on_rail.is_some());
    sim.drop_or_clear_fallen_man();
    assert_eq!(sim.snapshot().man_on_rail, None);
}

#[test]
fn breakage_marks_at_most_one_carriage_across_command_spam() {
    let mut sim = MetroSim::new(77);
    sim.tick().expect("tick");
    for _ in 0..25 {
        sim.toggle_break();
        let broken = sim
            .snapshot()
            .carriages
            .iter()
            .filter(|c| c.is_broken)
            .count();
        assert!(broken <= 1);
        sim.tick().expect("tick");
    }
}
