//! Property tests for sequencing and position arithmetic

use proptest::prelude::*;
use unistep_core::config::MotorConfig;
use unistep_core::motion::{shortest_delta, MotionController, Tick};
use unistep_core::sequencer::{Direction, Phase, PHASE_COUNT};
use unistep_core::traits::{Coil, CoilDriver, Level, ManualClock};

/// Keeps the last level written to each coil
#[derive(Default)]
struct Latch {
    levels: [Level; 4],
}

impl CoilDriver for Latch {
    fn set_coil(&mut self, coil: Coil, level: Level) {
        self.levels[coil.index()] = level;
    }
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Clockwise), Just(Direction::CounterClockwise)]
}

fn track() -> impl Strategy<Value = (u32, u32, u32)> {
    (1u32..=100_000).prop_flat_map(|rev| (Just(rev), 0..rev, 0..rev))
}

proptest! {
    #[test]
    fn opposite_directions_cancel(index in 0..PHASE_COUNT, dir in direction()) {
        let phase = Phase::new(index).unwrap();
        prop_assert_eq!(phase.next(dir).next(dir.opposite()), phase);
    }

    #[test]
    fn one_coil_changes_per_step(index in 0..PHASE_COUNT, dir in direction()) {
        let phase = Phase::new(index).unwrap();
        let next = phase.next(dir);
        prop_assert_eq!(phase.pattern().changed_coils(&next.pattern()), 1);
    }

    #[test]
    fn shortest_delta_is_short_and_lands((rev, from, to) in track()) {
        let delta = shortest_delta(from, to, rev) as i64;

        prop_assert!(2 * delta.abs() <= rev as i64);
        prop_assert_eq!((from as i64 + delta).rem_euclid(rev as i64), to as i64);
    }

    #[test]
    fn position_stays_on_track(
        rev in 1u32..64,
        moves in prop::collection::vec(-100i32..100, 1..6),
    ) {
        let clock = ManualClock::new(0);
        let config = MotorConfig { steps_per_rev: rev, ..Default::default() };
        let mut motor = MotionController::new(config, Latch::default(), &clock).unwrap();
        let mut expected: i64 = 0;

        for steps in moves {
            motor.move_by(steps);
            expected += steps as i64;
            loop {
                clock.advance(1_000);
                let tick = motor.tick();
                prop_assert!(motor.current_position() < rev);
                if tick == Tick::Idle {
                    break;
                }
            }
        }

        prop_assert_eq!(motor.current_position() as i64, expected.rem_euclid(rev as i64));
        prop_assert_eq!(motor.phase().index() as i64, (-expected).rem_euclid(8));
    }

    #[test]
    fn every_write_matches_the_phase(steps in -40i32..40) {
        let clock = ManualClock::new(0);
        let mut motor = MotionController::new(MotorConfig::default(), Latch::default(), &clock).unwrap();

        motor.move_by(steps);
        let mut remaining = steps.unsigned_abs();
        while remaining > 1 {
            clock.advance(900);
            prop_assert_eq!(motor.tick(), Tick::Stepped);
            prop_assert_eq!(motor.coils().levels, motor.phase().pattern().levels());
            remaining -= 1;
        }
    }
}
