//! Motion state and position arithmetic
//!
//! Position lives on a circular track of `steps_per_rev` half-steps. The
//! helpers here keep it in `[0, steps_per_rev)` and pick the short way
//! round when heading for an absolute target.

use crate::sequencer::{Direction, Phase};

/// Motor states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorState {
    /// No steps pending
    Idle,
    /// Stepping clockwise
    MovingCw,
    /// Stepping counter-clockwise
    MovingCcw,
}

impl MotorState {
    /// State implied by a signed remaining step count
    pub fn from_steps_to_go(steps_to_go: i32) -> Self {
        match Direction::from_steps(steps_to_go) {
            None => MotorState::Idle,
            Some(Direction::Clockwise) => MotorState::MovingCw,
            Some(Direction::CounterClockwise) => MotorState::MovingCcw,
        }
    }

    /// Check if a move is in progress
    pub fn is_moving(&self) -> bool {
        !matches!(self, MotorState::Idle)
    }
}

/// Result of one poll of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Nothing to do; no steps were pending when polled
    Idle,
    /// A move is pending but the next step is not due yet
    Waiting,
    /// One half-step was applied
    Stepped,
}

impl Tick {
    /// Check if the controller was idle when polled
    pub fn is_idle(&self) -> bool {
        matches!(self, Tick::Idle)
    }
}

/// Motion errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// Absolute target is not in `[0, steps_per_rev)`
    TargetOutOfRange {
        /// Requested position
        target: u32,
        /// Configured track size
        steps_per_rev: u32,
    },
}

/// Mutable motion state owned by one controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionState {
    /// Position in the half-step cycle
    pub phase: Phase,
    /// Absolute position in `[0, steps_per_rev)`
    pub current_step: u32,
    /// Remaining half-steps, positive clockwise
    pub steps_to_go: i32,
    /// Clock reading of the last applied half-step
    pub last_step_us: u32,
}

impl MotionState {
    /// State at power-on: phase 0, position 0, idle
    pub const fn new() -> Self {
        Self {
            phase: Phase::ZERO,
            current_step: 0,
            steps_to_go: 0,
            last_step_us: 0,
        }
    }

    /// Account for one applied half-step
    ///
    /// Moves the position one step round the track and the remaining
    /// count one step towards zero.
    pub fn record_step(&mut self, direction: Direction, steps_per_rev: u32) {
        self.current_step = wrap_step(self.current_step, direction, steps_per_rev);
        match direction {
            Direction::Clockwise => self.steps_to_go -= 1,
            Direction::CounterClockwise => self.steps_to_go += 1,
        }
    }
}

/// Neighbouring position on a circular track of `steps_per_rev`
pub fn wrap_step(position: u32, direction: Direction, steps_per_rev: u32) -> u32 {
    match direction {
        Direction::Clockwise => {
            if position + 1 >= steps_per_rev {
                0
            } else {
                position + 1
            }
        }
        Direction::CounterClockwise => {
            if position == 0 {
                steps_per_rev - 1
            } else {
                position - 1
            }
        }
    }
}

/// Signed step count for the shortest way from `from` to `to`
///
/// Both positions must be in `[0, steps_per_rev)`. When both ways are
/// equally long (exactly half a revolution) the clockwise, positive
/// count is returned.
pub fn shortest_delta(from: u32, to: u32, steps_per_rev: u32) -> i32 {
    let rev = steps_per_rev as i64;
    let mut delta = to as i64 - from as i64;

    if 2 * delta > rev {
        delta -= rev;
    } else if 2 * delta <= -rev {
        delta += rev;
    }

    delta as i32
}
