//! Half-step sequencing
//!
//! A half-step cycle has eight phases. Each phase energizes one or two
//! adjacent windings, and moving to a neighbouring phase switches exactly
//! one coil. Clockwise rotation walks the table downwards, counter-clockwise
//! walks it upwards.
//!
//! | phase | IN1 | IN2 | IN3 | IN4 |
//! |-------|-----|-----|-----|-----|
//! | 0     | H   | L   | L   | H   |
//! | 1     | L   | L   | L   | H   |
//! | 2     | L   | L   | H   | H   |
//! | 3     | L   | L   | H   | L   |
//! | 4     | L   | H   | H   | L   |
//! | 5     | L   | H   | L   | L   |
//! | 6     | H   | H   | L   | L   |
//! | 7     | H   | L   | L   | L   |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::Level;

/// Number of phases in one half-step cycle
pub const PHASE_COUNT: u8 = 8;

const H: Level = Level::High;
const L: Level = Level::Low;

/// Coil levels for every phase, indexed by phase
const HALF_STEP_TABLE: [CoilPattern; PHASE_COUNT as usize] = [
    CoilPattern([H, L, L, H]),
    CoilPattern([L, L, L, H]),
    CoilPattern([L, L, H, H]),
    CoilPattern([L, L, H, L]),
    CoilPattern([L, H, H, L]),
    CoilPattern([L, H, L, L]),
    CoilPattern([H, H, L, L]),
    CoilPattern([H, L, L, L]),
];

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Clockwise rotation (position counts up)
    Clockwise,
    /// Counter-clockwise rotation (position counts down)
    CounterClockwise,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Direction implied by a signed step count, `None` for zero
    pub fn from_steps(steps: i32) -> Option<Self> {
        match steps {
            0 => None,
            s if s > 0 => Some(Direction::Clockwise),
            _ => Some(Direction::CounterClockwise),
        }
    }
}

/// Levels of the four coils, IN1 first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoilPattern(pub [Level; 4]);

impl CoilPattern {
    /// All coils off
    pub const OFF: CoilPattern = CoilPattern([L, L, L, L]);

    /// Levels as an array, IN1 first
    pub const fn levels(self) -> [Level; 4] {
        self.0
    }

    /// Number of coils that differ between two patterns
    pub fn changed_coils(&self, other: &CoilPattern) -> usize {
        self.0
            .iter()
            .zip(other.0.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Number of energized coils
    pub fn energized(&self) -> usize {
        self.0.iter().filter(|level| level.is_high()).count()
    }
}

/// Position within the half-step cycle, always in `0..8`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Phase(u8);

impl Phase {
    /// Power-on phase
    pub const ZERO: Phase = Phase(0);

    /// Create a phase, `None` if `index >= 8`
    pub const fn new(index: u8) -> Option<Self> {
        if index < PHASE_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Phase index in `0..8`
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Coil levels for this phase
    pub const fn pattern(self) -> CoilPattern {
        HALF_STEP_TABLE[self.0 as usize]
    }

    /// Neighbouring phase in the given direction
    pub const fn next(self, direction: Direction) -> Self {
        let index = match direction {
            Direction::Clockwise => (self.0 + PHASE_COUNT - 1) % PHASE_COUNT,
            Direction::CounterClockwise => (self.0 + 1) % PHASE_COUNT,
        };
        Self(index)
    }
}

/// Advance one half-step
///
/// Returns the new phase together with the coil levels to apply for it.
pub fn advance(phase: Phase, direction: Direction) -> (Phase, CoilPattern) {
    let next = phase.next(direction);
    (next, next.pattern())
}
