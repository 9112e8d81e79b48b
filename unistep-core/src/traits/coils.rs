//! Coil output trait
//!
//! A unipolar stepper has four independently switched windings. The
//! driver only needs to set each one high or low; how that reaches the
//! motor (GPIO, shift register, I/O expander) is up to the implementation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the four motor windings (IN1..IN4 on a ULN2003 board)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Coil {
    /// First winding (IN1)
    One,
    /// Second winding (IN2)
    Two,
    /// Third winding (IN3)
    Three,
    /// Fourth winding (IN4)
    Four,
}

impl Coil {
    /// All coils in channel order
    pub const ALL: [Coil; 4] = [Coil::One, Coil::Two, Coil::Three, Coil::Four];

    /// Zero-based index (IN1 = 0)
    pub const fn index(self) -> usize {
        match self {
            Coil::One => 0,
            Coil::Two => 1,
            Coil::Three => 2,
            Coil::Four => 3,
        }
    }

    /// One-based channel number as printed on driver boards
    pub const fn channel(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// Output level for a coil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    /// Winding switched off
    #[default]
    Low,
    /// Winding energized
    High,
}

impl Level {
    /// Check if the level is high
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Trait for the four-channel coil output sink
///
/// Writes are infallible: the motion logic has no way to recover from a
/// failed pin write, so implementations over fallible buses must handle
/// their own errors.
pub trait CoilDriver {
    /// Drive a single coil to the given level
    fn set_coil(&mut self, coil: Coil, level: Level);

    /// Drive all four coils, IN1 first
    fn set_all(&mut self, levels: [Level; 4]) {
        for (coil, level) in Coil::ALL.into_iter().zip(levels) {
            self.set_coil(coil, level);
        }
    }
}

impl<D: CoilDriver + ?Sized> CoilDriver for &mut D {
    fn set_coil(&mut self, coil: Coil, level: Level) {
        (**self).set_coil(coil, level);
    }

    fn set_all(&mut self, levels: [Level; 4]) {
        (**self).set_all(levels);
    }
}
