//! Monotonic microsecond clock
//!
//! The clock is a free-running `u32` microsecond counter. It is allowed to
//! wrap around (about every 71 minutes); consumers only ever look at the
//! wrapping difference between two readings.

use core::cell::Cell;

/// Source of monotonic time in microseconds
pub trait Clock {
    /// Current counter value in microseconds
    ///
    /// The value wraps from `u32::MAX` back to 0.
    fn now_us(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_us(&self) -> u32 {
        (**self).now_us()
    }
}

/// Manually driven clock
///
/// Time only moves when told to. Intended for hosted simulation and tests,
/// where it is shared by reference with the controller:
///
/// ```
/// use unistep_core::traits::{Clock, ManualClock};
///
/// let clock = ManualClock::new(100);
/// clock.advance(900);
/// assert_eq!((&clock).now_us(), 1000);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now_us: Cell<u32>,
}

impl ManualClock {
    /// Create a clock starting at `start_us`
    pub const fn new(start_us: u32) -> Self {
        Self {
            now_us: Cell::new(start_us),
        }
    }

    /// Move time forward, wrapping at `u32::MAX`
    pub fn advance(&self, delta_us: u32) {
        self.now_us.set(self.now_us.get().wrapping_add(delta_us));
    }

    /// Jump to an absolute counter value
    pub fn set(&self, now_us: u32) {
        self.now_us.set(now_us);
    }
}

impl Clock for ManualClock {
    fn now_us(&self) -> u32 {
        self.now_us.get()
    }
}
