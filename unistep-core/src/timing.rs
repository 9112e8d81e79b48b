//! Step timing gate
//!
//! Decides whether enough time has passed since the last half-step. All
//! arithmetic is done on the wrapping difference of two `u32` readings, so
//! a counter overflow between two steps is invisible.

/// Elapsed microseconds between two clock readings
#[inline]
pub fn elapsed(now_us: u32, since_us: u32) -> u32 {
    now_us.wrapping_sub(since_us)
}

/// Check if a step is due
#[inline]
pub fn is_due(now_us: u32, last_step_us: u32, delay_us: u32) -> bool {
    elapsed(now_us, last_step_us) >= delay_us
}

/// Fixed inter-step delay gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingGate {
    delay_us: u32,
}

impl TimingGate {
    /// Create a gate with the given delay between half-steps
    pub const fn new(delay_us: u32) -> Self {
        Self { delay_us }
    }

    /// Configured delay in microseconds
    pub const fn delay_us(&self) -> u32 {
        self.delay_us
    }

    /// Check if a step is due at `now_us`
    pub fn is_due(&self, now_us: u32, last_step_us: u32) -> bool {
        is_due(now_us, last_step_us, self.delay_us)
    }

    /// Microseconds until the next step is due, 0 if it already is
    pub fn remaining(&self, now_us: u32, last_step_us: u32) -> u32 {
        self.delay_us.saturating_sub(elapsed(now_us, last_step_us))
    }
}
