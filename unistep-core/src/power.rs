//! Coil power management
//!
//! Owns the coil driver and is the only place that writes to it. Keeps
//! track of whether the windings are currently energized so callers can
//! tell a holding motor from a released one.

use crate::sequencer::{CoilPattern, Phase};
use crate::traits::CoilDriver;

/// Coil power manager
pub struct PowerManager<D> {
    driver: D,
    energized: bool,
}

impl<D: CoilDriver> PowerManager<D> {
    /// Wrap a coil driver
    ///
    /// No pins are written; the coils are assumed to be off.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            energized: false,
        }
    }

    /// Re-assert the coil levels of `phase` without advancing it
    ///
    /// Called before a move so the first step does not go to waste
    /// pulling a released rotor back into its phase.
    pub fn power_up(&mut self, phase: Phase) {
        self.apply(phase.pattern());
    }

    /// Write a full coil pattern
    pub fn apply(&mut self, pattern: CoilPattern) {
        self.driver.set_all(pattern.levels());
        self.energized = pattern.energized() > 0;
    }

    /// Pull every coil low
    pub fn deenergize(&mut self) {
        self.apply(CoilPattern::OFF);
    }

    /// Check if any coil is currently energized
    pub fn is_energized(&self) -> bool {
        self.energized
    }

    /// Get access to the underlying driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get mutable access to the underlying driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Release the driver
    pub fn into_inner(self) -> D {
        self.driver
    }
}
