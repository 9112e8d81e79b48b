//! GPIO coil outputs
//!
//! Drives the four coil inputs of a driver board from four push-pull
//! GPIO lines. Each line can be active-high (default) or active-low, for
//! boards that sink current when the input is pulled down.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use unistep_core::config::PinConfig;
use unistep_core::traits::{Coil, CoilDriver, Level};

/// Four GPIO lines driving IN1..IN4
///
/// Pin writes are infallible on the targets this is used with; pins
/// whose writes can fail need an adapter that decides what a failed
/// write means for the motor.
pub struct GpioCoils<P> {
    pins: [P; 4],
    /// If true, coil ON = pin LOW
    inverted: [bool; 4],
}

impl<P: OutputPin<Error = Infallible>> GpioCoils<P> {
    /// Create coil outputs with active-high pins
    ///
    /// Pins are not written here; the controller releases or energizes
    /// the coils explicitly.
    pub fn new(pins: [P; 4]) -> Self {
        Self::with_inversion(pins, [false; 4])
    }

    /// Create coil outputs with per-pin inversion
    pub fn with_inversion(pins: [P; 4], inverted: [bool; 4]) -> Self {
        Self { pins, inverted }
    }

    /// Create coil outputs using the inversion flags of a pin config
    ///
    /// `pins` must be ordered like `config`, IN1 first.
    pub fn from_config(pins: [P; 4], config: &[PinConfig; 4]) -> Self {
        Self::with_inversion(pins, config.map(|pin| pin.inverted))
    }

    /// Check if the pin for `coil` is active-low
    pub fn is_inverted(&self, coil: Coil) -> bool {
        self.inverted[coil.index()]
    }

    /// Get access to the pins
    pub fn pins(&self) -> &[P; 4] {
        &self.pins
    }

    /// Release the pins
    pub fn release(self) -> [P; 4] {
        self.pins
    }
}

impl<P: OutputPin<Error = Infallible>> CoilDriver for GpioCoils<P> {
    fn set_coil(&mut self, coil: Coil, level: Level) {
        let i = coil.index();
        let pin = &mut self.pins[i];

        let result = if level.is_high() != self.inverted[i] {
            pin.set_high()
        } else {
            pin.set_low()
        };
        result.unwrap_or_else(|never| match never {});
    }
}
