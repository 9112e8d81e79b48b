//! Config-driven pin allocation
//!
//! Coil pins come from motor.toml as GPIO numbers, so they are taken from
//! the peripherals by number at runtime.

use embassy_rp::gpio::AnyPin;
use embassy_rp::{Peri, Peripherals};
use unistep_core::config::PinConfig;

/// Number of user GPIOs on the RP2040
const BANK_SIZE: u8 = 30;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Pin already taken
    AlreadyTaken(u8),
}

/// Pin bank that holds all GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; BANK_SIZE as usize],
}

impl PinBank {
    /// Move every GPIO out of the peripherals
    pub fn new(p: Peripherals) -> Self {
        Self {
            pins: [
                Some(p.PIN_0.into()),
                Some(p.PIN_1.into()),
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                Some(p.PIN_5.into()),
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                Some(p.PIN_29.into()),
            ],
        }
    }

    /// Check if a pin is available
    pub fn is_available(&self, pin_num: u8) -> bool {
        pin_num < BANK_SIZE && self.pins[pin_num as usize].is_some()
    }

    /// Take the four coil pins, IN1 first
    ///
    /// Nothing is taken unless all four pins are valid, free and distinct.
    pub fn take_coils(
        &mut self,
        coils: &[PinConfig; 4],
    ) -> Result<[Peri<'static, AnyPin>; 4], PinError> {
        for (i, coil) in coils.iter().enumerate() {
            if coil.pin >= BANK_SIZE {
                return Err(PinError::InvalidPin(coil.pin));
            }
            let repeated = coils[..i].iter().any(|other| other.pin == coil.pin);
            if repeated || !self.is_available(coil.pin) {
                return Err(PinError::AlreadyTaken(coil.pin));
            }
        }

        match coils.map(|coil| self.pins[coil.pin as usize].take()) {
            [Some(in1), Some(in2), Some(in3), Some(in4)] => Ok([in1, in2, in3, in4]),
            _ => Err(PinError::AlreadyTaken(coils[0].pin)),
        }
    }
}
