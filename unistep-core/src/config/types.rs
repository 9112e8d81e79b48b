//! Motor configuration types
//!
//! A [`MotorConfig`] is built once at startup and never changes. It is
//! checked by [`MotorConfig::validate`] before a controller is created,
//! so a bad config fails at boot instead of producing odd motion later.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum length of a motor name
pub const MAX_LABEL_LEN: usize = 16;

/// Half-steps per output shaft revolution of a 28BYJ-48 (64 * 64)
pub const DEFAULT_STEPS_PER_REV: u32 = 4096;

/// Delay between half-steps that a 28BYJ-48 follows reliably
pub const DEFAULT_STEP_DELAY_US: u32 = 900;

/// Default IN1..IN4 wiring
pub const DEFAULT_COIL_PINS: [u8; 4] = [5, 4, 3, 2];

/// Largest supported steps per revolution
///
/// Positions and step deltas are carried as `i32`.
pub const MAX_STEPS_PER_REV: u32 = i32::MAX as u32;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Steps per revolution must be at least 1
    ZeroStepsPerRev,
    /// Steps per revolution does not fit the signed position range
    StepsPerRevTooLarge,
    /// The same GPIO is assigned to two coils
    DuplicatePin(u8),
}

/// Stepper motor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotorConfig {
    /// Motor name used in log output
    pub name: String<MAX_LABEL_LEN>,
    /// Coil pins, IN1 first
    pub coil_pins: [PinConfig; 4],
    /// Half-steps per full revolution of the output shaft
    pub steps_per_rev: u32,
    /// Minimum delay between two half-steps in microseconds
    pub step_delay_us: u32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        let mut name = String::new();
        // Fits MAX_LABEL_LEN
        let _ = name.push_str("stepper");
        Self {
            name,
            coil_pins: DEFAULT_COIL_PINS.map(PinConfig::new),
            steps_per_rev: DEFAULT_STEPS_PER_REV,
            step_delay_us: DEFAULT_STEP_DELAY_US,
        }
    }
}

impl MotorConfig {
    /// Create a validated configuration
    pub fn new(
        coil_pins: [PinConfig; 4],
        steps_per_rev: u32,
        step_delay_us: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            coil_pins,
            steps_per_rev,
            step_delay_us,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the motor name, truncated to [`MAX_LABEL_LEN`] bytes
    pub fn with_name(mut self, name: &str) -> Self {
        self.name.clear();
        for c in name.chars() {
            if self.name.push(c).is_err() {
                break;
            }
        }
        self
    }

    /// Check the configuration for values the controller cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps_per_rev == 0 {
            return Err(ConfigError::ZeroStepsPerRev);
        }
        if self.steps_per_rev > MAX_STEPS_PER_REV {
            return Err(ConfigError::StepsPerRevTooLarge);
        }

        for (i, a) in self.coil_pins.iter().enumerate() {
            if self.coil_pins[i + 1..].iter().any(|b| b.pin == a.pin) {
                return Err(ConfigError::DuplicatePin(a.pin));
            }
        }

        Ok(())
    }

    /// Time for one full revolution at the configured step delay
    pub fn revolution_time_us(&self) -> u64 {
        self.steps_per_rev as u64 * self.step_delay_us as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_config() {
        let pin = PinConfig::new(10);
        assert_eq!(pin.pin, 10);
        assert!(!pin.inverted);

        let inverted = PinConfig::inverted(12);
        assert!(inverted.inverted);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = MotorConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.name.as_str(), "stepper");
        assert_eq!(config.steps_per_rev, 4096);
        assert_eq!(config.step_delay_us, 900);
        assert_eq!(config.coil_pins[0], PinConfig::new(5));
        assert_eq!(config.coil_pins[3], PinConfig::new(2));
    }

    #[test]
    fn test_zero_steps_rejected() {
        let result = MotorConfig::new(DEFAULT_COIL_PINS.map(PinConfig::new), 0, 900);
        assert_eq!(result, Err(ConfigError::ZeroStepsPerRev));
    }

    #[test]
    fn test_huge_steps_rejected() {
        let result = MotorConfig::new(
            DEFAULT_COIL_PINS.map(PinConfig::new),
            MAX_STEPS_PER_REV + 1,
            900,
        );
        assert_eq!(result, Err(ConfigError::StepsPerRevTooLarge));

        let result = MotorConfig::new(
            DEFAULT_COIL_PINS.map(PinConfig::new),
            MAX_STEPS_PER_REV,
            900,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_duplicate_pin_rejected() {
        let pins = [
            PinConfig::new(5),
            PinConfig::new(4),
            PinConfig::inverted(5),
            PinConfig::new(2),
        ];
        let result = MotorConfig::new(pins, 4096, 900);
        assert_eq!(result, Err(ConfigError::DuplicatePin(5)));
    }

    #[test]
    fn test_zero_delay_allowed() {
        let config = MotorConfig::new(DEFAULT_COIL_PINS.map(PinConfig::new), 2048, 0);
        assert!(config.is_ok());
    }

    #[test]
    fn test_with_name_truncates() {
        let config = MotorConfig::default().with_name("a-very-long-motor-name");
        assert_eq!(config.name.len(), MAX_LABEL_LEN);
        assert_eq!(config.name.as_str(), "a-very-long-moto");

        let config = MotorConfig::default().with_name("vent");
        assert_eq!(config.name.as_str(), "vent");
    }

    #[test]
    fn test_revolution_time() {
        let config = MotorConfig::default();
        assert_eq!(config.revolution_time_us(), 4096 * 900);
    }
}
