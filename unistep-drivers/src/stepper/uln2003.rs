//! ULN2003 driver board
//!
//! The ULN2003 is a Darlington array: each IN line switches one winding
//! of a unipolar motor such as the 28BYJ-48. There is no step/dir
//! interface, so the half-step sequence is generated in software and
//! written to the four inputs directly.
//!
//! # Usage
//!
//! ```ignore
//! let pins = [in1, in2, in3, in4];
//! let mut motor = uln2003(config, pins, clock)?;
//! motor.move_to(2048)?;
//!
//! loop {
//!     motor.tick();
//!     // other work, well under one step delay
//! }
//! ```

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;
use unistep_core::config::{ConfigError, MotorConfig};
use unistep_core::motion::MotionController;
use unistep_core::traits::Clock;

use crate::coils::GpioCoils;

/// Motion controller driving a ULN2003 board from GPIO pins
pub type Uln2003<P, C> = MotionController<GpioCoils<P>, C>;

/// Create a controller for a ULN2003 board
///
/// `pins` are IN1..IN4 in the order of `config.coil_pins`; the inversion
/// flags of the config are applied to them.
pub fn uln2003<P, C>(
    config: MotorConfig,
    pins: [P; 4],
    clock: C,
) -> Result<Uln2003<P, C>, ConfigError>
where
    P: OutputPin<Error = Infallible>,
    C: Clock,
{
    let coils = GpioCoils::from_config(pins, &config.coil_pins);

    #[cfg(feature = "defmt")]
    defmt::info!(
        "{}: ULN2003 on gpio {} {} {} {}, {} steps/rev, {}us/step",
        config.name.as_str(),
        config.coil_pins[0].pin,
        config.coil_pins[1].pin,
        config.coil_pins[2].pin,
        config.coil_pins[3].pin,
        config.steps_per_rev,
        config.step_delay_us
    );

    MotionController::new(config, coils, clock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;
    use unistep_core::config::PinConfig;
    use unistep_core::motion::Tick;
    use unistep_core::traits::ManualClock;

    #[derive(Default)]
    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    fn pin_levels(motor: &Uln2003<MockPin, &ManualClock>) -> [bool; 4] {
        [0, 1, 2, 3].map(|i| motor.coils().pins()[i].high)
    }

    #[test]
    fn test_half_turn_on_pins() {
        let clock = ManualClock::new(0);
        let config = MotorConfig {
            steps_per_rev: 8,
            ..Default::default()
        };
        let mut motor = uln2003(config, Default::default(), &clock).unwrap();

        motor.move_to(4).unwrap();
        assert_eq!(pin_levels(&motor), [true, false, false, true]);

        clock.advance(900);
        assert_eq!(motor.tick(), Tick::Stepped);
        assert_eq!(pin_levels(&motor), [true, false, false, false]);

        while motor.tick() != Tick::Idle {
            clock.advance(900);
        }
        assert_eq!(motor.current_position(), 4);
        assert_eq!(pin_levels(&motor), [false; 4]);
    }

    #[test]
    fn test_inverted_pins_idle_high() {
        let clock = ManualClock::new(0);
        let config = MotorConfig {
            coil_pins: [
                PinConfig::inverted(5),
                PinConfig::inverted(4),
                PinConfig::inverted(3),
                PinConfig::inverted(2),
            ],
            ..Default::default()
        };
        let mut motor = uln2003(config, Default::default(), &clock).unwrap();

        motor.stop();
        assert_eq!(pin_levels(&motor), [true; 4]);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let clock = ManualClock::new(0);
        let config = MotorConfig {
            steps_per_rev: 0,
            ..Default::default()
        };
        let result = uln2003::<MockPin, _>(config, Default::default(), &clock);
        assert!(matches!(result, Err(ConfigError::ZeroStepsPerRev)));
    }
}
