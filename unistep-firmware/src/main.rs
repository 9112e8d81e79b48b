//! Unistep - stepper driver firmware
//!
//! Drives one 28BYJ-48 through a ULN2003 board from an RP2040. The motor
//! is described by motor.toml, which is compiled into the image and
//! checked by build.rs.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{AnyPin, Level, Output};
use embassy_rp::Peri;
use {defmt_rtt as _, panic_probe as _};

use unistep_core::config::{parse_motor_config, MotorConfig, PinConfig};
use unistep_drivers::stepper::uln2003;

use crate::clock::EmbassyClock;
use crate::pins::PinBank;

mod channels;
mod clock;
mod pins;
mod tasks;

/// Embedded motor configuration (compiled into firmware)
/// Edit motor.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../motor.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Unistep firmware starting...");

    let p = embassy_rp::init(Default::default());
    let mut bank = PinBank::new(p);
    info!("Peripherals initialized");

    let mut config = load_config();

    let pins = match bank.take_coils(&config.coil_pins) {
        Ok(pins) => pins,
        Err(e) => {
            error!("Coil pins unavailable ({:?}), using default wiring", e);
            config = MotorConfig::default();
            unwrap!(bank.take_coils(&config.coil_pins))
        }
    };

    let outputs = coil_outputs(pins, &config.coil_pins);
    let steps_per_rev = config.steps_per_rev;
    let motor = unwrap!(uln2003(config, outputs, EmbassyClock));
    info!("Stepper initialized");

    spawner.spawn(tasks::stepper_task(motor)).unwrap();
    spawner.spawn(tasks::status_task()).unwrap();
    spawner.spawn(tasks::sweep_task(steps_per_rev)).unwrap();

    info!("All tasks spawned, firmware running");
}

/// Parse the embedded configuration, falling back to the default wiring
fn load_config() -> MotorConfig {
    match parse_motor_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Loaded config for '{}': {} steps/rev, {}us/step",
                config.name.as_str(),
                config.steps_per_rev,
                config.step_delay_us
            );
            config
        }
        Err(e) => {
            error!("Invalid motor.toml ({:?}), using defaults", e);
            MotorConfig::default()
        }
    }
}

/// Turn taken pins into outputs with the coils released
fn coil_outputs(pins: [Peri<'static, AnyPin>; 4], coils: &[PinConfig; 4]) -> [Output<'static>; 4] {
    let [in1, in2, in3, in4] = pins;

    // Released means logically low; active-low inputs idle high
    let idle = |coil: &PinConfig| if coil.inverted { Level::High } else { Level::Low };

    [
        Output::new(in1, idle(&coils[0])),
        Output::new(in2, idle(&coils[1])),
        Output::new(in3, idle(&coils[2])),
        Output::new(in4, idle(&coils[3])),
    ]
}
