//! Board-agnostic core logic for unipolar stepper motors
//!
//! This crate contains everything needed to drive a 4-coil unipolar
//! stepper (28BYJ-48 through a ULN2003 or similar) without depending on
//! a specific chip:
//!
//! - Capability traits for the coil outputs and the monotonic clock
//! - Half-step sequencing (phase table and direction rules)
//! - Coil power management (power up, de-energize)
//! - Step timing gate with wraparound-safe arithmetic
//! - The non-blocking motion controller
//! - Configuration types and a small config file parser
//!
//! # Usage
//!
//! ```
//! use unistep_core::config::MotorConfig;
//! use unistep_core::motion::{MotionController, Tick};
//! use unistep_core::traits::{Coil, CoilDriver, Level, ManualClock};
//!
//! struct Pins;
//! impl CoilDriver for Pins {
//!     fn set_coil(&mut self, _coil: Coil, _level: Level) {}
//! }
//!
//! let clock = ManualClock::new(0);
//! let mut motor = MotionController::new(MotorConfig::default(), Pins, &clock).unwrap();
//!
//! motor.move_to(1024).unwrap();
//! while motor.tick() != Tick::Idle {
//!     clock.advance(900);
//! }
//! assert_eq!(motor.current_position(), 1024);
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod motion;
pub mod power;
pub mod sequencer;
pub mod timing;
pub mod traits;
