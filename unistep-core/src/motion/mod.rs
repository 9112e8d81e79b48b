//! Motion control
//!
//! The non-blocking controller and the state it owns.

pub mod controller;
pub mod state;

pub use controller::MotionController;
pub use state::{shortest_delta, wrap_step, MotionError, MotionState, MotorState, Tick};
