//! Stepper driver boards

pub mod uln2003;

pub use uln2003::{uln2003, Uln2003};
