//! Coil output drivers

pub mod gpio;

pub use gpio::GpioCoils;
