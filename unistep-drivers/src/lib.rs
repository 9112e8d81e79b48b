//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in unistep-core on top of `embedded-hal` pins:
//!
//! - Coil outputs (four GPIO lines, optionally active-low)
//! - ULN2003 stepper boards (28BYJ-48 and similar)

#![no_std]
#![deny(unsafe_code)]

pub mod coils;
pub mod stepper;
