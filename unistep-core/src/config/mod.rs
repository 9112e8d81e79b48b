//! Configuration types
//!
//! Board-agnostic motor configuration and the config file reader.

pub mod toml;
pub mod types;

pub use self::toml::{parse_motor_config, ParseError};
pub use types::*;
