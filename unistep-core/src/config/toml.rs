//! Minimal TOML reader for motor configuration
//!
//! Handles only the subset needed to describe one stepper. It does NOT
//! support the full TOML spec and needs no allocator.
//!
//! ```toml
//! [stepper.vent]
//! in1_pin = "gpio5"
//! in2_pin = "gpio4"
//! in3_pin = "gpio3"
//! in4_pin = "!gpio2"   # active low
//! steps_per_rev = 4096
//! step_delay_us = 900
//! ```
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - `[stepper]`, `[stepper.name]` and `[stepper name]` section headers
//! - Comments (# ...)
//!
//! Sections other than `stepper` are skipped so the same file can carry
//! settings for the surrounding application. Keys that are not given keep
//! the values from [`MotorConfig::default`].

use heapless::String as HString;

use super::types::{ConfigError, MotorConfig, PinConfig, MAX_LABEL_LEN};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed section header
    InvalidSection,
    /// More than one stepper section
    DuplicateSection,
    /// No stepper section in the input
    MissingSection,
    /// Line is not `key = value`, or the value has the wrong type
    InvalidValue,
    /// Key not known in the stepper section
    UnknownKey,
    /// Invalid pin string
    InvalidPin,
    /// Values parsed but the resulting config is unusable
    Config(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Config(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, PartialEq, Eq)]
enum Section {
    Root,
    Stepper(Option<HString<MAX_LABEL_LEN>>),
    Other,
}

/// Parse configuration text into a validated [`MotorConfig`]
pub fn parse_motor_config(input: &str) -> Result<MotorConfig, ParseError> {
    let mut config: Option<MotorConfig> = None;
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = line
                .strip_suffix(']')
                .map(|l| &l[1..])
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;

            if let Section::Stepper(name) = &section {
                if config.is_some() {
                    return Err(ParseError::DuplicateSection);
                }
                let mut stepper = MotorConfig::default();
                if let Some(name) = name {
                    stepper.name = name.clone();
                }
                config = Some(stepper);
            }
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;

        match (&section, config.as_mut()) {
            (Section::Stepper(_), Some(stepper)) => apply_value(stepper, key, value)?,
            (Section::Root, _) => return Err(ParseError::InvalidValue),
            _ => {}
        }
    }

    let config = config.ok_or(ParseError::MissingSection)?;
    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();

    // Dotted sections (stepper.vent, radar.front)
    if let Some((section_type, name)) = header.split_once('.') {
        if name.is_empty() || name.contains('.') {
            return Err(ParseError::InvalidSection);
        }
        return match section_type {
            "stepper" => HString::try_from(name)
                .map(|name| Section::Stepper(Some(name)))
                .map_err(|_| ParseError::InvalidSection),
            _ => Ok(Section::Other),
        };
    }

    // "type name" format
    let mut parts = header.split_whitespace();
    let section_type = parts.next().ok_or(ParseError::InvalidSection)?;
    let name = parts.next();

    if parts.next().is_some() {
        return Err(ParseError::InvalidSection);
    }

    match section_type {
        "stepper" => {
            let name = name
                .map(HString::try_from)
                .transpose()
                .map_err(|_| ParseError::InvalidSection)?;
            Ok(Section::Stepper(name))
        }
        _ => Ok(Section::Other),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        // Make sure # is not inside a string
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse an integer value, allowing `_` digit separators
fn parse_u32(value: &str) -> Result<u32, ParseError> {
    let mut acc: u32 = 0;
    let mut digits = 0;
    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        acc = acc
            .checked_mul(10)
            .and_then(|a| a.checked_add(digit))
            .ok_or(ParseError::InvalidValue)?;
        digits += 1;
    }
    if digits == 0 {
        return Err(ParseError::InvalidValue);
    }
    Ok(acc)
}

/// Parse a pin string like "gpio5" or "!gpio2"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let value = parse_string(value);
    let (s, inverted) = match value.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (value, false),
    };

    let number = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    let pin: u8 = number.parse().map_err(|_| ParseError::InvalidPin)?;

    Ok(PinConfig { pin, inverted })
}

fn apply_value(config: &mut MotorConfig, key: &str, value: &str) -> Result<(), ParseError> {
    match key {
        "in1_pin" => config.coil_pins[0] = parse_pin(value)?,
        "in2_pin" => config.coil_pins[1] = parse_pin(value)?,
        "in3_pin" => config.coil_pins[2] = parse_pin(value)?,
        "in4_pin" => config.coil_pins[3] = parse_pin(value)?,
        "steps_per_rev" => config.steps_per_rev = parse_u32(value)?,
        "step_delay_us" => config.step_delay_us = parse_u32(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pin() {
        let pin = parse_pin("gpio11").unwrap();
        assert_eq!(pin.pin, 11);
        assert!(!pin.inverted);

        let pin = parse_pin("\"!gpio12\"").unwrap();
        assert_eq!(pin.pin, 12);
        assert!(pin.inverted);

        assert_eq!(parse_pin("pin5"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("gpio"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("gpio300"), Err(ParseError::InvalidPin));
    }

    #[test]
    fn test_parse_u32() {
        assert_eq!(parse_u32("4096"), Ok(4096));
        assert_eq!(parse_u32("1_000"), Ok(1000));
        assert_eq!(parse_u32("-5"), Err(ParseError::InvalidValue));
        assert_eq!(parse_u32("_"), Err(ParseError::InvalidValue));
        assert_eq!(parse_u32("99999999999"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(
            parse_section_header("stepper vent"),
            Ok(Section::Stepper(Some(HString::try_from("vent").unwrap())))
        );
        assert_eq!(
            parse_section_header("stepper.vent"),
            Ok(Section::Stepper(Some(HString::try_from("vent").unwrap())))
        );
        assert_eq!(parse_section_header("stepper"), Ok(Section::Stepper(None)));
        assert_eq!(parse_section_header("radar.front"), Ok(Section::Other));
        assert_eq!(
            parse_section_header("stepper."),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(parse_section_header("radar"), Ok(Section::Other));
        assert_eq!(
            parse_section_header("stepper a b"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_section_header("stepper a-name-longer-than-sixteen"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
# ULN2003 board on the left header
[stepper.vent]
in1_pin = "gpio10"
in2_pin = "gpio11"
in3_pin = "gpio12"
in4_pin = "!gpio13"  # inverted
steps_per_rev = 2048
step_delay_us = 1_200

[radar]
interval_ms = 400
"#;

        let config = parse_motor_config(config_str).unwrap();
        assert_eq!(config.name.as_str(), "vent");
        assert_eq!(config.coil_pins[0], PinConfig::new(10));
        assert_eq!(config.coil_pins[3], PinConfig::inverted(13));
        assert_eq!(config.steps_per_rev, 2048);
        assert_eq!(config.step_delay_us, 1200);
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = parse_motor_config("[stepper]\nstep_delay_us = 1000\n").unwrap();
        let defaults = MotorConfig::default();
        assert_eq!(config.name, defaults.name);
        assert_eq!(config.coil_pins, defaults.coil_pins);
        assert_eq!(config.steps_per_rev, defaults.steps_per_rev);
        assert_eq!(config.step_delay_us, 1000);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_motor_config("[radar]\nx = 1\n"),
            Err(ParseError::MissingSection)
        );
        assert_eq!(
            parse_motor_config("[stepper]\n[stepper]\n"),
            Err(ParseError::DuplicateSection)
        );
        assert_eq!(
            parse_motor_config("[stepper]\nspeed = 3\n"),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(
            parse_motor_config("[stepper]\nsteps_per_rev\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_motor_config("[stepper\n"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_motor_config("steps_per_rev = 1\n[stepper]\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        assert_eq!(
            parse_motor_config("[stepper]\nsteps_per_rev = 0\n"),
            Err(ParseError::Config(ConfigError::ZeroStepsPerRev))
        );
        assert_eq!(
            parse_motor_config("[stepper]\nin1_pin = \"gpio4\"\n"),
            Err(ParseError::Config(ConfigError::DuplicatePin(4)))
        );
    }
}
