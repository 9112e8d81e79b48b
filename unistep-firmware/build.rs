//! Build script for unistep-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates motor.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in a `[stepper]` section
const STEPPER_KEYS: &[&str] = &[
    "in1_pin",
    "in2_pin",
    "in3_pin",
    "in4_pin",
    "steps_per_rev",
    "step_delay_us",
];

const PIN_KEYS: [&str; 4] = ["in1_pin", "in2_pin", "in3_pin", "in4_pin"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate motor.toml at compile time
///
/// The firmware parses the file again at boot with its own reader; this
/// catches mistakes before flashing instead of at power-on.
fn validate_config() {
    println!("cargo:rerun-if-changed=motor.toml");

    let config_path = Path::new("motor.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: motor.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a motor.toml configuration file.          ║\n\
            ║  Please create one in the unistep-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read motor.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in motor.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let errors = validate_stepper(&config);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid stepper configuration                            ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=motor.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Find the single stepper section
///
/// Accepts a plain `[stepper]` table or exactly one named `[stepper.name]`.
fn find_stepper(config: &toml::Value) -> Result<(String, &toml::value::Table), String> {
    let stepper = match config.get("stepper") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => return Err("[stepper] must be a table".into()),
        None => return Err("Missing [stepper] section".into()),
    };

    let named: Vec<_> = stepper
        .iter()
        .filter_map(|(name, v)| v.as_table().map(|t| (name, t)))
        .collect();

    match named.as_slice() {
        [] => Ok(("stepper".into(), stepper)),
        [(name, table)] if stepper.len() == 1 => Ok(((*name).clone(), *table)),
        _ => Err("Exactly one stepper section is supported".into()),
    }
}

/// Validate the stepper section
fn validate_stepper(config: &toml::Value) -> Vec<String> {
    let (name, stepper) = match find_stepper(config) {
        Ok(found) => found,
        Err(e) => return vec![e],
    };

    let mut errors = Vec::new();

    if name.len() > 16 {
        errors.push(format!("[stepper {}] name longer than 16 bytes", name));
    }

    for key in stepper.keys() {
        if !STEPPER_KEYS.contains(&key.as_str()) {
            errors.push(format!("[stepper {}] unknown key '{}'", name, key));
        }
    }

    let mut pins = Vec::new();
    for key in PIN_KEYS {
        match stepper.get(key) {
            Some(toml::Value::String(pin)) => match parse_pin(pin) {
                Some(n) if pins.contains(&n) => {
                    errors.push(format!("[stepper {}] gpio{} used twice", name, n));
                }
                Some(n) => pins.push(n),
                None => errors.push(format!(
                    "[stepper {}] {} must look like \"gpio5\" or \"!gpio5\"",
                    name, key
                )),
            },
            Some(_) => errors.push(format!("[stepper {}] {} must be a string", name, key)),
            None => {}
        }
    }

    if let Some(value) = stepper.get("steps_per_rev") {
        match value.as_integer() {
            Some(n) if (1..=i32::MAX as i64).contains(&n) => {}
            _ => errors.push(format!(
                "[stepper {}] steps_per_rev must be 1-{}",
                name,
                i32::MAX
            )),
        }
    }

    if let Some(value) = stepper.get("step_delay_us") {
        match value.as_integer() {
            Some(n) if (0..=u32::MAX as i64).contains(&n) => {}
            _ => errors.push(format!(
                "[stepper {}] step_delay_us must be a non-negative integer",
                name
            )),
        }
    }

    errors
}

/// RP2040 GPIO number from "gpioN" / "!gpioN"
fn parse_pin(value: &str) -> Option<u8> {
    let value = value.strip_prefix('!').unwrap_or(value);
    let n: u8 = value.strip_prefix("gpio")?.parse().ok()?;
    (n < 30).then_some(n)
}
