//! Build script for tremor-firmware
//!
//! Copies memory.x for the linker and checks node.toml against the
//! ranges the firmware accepts.

use std::env;
use std::fs;
use std::path::PathBuf;

const VARIANTS: [&str; 3] = ["awake_linked", "activity_only", "battery_guarded"];

fn main() {
    copy_memory_x();
    validate_config();
}

/// Put memory.x where the cortex-m-rt link script finds it
fn copy_memory_x() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out_dir.join("memory.x"), include_bytes!("memory.x"))
        .expect("write memory.x to OUT_DIR");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Reject a node.toml the on-target parser would fall back on
fn validate_config() {
    println!("cargo:rerun-if-changed=node.toml");

    let content = fs::read_to_string("node.toml")
        .unwrap_or_else(|e| panic!("tremor-firmware/node.toml: {} (an empty file selects the defaults)", e));

    let config: toml::Value = toml::from_str(&content)
        .unwrap_or_else(|e| panic!("node.toml is not valid TOML:\n{}", e));

    let mut errors = Vec::new();
    validate_node(&config, &mut errors);
    validate_sensor(&config, &mut errors);
    validate_feedback(&config, &mut errors);
    validate_battery(&config, &mut errors);
    validate_timeouts(&config, &mut errors);

    if !errors.is_empty() {
        panic!("node.toml:\n  - {}", errors.join("\n  - "));
    }
}

fn section<'a>(config: &'a toml::Value, name: &str, errors: &mut Vec<String>) -> Option<&'a toml::Table> {
    match config.get(name) {
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
        None => None,
    }
}

/// Check that `key`, if present, is an integer within `min..=max`
fn check_range(
    table: &toml::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        Some(toml::Value::Integer(v)) if *v < min || *v > max => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
        Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

fn check_keys(table: &toml::Table, section: &str, known: &[&str], errors: &mut Vec<String>) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }
}

fn validate_node(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(table) = config.as_table() {
        for key in table.keys() {
            if !["node", "sensor", "feedback", "battery", "timeouts"].contains(&key.as_str()) {
                errors.push(format!("unknown section [{}]", key));
            }
        }
    }

    let Some(node) = section(config, "node", errors) else {
        return;
    };
    check_keys(node, "node", &["variant"], errors);

    match node.get("variant") {
        Some(toml::Value::String(v)) if !VARIANTS.contains(&v.as_str()) => {
            errors.push(format!("[node] variant must be one of {}", VARIANTS.join(", ")));
        }
        Some(toml::Value::String(_)) | None => {}
        Some(_) => errors.push("[node] variant must be a string".to_string()),
    }
}

fn validate_sensor(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(sensor) = section(config, "sensor", errors) else {
        return;
    };
    check_keys(
        sensor,
        "sensor",
        &[
            "activity_threshold",
            "inactivity",
            "inactivity_threshold",
            "inactivity_time",
            "detect_mode",
            "interrupt_map",
            "power_mode",
        ],
        errors,
    );

    check_range(sensor, "sensor", "activity_threshold", 0, 0x7FF, errors);
    check_range(sensor, "sensor", "inactivity_threshold", 0, 0x7FF, errors);
    check_range(sensor, "sensor", "inactivity_time", 0, 0xFFFF, errors);
    check_range(sensor, "sensor", "detect_mode", 0, 0xFF, errors);
    check_range(sensor, "sensor", "interrupt_map", 0, 0xFF, errors);
    check_range(sensor, "sensor", "power_mode", 0, 0xFF, errors);

    if let Some(toml::Value::Integer(mode)) = sensor.get("power_mode") {
        if mode & 0x03 != 0x02 {
            errors.push("[sensor] power_mode must enable measurement (bits 1:0 = 0b10)".to_string());
        }
    }
}

fn validate_feedback(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(feedback) = section(config, "feedback", errors) else {
        return;
    };
    check_keys(feedback, "feedback", &["toggles", "half_period_ms"], errors);
    check_range(feedback, "feedback", "toggles", 0, 0xFF, errors);
    check_range(feedback, "feedback", "half_period_ms", 0, 0xFFFF, errors);
}

fn validate_battery(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(battery) = section(config, "battery", errors) else {
        return;
    };
    check_keys(
        battery,
        "battery",
        &["channel", "threshold", "resolution_bits", "min_mv", "divider", "vref_mv"],
        errors,
    );
    // ADC0..ADC3 (GPIO26..29); the 12-bit RP2040 converter
    check_range(battery, "battery", "channel", 0, 3, errors);
    check_range(battery, "battery", "resolution_bits", 12, 12, errors);
    check_range(battery, "battery", "threshold", 0, 0xFFFF, errors);
    check_range(battery, "battery", "min_mv", 0, 20_000, errors);
    check_range(battery, "battery", "divider", 1, 100, errors);
    check_range(battery, "battery", "vref_mv", 1, 5_000, errors);

    if battery.contains_key("threshold") && battery.contains_key("min_mv") {
        errors.push("[battery] set either threshold or min_mv, not both".to_string());
    }
}

fn validate_timeouts(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timeouts) = section(config, "timeouts", errors) else {
        return;
    };
    check_keys(timeouts, "timeouts", &["transport_polls", "adc_polls"], errors);
    check_range(timeouts, "timeouts", "transport_polls", 0, u32::MAX as i64, errors);
    check_range(timeouts, "timeouts", "adc_polls", 0, u32::MAX as i64, errors);
}
