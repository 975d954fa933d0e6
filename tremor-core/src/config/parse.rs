//! Config file parser
//!
//! Minimal TOML-subset parser for the node config file. It handles only
//! what the node config needs and does NOT support the full TOML spec.
//!
//! Supported features:
//! - [section] headers
//! - key = value pairs (string, integer, boolean)
//! - Decimal and `0x` hex integers, `_` digit separators
//! - Comments (# ...)
//!
//! The `[node] variant` key selects the preset every other section
//! overrides, regardless of where it appears in the file.

use super::types::{ConfigError, GuardConfig, InactivityConfig, NodeConfig};
use super::variant::Variant;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Line is not a `key = value` pair
    InvalidLine,
    /// Value has the wrong type or does not fit
    InvalidValue,
    /// `variant` names no known variant
    UnknownVariant,
    /// Parsed config fails validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Node,
    Sensor,
    Feedback,
    Battery,
    Timeouts,
}

/// Battery threshold given as a voltage rather than a raw sample
#[derive(Default)]
struct BatteryVoltage {
    min_mv: Option<u32>,
    divider: Option<u32>,
    vref_mv: Option<u32>,
}

/// Parse a config file into a validated NodeConfig
pub fn parse_config(input: &str) -> Result<NodeConfig, ParseError> {
    let mut config = NodeConfig::for_variant(find_variant(input)?);
    let mut section = Section::Root;
    let mut voltage = BatteryVoltage::default();

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config, &mut voltage)?;
    }

    if let Some(min_mv) = voltage.min_mv {
        let resolution_bits = config.guard.resolution_bits;
        config.guard = GuardConfig::from_millivolts(
            config.guard.channel,
            min_mv,
            voltage.divider.unwrap_or(1),
            voltage.vref_mv.unwrap_or(3300),
            resolution_bits,
        )
        .map_err(|_| ParseError::InvalidValue)?;
    }

    config.validate()?;
    Ok(config)
}

/// Find the `[node] variant` key, defaulting when absent
fn find_variant(input: &str) -> Result<Variant, ParseError> {
    let mut in_node = false;

    for line in input.lines() {
        let line = line.trim();

        if line.starts_with('[') && line.ends_with(']') {
            in_node = line[1..line.len() - 1].trim() == "node";
            continue;
        }

        if !in_node {
            continue;
        }

        if let Some(("variant", value)) = parse_key_value(line) {
            return Variant::from_name(parse_string(value)).ok_or(ParseError::UnknownVariant);
        }
    }

    Ok(Variant::default())
}

/// Parse section header like "sensor" or "battery"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "node" => Ok(Section::Node),
        "sensor" => Ok(Section::Sensor),
        "feedback" => Ok(Section::Feedback),
        "battery" => Ok(Section::Battery),
        "timeouts" => Ok(Section::Timeouts),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Apply one key/value pair to the config
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut NodeConfig,
    voltage: &mut BatteryVoltage,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::UnknownKey),
        Section::Node => match key {
            // Already applied by find_variant
            "variant" => {}
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Sensor => {
            let sensor = &mut config.sensor;
            match key {
                "activity_threshold" => sensor.activity_threshold = parse_int(value)?,
                "inactivity" => {
                    if !parse_bool(value)? {
                        sensor.inactivity = None;
                    } else if sensor.inactivity.is_none() {
                        sensor.inactivity = Some(InactivityConfig {
                            threshold: 0,
                            time: 0,
                        });
                    }
                }
                "inactivity_threshold" => {
                    let threshold = parse_int(value)?;
                    let time = sensor.inactivity.map(|i| i.time).unwrap_or(0);
                    sensor.inactivity = Some(InactivityConfig { threshold, time });
                }
                "inactivity_time" => {
                    let time = parse_int(value)?;
                    let threshold = sensor.inactivity.map(|i| i.threshold).unwrap_or(0);
                    sensor.inactivity = Some(InactivityConfig { threshold, time });
                }
                "detect_mode" => sensor.detect_mode = parse_int(value)?,
                "interrupt_map" => sensor.interrupt_map = parse_int(value)?,
                "power_mode" => sensor.power_mode = parse_int(value)?,
                _ => return Err(ParseError::UnknownKey),
            }
        }
        Section::Feedback => match key {
            "toggles" => config.feedback.toggles = parse_int(value)?,
            "half_period_ms" => config.feedback.half_period_ms = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Battery => match key {
            "channel" => config.guard.channel = parse_int(value)?,
            "threshold" => config.guard.threshold = parse_int(value)?,
            "resolution_bits" => {
                let bits: u8 = parse_int(value)?;
                if !(8..=16).contains(&bits) {
                    return Err(ParseError::InvalidValue);
                }
                config.guard.resolution_bits = bits;
            }
            "min_mv" => voltage.min_mv = Some(parse_int(value)?),
            "divider" => voltage.divider = Some(parse_int(value)?),
            "vref_mv" => voltage.vref_mv = Some(parse_int(value)?),
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Timeouts => match key {
            "transport_polls" => config.timeouts.transport_polls = parse_int(value)?,
            "adc_polls" => config.timeouts.adc_polls = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
    }

    Ok(())
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
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
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parse a decimal or `0x` hex integer with optional `_` separators
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let (digits, radix) = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };

    if digits.is_empty() || digits.starts_with('_') {
        return Err(ParseError::InvalidValue);
    }

    let mut acc: u32 = 0;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(radix).ok_or(ParseError::InvalidValue)?;
        acc = acc
            .checked_mul(radix)
            .and_then(|a| a.checked_add(digit))
            .ok_or(ParseError::InvalidValue)?;
    }

    T::try_from(acc).map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::THRESHOLD_MAX;
    use proptest::prelude::*;

    extern crate std;
    use std::format;

    const BOARD_CONFIG: &str = r#"
# Awake-linked motion node
[node]
variant = "awake_linked"

[sensor]
activity_threshold = 100   # mg
inactivity_threshold = 0x19
inactivity_time = 3

[feedback]
toggles = 20
half_period_ms = 30

[timeouts]
transport_polls = 10_000
adc_polls = 0
"#;

    #[test]
    fn test_parse_board_config() {
        let config = parse_config(BOARD_CONFIG).unwrap();

        assert_eq!(config.variant, Variant::AwakeLinked);
        assert_eq!(config.sensor.activity_threshold, 100);
        assert_eq!(
            config.sensor.inactivity,
            Some(InactivityConfig {
                threshold: 0x19,
                time: 3
            })
        );
        assert_eq!(config.sensor.detect_mode, 0x3F);
        assert_eq!(config.feedback.toggles, 20);
        assert_eq!(config.timeouts.transport_polls, 10_000);
        assert_eq!(config.timeouts.adc_polls, 0);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config(""), Ok(NodeConfig::default()));
        assert_eq!(parse_config("# only a comment\n"), Ok(NodeConfig::default()));
    }

    #[test]
    fn test_variant_after_overrides() {
        // Overrides win even when [node] comes last
        let input = "[sensor]\ninterrupt_map = 0x40\n[node]\nvariant = \"battery_guarded\"\n";
        let config = parse_config(input).unwrap();

        assert_eq!(config.variant, Variant::BatteryGuarded);
        assert_eq!(config.sensor.interrupt_map, 0x40);
        assert_eq!(config.sensor.detect_mode, 0x03);
    }

    #[test]
    fn test_disable_inactivity() {
        let input = "[node]\nvariant = \"awake_linked\"\n[sensor]\ninactivity = false\n";
        let config = parse_config(input).unwrap();
        assert_eq!(config.sensor.inactivity, None);
    }

    #[test]
    fn test_battery_millivolts() {
        let input = r#"
[node]
variant = "battery_guarded"

[battery]
channel = 3
min_mv = 3000
divider = 3
vref_mv = 3300
"#;
        let config = parse_config(input).unwrap();
        assert_eq!(config.guard.channel, 3);
        assert_eq!(config.guard.threshold, 1241);
    }

    #[test]
    fn test_battery_millivolts_16_bit() {
        let input = "[node]\nvariant = \"battery_guarded\"\n[battery]\nresolution_bits = 16\nmin_mv = 70000\n";
        let config = parse_config(input).unwrap();
        assert_eq!(config.guard.resolution_bits, 16);
        assert_eq!(config.guard.threshold, 0xFFFF);

        let input = "[battery]\nresolution_bits = 16\nmin_mv = 4294967295\ndivider = 1\nvref_mv = 1\n";
        let config = parse_config(input).unwrap();
        assert_eq!(config.guard.threshold, 0xFFFF);
    }

    #[test]
    fn test_battery_raw_threshold_10_bit() {
        let input = "[node]\nvariant = \"battery_guarded\"\n[battery]\nresolution_bits = 10\nthreshold = 700\n";
        let config = parse_config(input).unwrap();
        assert_eq!(config.guard.resolution_bits, 10);
        assert_eq!(config.guard.threshold, 700);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_config("[node]\nvariant = \"full\"\n"),
            Err(ParseError::UnknownVariant)
        );
        assert_eq!(parse_config("[radio]\n"), Err(ParseError::InvalidSection));
        assert_eq!(
            parse_config("[sensor]\nodr = 100\n"),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(
            parse_config("[sensor]\nactivity_threshold\n"),
            Err(ParseError::InvalidLine)
        );
        assert_eq!(
            parse_config("[sensor]\ndetect_mode = 0x1FF\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[feedback]\ntoggles = lots\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("stray = 1\n"),
            Err(ParseError::UnknownKey)
        );
    }

    #[test]
    fn test_validation_applied() {
        assert_eq!(
            parse_config("[sensor]\nactivity_threshold = 4000\n"),
            Err(ParseError::Invalid(ConfigError::ActivityThresholdOutOfRange))
        );
        assert_eq!(
            parse_config("[sensor]\npower_mode = 0x00\n"),
            Err(ParseError::Invalid(ConfigError::MeasurementDisabled))
        );
    }

    #[test]
    fn test_parse_int_forms() {
        assert_eq!(parse_int::<u16>("100"), Ok(100));
        assert_eq!(parse_int::<u8>("0x3F"), Ok(0x3F));
        assert_eq!(parse_int::<u32>("10_000"), Ok(10_000));
        assert_eq!(parse_int::<u8>("256"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u8>("0x"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u8>("-1"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u32>("99999999999"), Err(ParseError::InvalidValue));
    }

    proptest! {
        #[test]
        fn prop_battery_millivolts_never_panic(
            bits in 8u8..=16,
            min_mv in any::<u32>(),
            divider in any::<u32>(),
            vref_mv in any::<u32>(),
        ) {
            let input = format!(
                "[node]\nvariant = \"battery_guarded\"\n[battery]\nresolution_bits = {}\nmin_mv = {}\ndivider = {}\nvref_mv = {}\n",
                bits, min_mv, divider, vref_mv
            );
            let config = parse_config(&input).unwrap();
            prop_assert!(u32::from(config.guard.threshold) < 1u32 << bits);
        }

        #[test]
        fn prop_activity_threshold_accepted_in_range(threshold in 0u16..=THRESHOLD_MAX) {
            let input = format!("[sensor]\nactivity_threshold = {}\n", threshold);
            let config = parse_config(&input).unwrap();
            prop_assert_eq!(config.sensor.activity_threshold, threshold);
        }

        #[test]
        fn prop_hex_and_decimal_agree(value in any::<u16>()) {
            let dec = format!("{}", value);
            let hex = format!("0x{:X}", value);
            prop_assert_eq!(parse_int::<u16>(&dec), parse_int::<u16>(&hex));
        }
    }
}
