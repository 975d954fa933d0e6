//! Configuration loading
//!
//! The config file is compiled into the image and validated by the build
//! script. If the on-target parser still rejects it, or it asks for a
//! battery input this board cannot sample, the node runs the default
//! variant preset rather than refusing to boot.

use defmt::*;
use tremor_core::config::{parse_config, NodeConfig};
use tremor_hal_rp2040::adc::{channel_gpio, RESOLUTION_BITS};

/// Embedded configuration
/// Edit node.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../node.toml");

/// Parse the embedded configuration, falling back to the default preset
pub fn load() -> NodeConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) if !fits_board(&config) => fallback("battery input not wired on this board"),
        Ok(config) => {
            info!(
                "Config loaded: variant={}, activity threshold={} mg",
                config.variant.name(),
                config.sensor.activity_threshold
            );
            config
        }
        Err(e) => {
            warn!("node.toml rejected: {:?}", e);
            fallback("parse error")
        }
    }
}

/// Check the battery input against the RP2040 ADC
fn fits_board(config: &NodeConfig) -> bool {
    if !config.variant.is_battery_guarded() {
        return true;
    }

    match channel_gpio(config.guard.channel) {
        Some(gpio) if config.guard.resolution_bits == RESOLUTION_BITS => {
            info!("Battery sense on ADC{} (GPIO{})", config.guard.channel, gpio);
            true
        }
        _ => false,
    }
}

fn fallback(reason: &str) -> NodeConfig {
    let config = NodeConfig::default();
    warn!("Using {} preset ({})", config.variant.name(), reason);
    config
}
