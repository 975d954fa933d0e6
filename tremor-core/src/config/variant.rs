//! Behavioral variants
//!
//! Three board builds share the driver and differ only in what the sensor
//! is told to report and what the handler does after an edge.

use super::bits::{act_inact, event, power};
use super::types::{InactivityConfig, SensorConfig};

/// Default activity threshold: 100 mg
const ACTIVITY_THRESHOLD: u16 = 0x64;

/// Node behavioral variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// Linked activity/inactivity in loop mode, AWAKE mapped to INT1
    ///
    /// Loop mode never leaves measurement, so the handler does not
    /// restart it.
    AwakeLinked,
    /// Referenced activity only, ACT mapped to INT1
    #[default]
    ActivityOnly,
    /// Activity only, feedback gated on a battery sample
    BatteryGuarded,
}

impl Variant {
    /// All variants
    pub const ALL: [Variant; 3] = [
        Variant::AwakeLinked,
        Variant::ActivityOnly,
        Variant::BatteryGuarded,
    ];

    /// Name used in the config file
    pub fn name(&self) -> &'static str {
        match self {
            Variant::AwakeLinked => "awake_linked",
            Variant::ActivityOnly => "activity_only",
            Variant::BatteryGuarded => "battery_guarded",
        }
    }

    /// Look up a variant by config file name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    /// Check if the handler re-issues the measurement-mode write
    pub fn restarts_measurement(&self) -> bool {
        !matches!(self, Variant::AwakeLinked)
    }

    /// Check if feedback is gated on the battery guard
    pub fn is_battery_guarded(&self) -> bool {
        matches!(self, Variant::BatteryGuarded)
    }

    /// Register settings for this variant
    pub fn sensor_preset(&self) -> SensorConfig {
        match self {
            Variant::AwakeLinked => SensorConfig {
                activity_threshold: ACTIVITY_THRESHOLD,
                inactivity: Some(InactivityConfig {
                    threshold: 0x19, // 25 mg
                    time: 3,
                }),
                detect_mode: act_inact::ACT_EN
                    | act_inact::ACT_REF
                    | act_inact::INACT_EN
                    | act_inact::INACT_REF
                    | act_inact::LOOP,
                interrupt_map: event::AWAKE,
                power_mode: power::WAKEUP_MODE,
            },
            Variant::ActivityOnly | Variant::BatteryGuarded => SensorConfig {
                activity_threshold: ACTIVITY_THRESHOLD,
                inactivity: None,
                detect_mode: act_inact::ACT_EN | act_inact::ACT_REF,
                interrupt_map: event::ACT,
                power_mode: power::WAKEUP_MODE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(Variant::from_name(variant.name()), Some(variant));
        }
        assert_eq!(Variant::from_name("full"), None);
    }

    #[test]
    fn test_restart_behavior() {
        assert!(!Variant::AwakeLinked.restarts_measurement());
        assert!(Variant::ActivityOnly.restarts_measurement());
        assert!(Variant::BatteryGuarded.restarts_measurement());
    }

    #[test]
    fn test_only_one_variant_guarded() {
        let guarded: usize = Variant::ALL
            .iter()
            .filter(|v| v.is_battery_guarded())
            .count();
        assert_eq!(guarded, 1);
    }

    #[test]
    fn test_presets() {
        let awake = Variant::AwakeLinked.sensor_preset();
        assert_eq!(awake.detect_mode, 0x3F);
        assert_eq!(awake.interrupt_map, 0x40);
        assert!(awake.inactivity.is_some());

        let activity = Variant::ActivityOnly.sensor_preset();
        assert_eq!(activity.detect_mode, 0x03);
        assert_eq!(activity.interrupt_map, 0x10);
        assert!(activity.inactivity.is_none());

        assert_eq!(Variant::BatteryGuarded.sensor_preset(), activity);

        for variant in Variant::ALL {
            let preset = variant.sensor_preset();
            assert_eq!(preset.activity_threshold, 0x64);
            assert_eq!(preset.power_mode, 0x0A);
        }
    }
}
