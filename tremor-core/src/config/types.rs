//! Configuration type definitions
//!
//! These types describe what gets written to the accelerometer, how the
//! feedback blink looks, where the battery is sampled and how long the
//! busy-waits may spin.

use super::bits::power;
use super::variant::Variant;
use crate::timing::Timeout;

/// Largest value the activity/inactivity threshold registers hold (11 bits)
pub const THRESHOLD_MAX: u16 = 0x07FF;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Activity threshold does not fit the 11-bit register pair
    ActivityThresholdOutOfRange,
    /// Inactivity threshold does not fit the 11-bit register pair
    InactivityThresholdOutOfRange,
    /// Power mode would leave the sensor in standby
    MeasurementDisabled,
    /// Feedback blinks with a zero-length period
    ZeroFeedbackPeriod,
    /// Battery threshold exceeds the converter range
    GuardThresholdOutOfRange,
    /// Battery voltage settings overflow the threshold arithmetic
    GuardVoltageOutOfRange,
    /// Battery threshold is expressed in a different resolution than the
    /// converter delivers
    GuardResolutionMismatch,
}

/// Inactivity detection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InactivityConfig {
    /// Inactivity threshold in register counts (1 mg/LSB at ±2 g)
    pub threshold: u16,
    /// Inactivity timer in samples
    pub time: u16,
}

/// Accelerometer register settings
///
/// Written by the configuration sequencer in field order, with
/// `power_mode` always last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Activity threshold in register counts (1 mg/LSB at ±2 g)
    pub activity_threshold: u16,
    /// Inactivity threshold and timer, if inactivity detection is used
    pub inactivity: Option<InactivityConfig>,
    /// Activity/inactivity control register value
    pub detect_mode: u8,
    /// INT1 mapping register value
    pub interrupt_map: u8,
    /// Power control register value; starts measurement
    pub power_mode: u8,
}

impl SensorConfig {
    /// Check the settings against register widths
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.activity_threshold > THRESHOLD_MAX {
            return Err(ConfigError::ActivityThresholdOutOfRange);
        }

        if let Some(inactivity) = self.inactivity {
            if inactivity.threshold > THRESHOLD_MAX {
                return Err(ConfigError::InactivityThresholdOutOfRange);
            }
        }

        if self.power_mode & power::MEASURE_MASK != power::MEASURE_ON {
            return Err(ConfigError::MeasurementDisabled);
        }

        Ok(())
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Variant::default().sensor_preset()
    }
}

/// LED feedback blink settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeedbackConfig {
    /// Number of LED toggles per serviced edge
    pub toggles: u8,
    /// Delay after each toggle in milliseconds
    pub half_period_ms: u16,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            toggles: 20,
            half_period_ms: 30,
        }
    }
}

/// Battery guard settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GuardConfig {
    /// ADC channel wired to the battery divider; the firmware binds the
    /// converter to this channel's pin
    pub channel: u8,
    /// Minimum raw sample considered a healthy battery
    pub threshold: u16,
    /// Converter resolution the threshold is expressed in
    pub resolution_bits: u8,
}

impl GuardConfig {
    /// Derive the raw threshold from a minimum supply voltage
    ///
    /// # Arguments
    /// - `min_mv`: Minimum battery voltage in millivolts
    /// - `divider`: Divider ratio in front of the ADC pin (3 for 1/3)
    /// - `vref_mv`: ADC reference voltage in millivolts
    /// - `resolution_bits`: ADC resolution (8 to 16)
    ///
    /// Readings above full scale clamp to the largest sample.
    pub fn from_millivolts(
        channel: u8,
        min_mv: u32,
        divider: u32,
        vref_mv: u32,
        resolution_bits: u8,
    ) -> Result<Self, ConfigError> {
        if resolution_bits > 16 {
            return Err(ConfigError::GuardVoltageOutOfRange);
        }

        let pin_mv = u64::from(min_mv / divider.max(1));
        let full_scale = 1u64 << resolution_bits;
        let raw = pin_mv
            .checked_mul(full_scale)
            .ok_or(ConfigError::GuardVoltageOutOfRange)?
            / u64::from(vref_mv.max(1));

        Ok(Self {
            channel,
            threshold: raw.min(full_scale - 1) as u16,
            resolution_bits,
        })
    }

    /// Check the threshold against the converter range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution_bits > 16 || u32::from(self.threshold) >= 1u32 << self.resolution_bits {
            return Err(ConfigError::GuardThresholdOutOfRange);
        }
        Ok(())
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        // 3.0 V minimum on VSYS behind a 1/3 divider, 3.3 V reference
        Self {
            channel: 3,
            threshold: 1241,
            resolution_bits: 12,
        }
    }
}

/// Poll budgets for the hardware busy-waits (0 = unbounded)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeoutConfig {
    /// Polls allowed for one SPI byte exchange
    pub transport_polls: u32,
    /// Polls allowed for one ADC conversion
    pub adc_polls: u32,
}

impl TimeoutConfig {
    /// Strict hardware-timing fidelity: every wait spins forever
    pub const UNBOUNDED: Self = Self {
        transport_polls: 0,
        adc_polls: 0,
    };

    /// Timeout for one SPI byte exchange
    pub fn transport(&self) -> Timeout {
        Timeout::from_polls(self.transport_polls)
    }

    /// Timeout for one ADC conversion
    pub fn adc(&self) -> Timeout {
        Timeout::from_polls(self.adc_polls)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            transport_polls: 10_000,
            adc_polls: 10_000,
        }
    }
}

/// Complete node configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeConfig {
    /// Behavioral variant
    pub variant: Variant,
    /// Accelerometer register settings
    pub sensor: SensorConfig,
    /// LED feedback blink
    pub feedback: FeedbackConfig,
    /// Battery guard (only consulted by the battery-guarded variant)
    pub guard: GuardConfig,
    /// Busy-wait budgets
    pub timeouts: TimeoutConfig,
}

impl NodeConfig {
    /// Configuration preset for a variant
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            sensor: variant.sensor_preset(),
            feedback: FeedbackConfig::default(),
            guard: GuardConfig::default(),
            timeouts: TimeoutConfig::default(),
        }
    }

    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sensor.validate()?;

        if self.feedback.toggles > 0 && self.feedback.half_period_ms == 0 {
            return Err(ConfigError::ZeroFeedbackPeriod);
        }

        if self.variant.is_battery_guarded() {
            self.guard.validate()?;
        }

        Ok(())
    }

    /// Check if the handler must re-issue the measurement-mode write
    pub fn restarts_measurement(&self) -> bool {
        self.variant.restarts_measurement()
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}
