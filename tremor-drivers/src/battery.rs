//! Battery guard
//!
//! A single raw ADC sample decides whether there is enough charge for the
//! feedback blink. No averaging, no hysteresis and no caching: every
//! serviced edge takes a fresh sample.

use tremor_core::config::{ConfigError, GuardConfig};
use tremor_core::timing::{poll_until, TimedOut, Timeout};
use tremor_hal::AdcConverter;

/// Guard errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuardError {
    /// Conversion never finished
    Timeout,
}

impl From<TimedOut> for GuardError {
    fn from(_: TimedOut) -> Self {
        GuardError::Timeout
    }
}

/// Outcome of one guard evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuardOutcome {
    /// This variant does not sample the battery
    Unguarded,
    /// Sample at or above the threshold
    Ok { sample: u16 },
    /// Sample below the threshold
    Low { sample: u16 },
    /// Conversion timed out; treated as low
    TimedOut,
}

impl GuardOutcome {
    /// Check if feedback may run
    pub fn allows_feedback(&self) -> bool {
        matches!(self, GuardOutcome::Unguarded | GuardOutcome::Ok { .. })
    }
}

/// Single-sample battery voltage guard
pub struct BatteryGuard<ADC> {
    adc: ADC,
    config: GuardConfig,
    timeout: Timeout,
}

impl<ADC: AdcConverter> BatteryGuard<ADC> {
    /// Create a guard over a converter bound to the battery input
    ///
    /// The threshold must be expressed in the converter's resolution.
    pub fn new(adc: ADC, config: GuardConfig, timeout: Timeout) -> Result<Self, ConfigError> {
        if adc.resolution_bits() != config.resolution_bits {
            return Err(ConfigError::GuardResolutionMismatch);
        }
        config.validate()?;

        Ok(Self {
            adc,
            config,
            timeout,
        })
    }

    /// Take one raw sample from the battery input
    pub fn sample(&mut self) -> Result<u16, GuardError> {
        self.adc.start();

        let adc = &self.adc;
        poll_until(self.timeout, || !adc.is_busy())?;

        Ok(self.adc.sample())
    }

    /// Sample the battery and compare against the threshold
    pub fn is_battery_ok(&mut self) -> Result<bool, GuardError> {
        let sample = self.sample()?;
        Ok(sample >= self.config.threshold)
    }

    /// Sample the battery and classify the result
    pub fn evaluate(&mut self) -> GuardOutcome {
        match self.sample() {
            Ok(sample) if sample >= self.config.threshold => GuardOutcome::Ok { sample },
            Ok(sample) => GuardOutcome::Low { sample },
            Err(GuardError::Timeout) => GuardOutcome::TimedOut,
        }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockAdc;

    fn guard(adc: MockAdc) -> BatteryGuard<MockAdc> {
        BatteryGuard::new(adc, GuardConfig::default(), Timeout::Polls(100)).unwrap()
    }

    #[test]
    fn test_threshold_comparison() {
        // Default threshold is 1241 counts
        assert_eq!(guard(MockAdc::new(2000)).is_battery_ok(), Ok(true));
        assert_eq!(guard(MockAdc::new(1241)).is_battery_ok(), Ok(true));
        assert_eq!(guard(MockAdc::new(1240)).is_battery_ok(), Ok(false));
        assert_eq!(guard(MockAdc::new(0)).is_battery_ok(), Ok(false));
    }

    #[test]
    fn test_resolution_mismatch_rejected() {
        let mut adc = MockAdc::new(2000);
        adc.resolution_bits = 10;
        let result = BatteryGuard::new(adc, GuardConfig::default(), Timeout::Polls(100));
        assert!(matches!(result, Err(ConfigError::GuardResolutionMismatch)));

        // Same threshold re-expressed for the 10-bit converter
        let mut adc = MockAdc::new(400);
        adc.resolution_bits = 10;
        let config = GuardConfig::from_millivolts(3, 3000, 3, 3300, 10).unwrap();
        let mut guard = BatteryGuard::new(adc, config, Timeout::Polls(100)).unwrap();
        assert_eq!(guard.config().threshold, 310);
        assert_eq!(guard.is_battery_ok(), Ok(true));
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let config = GuardConfig {
            threshold: 4096,
            ..GuardConfig::default()
        };
        let result = BatteryGuard::new(MockAdc::new(0), config, Timeout::Polls(100));
        assert!(matches!(result, Err(ConfigError::GuardThresholdOutOfRange)));
    }

    #[test]
    fn test_fresh_sample_every_call() {
        let mut guard = guard(MockAdc::new(2000));
        let conversions = guard.adc.conversions.clone();

        guard.is_battery_ok().unwrap();
        guard.adc.value = 100;
        assert_eq!(guard.is_battery_ok(), Ok(false));
        assert_eq!(conversions.get(), 2);
    }

    #[test]
    fn test_conversion_timeout() {
        let mut guard = guard(MockAdc::stuck());
        assert_eq!(guard.is_battery_ok(), Err(GuardError::Timeout));
        assert_eq!(guard.evaluate(), GuardOutcome::TimedOut);
        assert!(!GuardOutcome::TimedOut.allows_feedback());
    }

    #[test]
    fn test_evaluate() {
        assert_eq!(
            guard(MockAdc::new(3000)).evaluate(),
            GuardOutcome::Ok { sample: 3000 }
        );
        assert_eq!(
            guard(MockAdc::new(900)).evaluate(),
            GuardOutcome::Low { sample: 900 }
        );
        assert!(GuardOutcome::Unguarded.allows_feedback());
        assert!(!GuardOutcome::Low { sample: 900 }.allows_feedback());
    }
}
