//! Sensor configuration sequencer
//!
//! Turns a [`SensorConfig`] into the ordered register writes that program
//! the accelerometer: thresholds and timers first, detection mode and
//! interrupt mapping next, and the power control write that starts
//! measurement always last. The device is treated as write-only, so the
//! whole list is replayed after every soft reset.

use heapless::Vec;
use tremor_core::config::SensorConfig;
use tremor_hal::OutputPin;

use crate::sensor::registers::{reg, threshold_bytes};
use crate::sensor::{Adxl362, Adxl362Error};
use crate::transport::Transport;

/// Longest possible configuration sequence
pub const MAX_WRITES: usize = 9;

/// One register write of the configuration sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterWrite {
    pub address: u8,
    pub value: u8,
}

impl RegisterWrite {
    const fn new(address: u8, value: u8) -> Self {
        Self { address, value }
    }
}

/// Ordered register writes for a configuration
pub type WritePlan = Vec<RegisterWrite, MAX_WRITES>;

/// Build the register write plan for `config`
pub fn plan(config: &SensorConfig) -> WritePlan {
    let mut writes = WritePlan::new();

    let (act_low, act_high) = threshold_bytes(config.activity_threshold);
    push(&mut writes, reg::THRESH_ACT_L, act_low);
    push(&mut writes, reg::THRESH_ACT_H, act_high);

    if let Some(inactivity) = config.inactivity {
        let (inact_low, inact_high) = threshold_bytes(inactivity.threshold);
        let [time_low, time_high] = inactivity.time.to_le_bytes();
        push(&mut writes, reg::THRESH_INACT_L, inact_low);
        push(&mut writes, reg::THRESH_INACT_H, inact_high);
        push(&mut writes, reg::TIME_INACT_L, time_low);
        push(&mut writes, reg::TIME_INACT_H, time_high);
    }

    push(&mut writes, reg::ACT_INACT_CTL, config.detect_mode);
    push(&mut writes, reg::INTMAP1, config.interrupt_map);

    // Measurement starts here; nothing may follow
    push(&mut writes, reg::POWER_CTL, config.power_mode);

    writes
}

fn push(writes: &mut WritePlan, address: u8, value: u8) {
    // At most MAX_WRITES entries are ever pushed
    let _ = writes.push(RegisterWrite::new(address, value));
}

/// Write the configuration to the sensor
///
/// Stops at the first failed write. Call after [`Adxl362::soft_reset`].
pub fn configure<T, CS>(
    sensor: &mut Adxl362<T, CS>,
    config: &SensorConfig,
) -> Result<(), Adxl362Error<T::Error>>
where
    T: Transport,
    CS: OutputPin,
{
    for write in plan(config) {
        sensor.write_register(write.address, write.value)?;
    }
    Ok(())
}

/// Soft-reset the sensor and replay the configuration
pub fn reset_and_configure<T, CS>(
    sensor: &mut Adxl362<T, CS>,
    config: &SensorConfig,
) -> Result<(), Adxl362Error<T::Error>>
where
    T: Transport,
    CS: OutputPin,
{
    sensor.soft_reset()?;
    configure(sensor, config)
}
