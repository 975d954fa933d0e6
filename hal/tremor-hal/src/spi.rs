//! SPI bus abstractions
//!
//! The sensor link needs nothing more than a polled shift register: load a
//! byte, let the hardware clock it out while clocking the reply in, poll a
//! completion flag, read the reply. Chip-select is a plain
//! [`OutputPin`](crate::gpio::OutputPin) owned by the caller.

/// Polled single-byte SPI shift register
///
/// Implementations must start the 8-clock transfer in [`load`](Self::load)
/// and report completion through [`is_complete`](Self::is_complete). No
/// implementation may block; waiting is the caller's job.
pub trait ShiftRegister {
    /// Load `value` and start clocking it out
    fn load(&mut self, value: u8);

    /// Check whether the transfer started by the last `load` has finished
    fn is_complete(&self) -> bool;

    /// Read the byte captured during the last transfer
    ///
    /// Only meaningful once [`is_complete`](Self::is_complete) is true.
    fn take(&mut self) -> u8;
}

/// Fastest serial clock the ADXL362 accepts
pub const MAX_FREQUENCY: u32 = 8_000_000;

/// SPI bus settings
///
/// The accelerometer only speaks mode 0 (clock idles low, data sampled on
/// the rising edge), so the clock rate is the only knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl SpiConfig {
    /// Clock frequency limited to what the sensor accepts
    pub fn clamped_frequency(&self) -> u32 {
        self.frequency.min(MAX_FREQUENCY)
    }
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 2_000_000,
        }
    }
}
