//! Single-shot ADC conversions
//!
//! RP2040 has a single 12-bit ADC with 5 channels:
//! - ADC0..ADC3: GPIO26..GPIO29
//! - ADC4: Internal temperature sensor
//!
//! embassy-rp powers the ADC up and disables the pad's digital input;
//! conversions are then started and polled through the CS register.

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::pac;
use tremor_hal::AdcConverter;

/// RP2040 ADC resolution
pub const RESOLUTION_BITS: u8 = 12;

/// GPIO pin behind an ADC channel
///
/// Channel 4 is the temperature sensor and has no pin.
pub fn channel_gpio(channel: u8) -> Option<u8> {
    match channel {
        0..=3 => Some(26 + channel),
        _ => None,
    }
}

/// ADC with one sampled input
pub struct PolledAdc<'d> {
    _adc: Adc<'d, Blocking>,
    _input: Channel<'d>,
    channel: u8,
}

impl<'d> PolledAdc<'d> {
    /// Bind the ADC to `input`, which must be the pin `channel_gpio(channel)`
    pub fn new(adc: Adc<'d, Blocking>, input: Channel<'d>, channel: u8) -> Self {
        Self {
            _adc: adc,
            _input: input,
            channel,
        }
    }
}

impl AdcConverter for PolledAdc<'_> {
    fn start(&mut self) {
        let channel = self.channel;
        pac::ADC.cs().modify(|w| {
            w.set_ainsel(channel);
            w.set_start_once(true);
        });
    }

    fn is_busy(&self) -> bool {
        !pac::ADC.cs().read().ready()
    }

    fn sample(&mut self) -> u16 {
        pac::ADC.result().read().result()
    }

    fn resolution_bits(&self) -> u8 {
        RESOLUTION_BITS
    }
}
