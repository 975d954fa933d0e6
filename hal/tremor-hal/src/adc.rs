//! ADC abstractions
//!
//! Single-shot, polled conversion. A converter is bound to one input
//! when it is built; the chip HAL picks the channel from the pin it owns.

/// Polled single-shot ADC
pub trait AdcConverter {
    /// Start a single conversion on the bound input
    fn start(&mut self);

    /// Check whether a conversion is still in progress
    fn is_busy(&self) -> bool;

    /// Read the raw result of the last conversion
    fn sample(&mut self) -> u16;

    /// Converter resolution in bits
    fn resolution_bits(&self) -> u8;
}
