//! Byte-level SPI transport
//!
//! The sensor driver talks to a [`Transport`]: one byte out, one byte in.
//! [`PolledTransport`] implements it on top of a HAL shift register by
//! loading the byte and spinning on the completion flag.

use tremor_core::timing::{poll_until, TimedOut, Timeout};
use tremor_hal::ShiftRegister;

/// Full-duplex byte exchange
pub trait Transport {
    /// Error type for failed exchanges
    type Error;

    /// Clock one byte out and return the byte clocked in
    ///
    /// Blocks until the hardware reports completion. Chip-select is not
    /// touched.
    fn exchange_byte(&mut self, value: u8) -> Result<u8, Self::Error>;
}

/// Transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// The shift register never reported completion
    Timeout,
}

impl From<TimedOut> for TransportError {
    fn from(_: TimedOut) -> Self {
        TransportError::Timeout
    }
}

/// Transport that busy-waits on a shift register's completion flag
pub struct PolledTransport<SR> {
    shifter: SR,
    timeout: Timeout,
}

impl<SR: ShiftRegister> PolledTransport<SR> {
    /// Create a transport with the given per-byte poll budget
    pub fn new(shifter: SR, timeout: Timeout) -> Self {
        Self { shifter, timeout }
    }

    /// Release the shift register
    pub fn release(self) -> SR {
        self.shifter
    }
}

impl<SR: ShiftRegister> Transport for PolledTransport<SR> {
    type Error = TransportError;

    fn exchange_byte(&mut self, value: u8) -> Result<u8, TransportError> {
        self.shifter.load(value);

        let shifter = &self.shifter;
        poll_until(self.timeout, || shifter.is_complete())?;

        Ok(self.shifter.take())
    }
}
