//! ADXL362 register protocol
//!
//! Each operation is one chip-select-framed transaction of three byte
//! exchanges. Chip-select is released after every transaction, including
//! one cut short by a transport error.

use tremor_hal::OutputPin;

use super::registers::{build_read_frame, build_write_frame, reg, DEVICE_ID, SOFT_RESET_CODE};
use super::status::StatusFlags;
use crate::transport::Transport;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Adxl362Error<E> {
    /// A byte exchange failed
    Transport(E),
    /// The device ID register did not read back 0xAD
    NotFound { id: u8 },
}

/// Result of an identity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Presence {
    /// Device ID matched
    Found,
    /// Something else answered (0x00/0xFF usually means nothing is wired)
    Absent { id: u8 },
}

impl Presence {
    /// Classify a value read from the ID register
    pub fn from_id(id: u8) -> Self {
        if id == DEVICE_ID {
            Presence::Found
        } else {
            Presence::Absent { id }
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Presence::Found)
    }
}

/// ADXL362 accelerometer on a byte transport with a dedicated chip-select
pub struct Adxl362<T, CS> {
    transport: T,
    cs: CS,
}

impl<T, CS> Adxl362<T, CS>
where
    T: Transport,
    CS: OutputPin,
{
    /// Create the driver and park chip-select high
    pub fn new(transport: T, mut cs: CS) -> Self {
        cs.set_high();
        Self { transport, cs }
    }

    /// Write one register
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<(), Adxl362Error<T::Error>> {
        self.transaction(build_write_frame(address, value))?;
        Ok(())
    }

    /// Read one register
    pub fn read_register(&mut self, address: u8) -> Result<u8, Adxl362Error<T::Error>> {
        self.transaction(build_read_frame(address))
    }

    /// Request a device soft reset
    ///
    /// No settle delay follows; the next transaction goes out immediately.
    pub fn soft_reset(&mut self) -> Result<(), Adxl362Error<T::Error>> {
        self.write_register(reg::SOFT_RESET, SOFT_RESET_CODE)
    }

    /// Read the device ID register
    pub fn identify(&mut self) -> Result<u8, Adxl362Error<T::Error>> {
        self.read_register(reg::DEVID_AD)
    }

    /// Read and classify the device ID
    pub fn presence(&mut self) -> Result<Presence, Adxl362Error<T::Error>> {
        self.identify().map(Presence::from_id)
    }

    /// Require the device ID to match
    pub fn probe(&mut self) -> Result<(), Adxl362Error<T::Error>> {
        match self.presence()? {
            Presence::Found => Ok(()),
            Presence::Absent { id } => Err(Adxl362Error::NotFound { id }),
        }
    }

    /// Read the status register
    ///
    /// This read is what acknowledges a pending activity event and lets
    /// the device drop its interrupt line.
    pub fn read_status(&mut self) -> Result<u8, Adxl362Error<T::Error>> {
        self.read_register(reg::STATUS)
    }

    /// Read and decode the status register
    pub fn status_flags(&mut self) -> Result<StatusFlags, Adxl362Error<T::Error>> {
        self.read_status().map(StatusFlags::from_register)
    }

    /// Release the transport and chip-select
    pub fn release(self) -> (T, CS) {
        (self.transport, self.cs)
    }

    /// Run one framed transaction and return the byte received last
    fn transaction(&mut self, frame: [u8; 3]) -> Result<u8, Adxl362Error<T::Error>> {
        self.cs.set_low();
        let result = exchange_frame(&mut self.transport, frame);
        self.cs.set_high();
        result.map_err(Adxl362Error::Transport)
    }
}

fn exchange_frame<T: Transport>(transport: &mut T, frame: [u8; 3]) -> Result<u8, T::Error> {
    let mut received = 0;
    for byte in frame {
        received = transport.exchange_byte(byte)?;
    }
    Ok(received)
}
