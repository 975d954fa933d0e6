//! Hardware driver implementations
//!
//! This crate builds the node's behavior on the traits defined in
//! tremor-hal:
//!
//! - Byte transport over a polled shift register
//! - ADXL362 register protocol driver
//! - Configuration sequencer
//! - Battery guard and LED feedback
//! - Activity monitor (the service state machine and a blocking event loop)

#![no_std]
#![deny(unsafe_code)]

pub mod battery;
pub mod feedback;
pub mod monitor;
pub mod sensor;
pub mod sequencer;
pub mod transport;

#[cfg(test)]
mod mock;

pub use monitor::{ActivityMonitor, RunError, ServiceReport, ServiceStats};
pub use sensor::{Adxl362, Adxl362Error, Presence, StatusFlags};
pub use transport::{PolledTransport, Transport, TransportError};
