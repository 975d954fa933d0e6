//! RP2040 HAL for the Tremor motion-wake node
//!
//! Implements the `tremor-hal` traits on embassy-rp peripherals:
//!
//! - Polled PL022 shift register on SPI0 (implements `ShiftRegister`)
//! - Single-shot ADC conversion (implements `AdcConverter`)
//! - LED/chip-select outputs and the sensor interrupt line
//!
//! Embassy drivers set up clocks, pads and pin functions; the polled paths
//! then go straight to the peripheral registers so every wait is a
//! bounded busy-wait owned by the caller.

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod spi;

pub use adc::PolledAdc;
pub use gpio::{InterruptLine, PushPull};
pub use spi::Pl022Shifter;
