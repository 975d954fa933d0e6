//! Tremor Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the sensor node
//! needs from a chip-specific HAL. Everything above this layer (register
//! driver, control loop, battery guard) is written against these traits
//! and can be exercised on the host with simulated peripherals.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (tremor-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tremor-drivers / tremor-core           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tremor-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  tremor-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Chip-select and indicator outputs
//! - [`gpio::EdgeLatch`], [`gpio::EdgeWait`] - Edge-triggered wake input
//! - [`spi::ShiftRegister`] - Polled single-byte SPI shifter
//! - [`adc::AdcConverter`] - Polled single-shot ADC

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use adc::AdcConverter;
pub use gpio::{EdgeLatch, EdgeWait, OutputPin};
pub use spi::ShiftRegister;
