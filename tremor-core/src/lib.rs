//! Board-agnostic core logic for the motion-wake sensor node
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - State machine for the activity interrupt handler
//! - Node configuration types, variant presets and validation
//! - Config file parser (TOML subset, no_std)
//! - Bounded polling for busy-wait loops

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod state;
pub mod timing;
