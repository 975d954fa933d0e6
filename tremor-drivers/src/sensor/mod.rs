//! Accelerometer support
//!
//! - [`adxl362`]: register protocol driver
//! - [`registers`]: register map, bitfields and frame builders
//! - [`status`]: STATUS register decoding

pub mod adxl362;
pub mod registers;
pub mod status;

pub use adxl362::{Adxl362, Adxl362Error, Presence};
pub use status::StatusFlags;
