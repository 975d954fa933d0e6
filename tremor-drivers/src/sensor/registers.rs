//! ADXL362 register map and SPI framing
//!
//! Every transaction is three bytes with chip-select held low:
//! - Command byte: 0x0A (write) or 0x0B (read)
//! - Register address
//! - Data byte (write) or placeholder 0xFF (read)
//!
//! On a read the register value arrives during the third byte. Control
//! register bit fields live in `tremor_core::config::bits`.

/// ADXL362 register addresses
pub mod reg {
    /// Analog Devices ID (always 0xAD)
    pub const DEVID_AD: u8 = 0x00;
    /// MEMS ID (always 0x1D)
    pub const DEVID_MST: u8 = 0x01;
    /// Part ID (always 0xF2)
    pub const PARTID: u8 = 0x02;
    /// Silicon revision
    pub const REVID: u8 = 0x03;
    /// Status flags; reading it acknowledges a pending activity event
    pub const STATUS: u8 = 0x0B;
    /// Soft reset command register
    pub const SOFT_RESET: u8 = 0x1F;
    /// Activity threshold, low byte
    pub const THRESH_ACT_L: u8 = 0x20;
    /// Activity threshold, high 3 bits
    pub const THRESH_ACT_H: u8 = 0x21;
    /// Activity time
    pub const TIME_ACT: u8 = 0x22;
    /// Inactivity threshold, low byte
    pub const THRESH_INACT_L: u8 = 0x23;
    /// Inactivity threshold, high 3 bits
    pub const THRESH_INACT_H: u8 = 0x24;
    /// Inactivity time, low byte
    pub const TIME_INACT_L: u8 = 0x25;
    /// Inactivity time, high byte
    pub const TIME_INACT_H: u8 = 0x26;
    /// Activity/inactivity control
    pub const ACT_INACT_CTL: u8 = 0x27;
    /// INT1 function map
    pub const INTMAP1: u8 = 0x2A;
    /// INT2 function map
    pub const INTMAP2: u8 = 0x2B;
    /// Filter control
    pub const FILTER_CTL: u8 = 0x2C;
    /// Power control
    pub const POWER_CTL: u8 = 0x2D;
}

/// Command bytes
pub mod cmd {
    /// Write register
    pub const WRITE: u8 = 0x0A;
    /// Read register
    pub const READ: u8 = 0x0B;
}

/// Placeholder clocked out while the device answers a read
pub const READ_PLACEHOLDER: u8 = 0xFF;

/// Value written to `SOFT_RESET` by this node
pub const SOFT_RESET_CODE: u8 = 0x00;

/// Expected content of `DEVID_AD`
pub const DEVICE_ID: u8 = 0xAD;

/// Split an 11-bit threshold into its (low, high) register bytes
pub fn threshold_bytes(threshold: u16) -> (u8, u8) {
    ((threshold & 0xFF) as u8, ((threshold >> 8) & 0x07) as u8)
}

/// Build a register write frame
pub fn build_write_frame(address: u8, value: u8) -> [u8; 3] {
    [cmd::WRITE, address, value]
}

/// Build a register read frame
pub fn build_read_frame(address: u8) -> [u8; 3] {
    [cmd::READ, address, READ_PLACEHOLDER]
}
