//! Accelerometer control register bit fields
//!
//! Variant presets are composed from these; the driver decodes STATUS
//! with the same event bits, since STATUS and the INT maps share a layout.

/// Bits of `ACT_INACT_CTL`
pub mod act_inact {
    /// Enable activity detection
    pub const ACT_EN: u8 = 1 << 0;
    /// Activity detection is referenced to the last sample
    pub const ACT_REF: u8 = 1 << 1;
    /// Enable inactivity detection
    pub const INACT_EN: u8 = 1 << 2;
    /// Inactivity detection is referenced
    pub const INACT_REF: u8 = 1 << 3;
    /// Loop mode: linked, and acknowledged without a status read
    pub const LOOP: u8 = 0b11 << 4;
}

/// Event bits of `INTMAP1` and `STATUS`
pub mod event {
    pub const DATA_READY: u8 = 1 << 0;
    pub const FIFO_READY: u8 = 1 << 1;
    pub const FIFO_WATERMARK: u8 = 1 << 2;
    pub const FIFO_OVERRUN: u8 = 1 << 3;
    pub const ACT: u8 = 1 << 4;
    pub const INACT: u8 = 1 << 5;
    pub const AWAKE: u8 = 1 << 6;
}

/// Bits of `POWER_CTL`
pub mod power {
    /// Measurement mode field
    pub const MEASURE_MASK: u8 = 0b11;
    /// Measurement mode field value for "measure"
    pub const MEASURE_ON: u8 = 0b10;
    /// Wake-up mode flag
    pub const WAKEUP: u8 = 1 << 3;
    /// Measurement in wake-up mode; the sensor drops back to standby
    /// after each activity event
    pub const WAKEUP_MODE: u8 = WAKEUP | MEASURE_ON;
}
