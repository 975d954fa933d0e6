//! Decoded STATUS register

use tremor_core::config::bits::event;

/// User register corruption flag (STATUS only)
const ERR_USER_REGS: u8 = 1 << 7;

/// STATUS register flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusFlags {
    /// New sample available
    pub data_ready: bool,
    /// At least one FIFO sample available
    pub fifo_ready: bool,
    /// FIFO watermark reached
    pub fifo_watermark: bool,
    /// FIFO overran and lost samples
    pub fifo_overrun: bool,
    /// Activity detected
    pub activity: bool,
    /// Inactivity detected
    pub inactivity: bool,
    /// Device is awake (linked/loop mode)
    pub awake: bool,
    /// User register configuration was corrupted (SEU)
    pub register_error: bool,
}

impl StatusFlags {
    /// Decode a raw STATUS value
    pub fn from_register(value: u8) -> Self {
        Self {
            data_ready: value & event::DATA_READY != 0,
            fifo_ready: value & event::FIFO_READY != 0,
            fifo_watermark: value & event::FIFO_WATERMARK != 0,
            fifo_overrun: value & event::FIFO_OVERRUN != 0,
            activity: value & event::ACT != 0,
            inactivity: value & event::INACT != 0,
            awake: value & event::AWAKE != 0,
            register_error: value & ERR_USER_REGS != 0,
        }
    }

    /// Check if the status reports a motion event
    pub fn has_motion(&self) -> bool {
        self.activity || self.awake
    }
}
