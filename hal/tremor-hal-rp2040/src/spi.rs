//! Polled SPI shift register
//!
//! The PL022 is set up by embassy-rp's blocking SPI driver (clock rate,
//! mode 0, pin functions). Bytes are then moved through the data register
//! one at a time: load writes the TX FIFO, completion is "RX FIFO not
//! empty", take pops the received byte.

use embassy_rp::pac;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Blocking, Spi};
use tremor_hal::spi::SpiConfig;
use tremor_hal::ShiftRegister;

/// Mode 0 embassy-rp SPI config at the requested clock
pub fn embassy_config(config: &SpiConfig) -> spi::Config {
    let mut out = spi::Config::default();
    out.frequency = config.clamped_frequency();
    out.polarity = spi::Polarity::IdleLow;
    out.phase = spi::Phase::CaptureOnFirstTransition;
    out
}

/// SPI0 as a single-byte shift register
pub struct Pl022Shifter<'d> {
    // Owns the pins and keeps the peripheral configured
    _spi: Spi<'d, SPI0, Blocking>,
}

impl<'d> Pl022Shifter<'d> {
    /// Take over a configured SPI0 driver
    ///
    /// Stale bytes left in the RX FIFO are drained so the first
    /// completion belongs to the first load.
    pub fn new(spi: Spi<'d, SPI0, Blocking>) -> Self {
        let regs = pac::SPI0;
        while regs.sspsr().read().rne() {
            let _ = regs.sspdr().read();
        }
        Self { _spi: spi }
    }
}

impl ShiftRegister for Pl022Shifter<'_> {
    fn load(&mut self, value: u8) {
        pac::SPI0.sspdr().write(|w| w.set_data(u16::from(value)));
    }

    fn is_complete(&self) -> bool {
        pac::SPI0.sspsr().read().rne()
    }

    fn take(&mut self) -> u8 {
        pac::SPI0.sspdr().read().data() as u8
    }
}
