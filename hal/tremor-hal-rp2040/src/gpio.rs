//! Output pins and the sensor interrupt line

use embassy_rp::gpio::{Input, Output};
use tremor_hal::{EdgeLatch, OutputPin};

/// Push-pull output (LED, chip-select)
pub struct PushPull<'d> {
    pin: Output<'d>,
}

impl<'d> PushPull<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for PushPull<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn toggle(&mut self) {
        self.pin.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Rising-edge interrupt input from the sensor's INT1
///
/// embassy-rp acknowledges the GPIO interrupt when the wait completes; the
/// latch kept here is the node's record that an edge still needs service.
pub struct InterruptLine<'d> {
    input: Input<'d>,
    pending: bool,
}

impl<'d> InterruptLine<'d> {
    pub fn new(input: Input<'d>) -> Self {
        Self {
            input,
            pending: false,
        }
    }

    /// Sleep until the next rising edge and latch it
    ///
    /// The executor parks the core in WFE while this is pending.
    pub async fn wait_for_rising_edge(&mut self) {
        self.input.wait_for_rising_edge().await;
        self.pending = true;
    }
}

impl EdgeLatch for InterruptLine<'_> {
    fn is_pending(&self) -> bool {
        self.pending
    }

    fn clear(&mut self) {
        self.pending = false;
    }
}
