//! GPIO pin abstractions
//!
//! Provides traits for digital outputs and for the single edge-triggered
//! input the node wakes on.

/// Push-pull output: the sensor chip-select and the indicator LED
pub trait OutputPin {
    fn set_high(&mut self);

    fn set_low(&mut self);

    /// Invert the driven level
    fn toggle(&mut self);

    /// Drive high when `high`, low otherwise
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Level currently driven (not read back from the pad)
    fn is_set_high(&self) -> bool;
}

/// Platform-owned edge latch for one input line
///
/// Set by hardware when the configured edge is seen, cleared by firmware
/// once the edge has been serviced. This is distinct from any condition
/// the peripheral driving the line keeps pending on its side.
pub trait EdgeLatch {
    /// Check whether an edge has been latched and not yet cleared
    fn is_pending(&self) -> bool;

    /// Clear the latch
    fn clear(&mut self);
}

/// Blocking wait for the next latched edge
///
/// On hardware this is where the processor sleeps. Returns once an edge
/// is latched; the latch itself is left set for the handler to clear.
pub trait EdgeWait: EdgeLatch {
    /// Error type (e.g. a simulated source running dry)
    type Error;

    /// Block until the next edge
    fn wait_for_edge(&mut self) -> Result<(), Self::Error>;
}
