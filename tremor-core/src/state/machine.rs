//! State machine definition
//!
//! Sleep, servicing and recovery behavior is a function of the current
//! state and an event.

use super::events::Event;

/// Node states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Power-on: identify, reset and configure the sensor
    Boot,
    /// Interrupt enabled, processor asleep until the next rising edge
    Armed,
    /// Handler running: feedback, acknowledge, clear latch, re-arm
    Servicing,
    /// A service step failed; soft-resetting and reconfiguring the sensor
    Recovering,
    /// Recovery failed; only a power cycle or system reset gets out
    Fault(ErrorKind),
}

/// Failures that move the node out of the service cycle
///
/// Battery guard timeouts are absent: they only suppress feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// A sensor transaction failed (SPI transfer never completed)
    Bus,
}

impl State {
    /// Check if an edge on the interrupt line is acted upon in this state
    ///
    /// The processor only sleeps in this state.
    pub fn accepts_edges(&self) -> bool {
        matches!(self, State::Armed)
    }

    /// Check if this is a fault state
    pub fn is_fault(&self) -> bool {
        matches!(self, State::Fault(_))
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Boot transitions
            (Boot, Configured) => Armed,
            (Boot, ConfigureFailed(kind)) => Fault(kind),

            // Armed transitions
            (Armed, RisingEdge) => Servicing,

            // Servicing transitions
            (Servicing, ServiceComplete) => Armed,
            (Servicing, ServiceFailed(_)) => Recovering,

            // Recovering transitions
            (Recovering, Configured) => Armed,
            (Recovering, ConfigureFailed(kind)) => Fault(kind),

            // Edges during servicing are not queued; the latch is cleared
            // by the handler and the sensor holds its own line until the
            // status read.
            _ => self,
        }
    }
}
