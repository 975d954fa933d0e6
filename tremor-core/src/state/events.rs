//! Events that trigger state transitions

use super::machine::ErrorKind;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Configuration events
    /// Configuration sequence written (after boot or recovery)
    Configured,
    /// Configuration sequence could not be written
    ConfigureFailed(ErrorKind),

    // Interrupt events
    /// Rising edge latched on the sensor interrupt line
    RisingEdge,

    // Handler events
    /// Handler finished: status acknowledged, latch cleared, re-armed
    ServiceComplete,
    /// A handler step timed out
    ServiceFailed(ErrorKind),
}
