//! Inter-task signals

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use tremor_core::state::ErrorKind;

/// Raised by the activity task when the node enters its fault state
pub static FAULT: Signal<CriticalSectionRawMutex, ErrorKind> = Signal::new();
