//! State machine for the activity interrupt handler
//!
//! The node is either asleep waiting for an edge or servicing one.
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{ErrorKind, State};
