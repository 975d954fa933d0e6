//! Embassy async tasks
//!
//! The activity task owns every peripheral; the supervisor only waits
//! for a fault.

pub mod activity;
pub mod supervisor;

pub use activity::activity_task;
pub use supervisor::supervisor_task;
