//! Bounded polling
//!
//! Every hardware wait in the node is a busy-wait on a status flag. These
//! waits carry an explicit [`Timeout`]; `Timeout::Unbounded` keeps the
//! strict "spin until the hardware answers" behavior.

/// Poll budget for a busy-wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Timeout {
    /// Spin until the condition holds, however long that takes
    #[default]
    Unbounded,
    /// Give up after this many unsuccessful polls
    Polls(u32),
}

impl Timeout {
    /// Build a timeout from a config value where 0 means unbounded
    pub const fn from_polls(polls: u32) -> Self {
        if polls == 0 {
            Timeout::Unbounded
        } else {
            Timeout::Polls(polls)
        }
    }
}

/// The poll budget ran out before the condition held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimedOut;

/// Spin on `done` until it returns true or the budget is spent
///
/// The condition is checked before any budget is consumed, so a flag that
/// is already set succeeds even with `Timeout::Polls(0)`. Returns the number
/// of unsuccessful polls.
pub fn poll_until<F>(timeout: Timeout, mut done: F) -> Result<u32, TimedOut>
where
    F: FnMut() -> bool,
{
    let mut polls: u32 = 0;

    loop {
        if done() {
            return Ok(polls);
        }

        if let Timeout::Polls(limit) = timeout {
            if polls >= limit {
                return Err(TimedOut);
            }
        }

        polls = polls.saturating_add(1);
        core::hint::spin_loop();
    }
}
