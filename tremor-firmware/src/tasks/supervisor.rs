//! Fault supervisor
//!
//! Recovery already failed by the time a fault is raised; the only way
//! out is a full reset.

use defmt::*;
use embassy_time::{Duration, Timer};

use crate::channels::FAULT;

/// Time the fault LED stays lit before the reset
const RESET_DELAY_MS: u64 = 5_000;

#[embassy_executor::task]
pub async fn supervisor_task() {
    let kind = FAULT.wait().await;
    error!("Node fault: {:?}, resetting in {} ms", kind, RESET_DELAY_MS);

    Timer::after(Duration::from_millis(RESET_DELAY_MS)).await;
    cortex_m::peripheral::SCB::sys_reset();
}
