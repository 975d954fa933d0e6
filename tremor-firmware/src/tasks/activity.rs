//! Activity task
//!
//! Brings the sensor up, then sleeps on INT1 and services each rising
//! edge. Servicing is synchronous: the blink busy-waits and nothing else
//! runs until the sensor has been acknowledged and re-armed.

use defmt::*;
use embassy_time::Delay;

use tremor_core::state::State;
use tremor_drivers::{ActivityMonitor, PolledTransport, Presence};
use tremor_hal_rp2040::{InterruptLine, Pl022Shifter, PolledAdc, PushPull};

use crate::channels::FAULT;

/// Monitor wired to the RP2040 peripherals
pub type NodeMonitor = ActivityMonitor<
    PolledTransport<Pl022Shifter<'static>>,
    PushPull<'static>,
    PushPull<'static>,
    Delay,
    PolledAdc<'static>,
>;

#[embassy_executor::task]
pub async fn activity_task(mut monitor: NodeMonitor, mut line: InterruptLine<'static>) {
    info!(
        "Activity task started (variant: {})",
        monitor.config().variant.name()
    );

    match monitor.boot() {
        Ok(Presence::Found) => info!("ADXL362 found and configured"),
        Ok(Presence::Absent { id }) => {
            warn!("ADXL362 not found (id {=u8:#x}), configured anyway", id)
        }
        Err(e) => error!("Sensor bring-up failed: {:?}", e),
    }

    loop {
        if let State::Fault(kind) = monitor.state() {
            FAULT.signal(kind);
            return;
        }

        line.wait_for_rising_edge().await;

        match monitor.service(&mut line) {
            Ok(Some(report)) => {
                debug!(
                    "Edge serviced: status={:?} guard={:?}",
                    report.status, report.guard
                );
                if !report.feedback {
                    warn!("Feedback skipped: {:?}", report.guard);
                }
                if !report.status.has_motion() {
                    warn!(
                        "Edge without motion flags ({} so far)",
                        monitor.stats().motionless
                    );
                }
            }
            Ok(None) => trace!("Edge ignored in {:?}", monitor.state()),
            Err(e) => {
                let stats = monitor.stats();
                warn!(
                    "Service failed: {:?} (state {:?}, recoveries {})",
                    e,
                    monitor.state(),
                    stats.recoveries
                );
            }
        }
    }
}
