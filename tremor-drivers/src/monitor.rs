//! Activity monitor
//!
//! Owns the sensor, the feedback indicator and the optional battery guard,
//! and drives them through the node state machine:
//!
//! ```text
//! Boot --configured--> Armed --edge--> Servicing --done--> Armed
//!                                          |
//!                                        failed
//!                                          v
//!                     Fault <--failed-- Recovering --configured--> Armed
//! ```
//!
//! One service cycle, in order:
//! 1. Sample the battery (battery-guarded variant only)
//! 2. Blink, unless the guard vetoed it
//! 3. Read STATUS, which acknowledges the sensor and releases its INT line
//! 4. Clear the edge latch
//! 5. Re-issue the power control write (auto-exiting wake-up mode only)
//!
//! The guard never suppresses steps 3 to 5.

use embedded_hal::delay::DelayNs;
use tremor_core::config::NodeConfig;
use tremor_core::state::{ErrorKind, Event, State};
use tremor_hal::{AdcConverter, EdgeLatch, EdgeWait, OutputPin};

use crate::battery::{BatteryGuard, GuardOutcome};
use crate::feedback::Feedback;
use crate::sensor::registers::reg;
use crate::sensor::{Adxl362, Adxl362Error, Presence, StatusFlags};
use crate::sequencer;
use crate::transport::Transport;

/// What one service cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServiceReport {
    /// Status read that acknowledged the event
    pub status: StatusFlags,
    /// Battery guard verdict
    pub guard: GuardOutcome,
    /// Whether the blink ran
    pub feedback: bool,
    /// Whether measurement was restarted
    pub restarted: bool,
}

/// Service counters since boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServiceStats {
    /// Edges serviced to completion
    pub serviced: u32,
    /// Edges where the guard vetoed feedback
    pub suppressed: u32,
    /// Successful recoveries
    pub recoveries: u32,
    /// Edges seen outside the armed state
    pub ignored: u32,
    /// Serviced edges whose status showed neither activity nor awake
    pub motionless: u32,
}

/// Event loop errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunError<E> {
    /// The edge source failed
    Edge(E),
    /// Recovery failed; the node is in its fault state
    Fault(ErrorKind),
}

/// Motion-wake handler
pub struct ActivityMonitor<T, CS, LED, D, ADC> {
    sensor: Adxl362<T, CS>,
    feedback: Feedback<LED, D>,
    guard: Option<BatteryGuard<ADC>>,
    config: NodeConfig,
    state: State,
    stats: ServiceStats,
}

impl<T, CS, LED, D, ADC> ActivityMonitor<T, CS, LED, D, ADC>
where
    T: Transport,
    CS: OutputPin,
    LED: OutputPin,
    D: DelayNs,
    ADC: AdcConverter,
{
    /// Create a monitor in the boot state
    ///
    /// The guard is only consulted when the configured variant is
    /// battery-guarded.
    pub fn new(
        sensor: Adxl362<T, CS>,
        feedback: Feedback<LED, D>,
        guard: Option<BatteryGuard<ADC>>,
        config: NodeConfig,
    ) -> Self {
        Self {
            sensor,
            feedback,
            guard,
            config,
            state: State::Boot,
            stats: ServiceStats::default(),
        }
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    pub fn stats(&self) -> ServiceStats {
        self.stats
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Bring the sensor up and arm
    ///
    /// Soft reset, identify, show the result on the LED, soft reset again,
    /// then write the configuration. A missing sensor is only reported
    /// through the LED and the returned presence; configuration still runs.
    pub fn boot(&mut self) -> Result<Presence, Adxl362Error<T::Error>> {
        let result = self.bring_up();

        let event = match result {
            Ok(_) => Event::Configured,
            Err(_) => Event::ConfigureFailed(ErrorKind::Bus),
        };
        self.state = self.state.transition(event);
        if self.state.is_fault() {
            self.feedback.hold_on();
        }

        result
    }

    fn bring_up(&mut self) -> Result<Presence, Adxl362Error<T::Error>> {
        self.sensor.soft_reset()?;
        let presence = self.sensor.presence()?;
        self.feedback.show_presence(presence);

        sequencer::reset_and_configure(&mut self.sensor, &self.config.sensor)?;

        Ok(presence)
    }

    /// Service one latched rising edge
    ///
    /// Edges outside `Armed` are cleared and ignored. On a failed cycle
    /// the monitor recovers by soft-resetting and reconfiguring the sensor;
    /// if that also fails it enters `Fault`. The cycle's error is returned
    /// either way.
    pub fn service<L: EdgeLatch>(
        &mut self,
        latch: &mut L,
    ) -> Result<Option<ServiceReport>, Adxl362Error<T::Error>> {
        if !self.state.accepts_edges() {
            latch.clear();
            self.stats.ignored = self.stats.ignored.wrapping_add(1);
            return Ok(None);
        }

        self.state = self.state.transition(Event::RisingEdge);

        match self.run_cycle(latch) {
            Ok(report) => {
                self.state = self.state.transition(Event::ServiceComplete);
                self.stats.serviced = self.stats.serviced.wrapping_add(1);
                if !report.feedback && report.guard != GuardOutcome::Unguarded {
                    self.stats.suppressed = self.stats.suppressed.wrapping_add(1);
                }
                if !report.status.has_motion() {
                    self.stats.motionless = self.stats.motionless.wrapping_add(1);
                }
                Ok(Some(report))
            }
            Err(err) => {
                // The latch may still be set if the cycle died before step 4
                latch.clear();
                self.state = self
                    .state
                    .transition(Event::ServiceFailed(ErrorKind::Bus));
                self.recover();
                Err(err)
            }
        }
    }

    fn run_cycle<L: EdgeLatch>(
        &mut self,
        latch: &mut L,
    ) -> Result<ServiceReport, Adxl362Error<T::Error>> {
        let guard = match self.guard.as_mut() {
            Some(guard) if self.config.variant.is_battery_guarded() => guard.evaluate(),
            _ => GuardOutcome::Unguarded,
        };

        let feedback = guard.allows_feedback();
        if feedback {
            self.feedback.blink();
        }

        let status = self.sensor.status_flags()?;

        latch.clear();

        let restarted = self.config.restarts_measurement();
        if restarted {
            self.sensor
                .write_register(reg::POWER_CTL, self.config.sensor.power_mode)?;
        }

        Ok(ServiceReport {
            status,
            guard,
            feedback,
            restarted,
        })
    }

    fn recover(&mut self) {
        let event = match sequencer::reset_and_configure(&mut self.sensor, &self.config.sensor) {
            Ok(()) => {
                self.stats.recoveries = self.stats.recoveries.wrapping_add(1);
                Event::Configured
            }
            Err(_) => Event::ConfigureFailed(ErrorKind::Bus),
        };
        self.state = self.state.transition(event);

        if self.state.is_fault() {
            self.feedback.hold_on();
        }
    }

    /// Wait for an edge and service it
    pub fn run_once<W: EdgeWait>(
        &mut self,
        edges: &mut W,
    ) -> Result<Option<ServiceReport>, RunError<W::Error>> {
        edges.wait_for_edge().map_err(RunError::Edge)?;

        match self.service(edges) {
            Ok(report) => Ok(report),
            Err(_) => match self.state {
                State::Fault(kind) => Err(RunError::Fault(kind)),
                _ => Ok(None),
            },
        }
    }

    /// Service edges until the edge source fails or the node faults
    pub fn run<W: EdgeWait>(&mut self, edges: &mut W) -> RunError<W::Error> {
        loop {
            if let Err(err) = self.run_once(edges) {
                return err;
            }
        }
    }
}
