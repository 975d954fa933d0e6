//! Recording test doubles
//!
//! [`SimBus`] simulates the accelerometer's register file behind a shared
//! handle so tests can hand the transport and chip-select to the driver and
//! still inspect every byte and chip-select edge afterwards.

extern crate std;

use core::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use tremor_hal::{AdcConverter, EdgeLatch, EdgeWait, OutputPin};

use crate::sensor::registers::{cmd, reg, DEVICE_ID};
use crate::transport::{Transport, TransportError};

/// One observable bus event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    /// Chip-select driven low
    Select,
    /// Chip-select driven high
    Deselect,
    /// Byte clocked out by the host
    Byte(u8),
}

/// Simulated accelerometer
pub struct SimDevice {
    pub registers: [u8; 64],
    pub device_id: u8,
    pub events: Vec<BusEvent>,
    pub writes: Vec<(u8, u8)>,
    pub reads: Vec<u8>,
    /// Bytes exchanged while chip-select was high
    pub unselected_bytes: usize,
    /// Frames cut short by a chip-select release
    pub partial_frames: usize,
    fail_at: Option<usize>,
    exchanged: usize,
    selected: bool,
    frame: [u8; 3],
    frame_len: usize,
}

impl SimDevice {
    fn new(device_id: u8) -> Self {
        let mut device = Self {
            registers: [0; 64],
            device_id,
            events: Vec::new(),
            writes: Vec::new(),
            reads: Vec::new(),
            unselected_bytes: 0,
            partial_frames: 0,
            fail_at: None,
            exchanged: 0,
            selected: false,
            frame: [0; 3],
            frame_len: 0,
        };
        device.power_on();
        device
    }

    fn power_on(&mut self) {
        self.registers = [0; 64];
        self.registers[reg::DEVID_AD as usize] = self.device_id;
    }

    fn select(&mut self, selected: bool) {
        if selected {
            self.events.push(BusEvent::Select);
            self.frame_len = 0;
        } else {
            self.events.push(BusEvent::Deselect);
            if self.frame_len != 0 && self.frame_len != 3 {
                self.partial_frames += 1;
            }
        }
        self.selected = selected;
    }

    fn exchange(&mut self, value: u8) -> Result<u8, TransportError> {
        if let Some(limit) = self.fail_at {
            if self.exchanged >= limit {
                return Err(TransportError::Timeout);
            }
        }
        self.exchanged += 1;
        self.events.push(BusEvent::Byte(value));

        if !self.selected {
            self.unselected_bytes += 1;
            return Ok(0x00);
        }

        if self.frame_len >= 3 {
            return Ok(0x00);
        }
        self.frame[self.frame_len] = value;
        self.frame_len += 1;

        if self.frame_len < 3 {
            return Ok(0x00);
        }

        let address = self.frame[1];
        let index = (address & 0x3F) as usize;
        match self.frame[0] {
            cmd::READ => {
                self.reads.push(address);
                Ok(self.registers[index])
            }
            cmd::WRITE => {
                self.writes.push((address, value));
                if address == reg::SOFT_RESET {
                    self.power_on();
                } else {
                    self.registers[index] = value;
                }
                Ok(0x00)
            }
            _ => Ok(0x00),
        }
    }

    /// Fail every exchange after `bytes` more have gone through
    pub fn fail_after(&mut self, bytes: usize) {
        self.fail_at = Some(self.exchanged + bytes);
    }

    /// Answer every exchange again
    pub fn heal(&mut self) {
        self.fail_at = None;
    }
}

/// Shared handle to a simulated accelerometer
#[derive(Clone)]
pub struct SimBus(Rc<RefCell<SimDevice>>);

impl SimBus {
    /// Simulated ADXL362
    pub fn new() -> Self {
        Self::with_id(DEVICE_ID)
    }

    /// Simulated device answering with another ID
    pub fn with_id(device_id: u8) -> Self {
        Self(Rc::new(RefCell::new(SimDevice::new(device_id))))
    }

    pub fn transport(&self) -> SimTransport {
        SimTransport(self.0.clone())
    }

    pub fn cs(&self) -> SimCs {
        SimCs(self.0.clone())
    }

    /// Inspect or modify the device
    pub fn with<R>(&self, f: impl FnOnce(&mut SimDevice) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.0.borrow().writes.clone()
    }

    pub fn events(&self) -> Vec<BusEvent> {
        self.0.borrow().events.clone()
    }

    /// Forget recorded traffic, keep register contents
    pub fn clear_log(&self) {
        let mut device = self.0.borrow_mut();
        device.events.clear();
        device.writes.clear();
        device.reads.clear();
    }

    pub fn set_register(&self, address: u8, value: u8) {
        self.0.borrow_mut().registers[(address & 0x3F) as usize] = value;
    }

    pub fn register(&self, address: u8) -> u8 {
        self.0.borrow().registers[(address & 0x3F) as usize]
    }
}

pub struct SimTransport(Rc<RefCell<SimDevice>>);

impl Transport for SimTransport {
    type Error = TransportError;

    fn exchange_byte(&mut self, value: u8) -> Result<u8, TransportError> {
        self.0.borrow_mut().exchange(value)
    }
}

pub struct SimCs(Rc<RefCell<SimDevice>>);

impl OutputPin for SimCs {
    fn set_high(&mut self) {
        self.0.borrow_mut().select(false);
    }

    fn set_low(&mut self) {
        self.0.borrow_mut().select(true);
    }

    fn toggle(&mut self) {
        let selected = self.0.borrow().selected;
        self.0.borrow_mut().select(!selected);
    }

    fn is_set_high(&self) -> bool {
        !self.0.borrow().selected
    }
}

/// LED that counts toggles
#[derive(Clone, Default)]
pub struct MockLed {
    pub high: Rc<Cell<bool>>,
    pub toggles: Rc<Cell<u32>>,
}

impl OutputPin for MockLed {
    fn set_high(&mut self) {
        self.high.set(true);
    }

    fn set_low(&mut self) {
        self.high.set(false);
    }

    fn toggle(&mut self) {
        self.high.set(!self.high.get());
        self.toggles.set(self.toggles.get() + 1);
    }

    fn is_set_high(&self) -> bool {
        self.high.get()
    }
}

/// Delay that only adds up the requested time
#[derive(Clone, Default)]
pub struct MockDelay {
    pub total_ns: Rc<Cell<u64>>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }
}

/// ADC returning a fixed sample after a number of busy polls
pub struct MockAdc {
    pub value: u16,
    pub busy_polls: u32,
    /// Never finish a conversion
    pub stuck: bool,
    pub resolution_bits: u8,
    pub conversions: Rc<Cell<u32>>,
    remaining: Cell<u32>,
}

impl MockAdc {
    pub fn new(value: u16) -> Self {
        Self {
            value,
            busy_polls: 2,
            stuck: false,
            resolution_bits: 12,
            conversions: Rc::new(Cell::new(0)),
            remaining: Cell::new(0),
        }
    }

    pub fn stuck() -> Self {
        Self {
            stuck: true,
            ..Self::new(0)
        }
    }
}

impl AdcConverter for MockAdc {
    fn start(&mut self) {
        self.conversions.set(self.conversions.get() + 1);
        self.remaining.set(self.busy_polls);
    }

    fn is_busy(&self) -> bool {
        if self.stuck {
            return true;
        }
        let remaining = self.remaining.get();
        if remaining == 0 {
            return false;
        }
        self.remaining.set(remaining - 1);
        true
    }

    fn sample(&mut self) -> u16 {
        self.value
    }

    fn resolution_bits(&self) -> u8 {
        self.resolution_bits
    }
}

/// Interrupt line delivering a fixed number of edges
pub struct MockEdges {
    pub remaining: u32,
    pub pending: bool,
    pub clears: Rc<Cell<u32>>,
}

impl MockEdges {
    pub fn new(edges: u32) -> Self {
        Self {
            remaining: edges,
            pending: false,
            clears: Rc::new(Cell::new(0)),
        }
    }
}

/// No more scripted edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exhausted;

impl EdgeLatch for MockEdges {
    fn is_pending(&self) -> bool {
        self.pending
    }

    fn clear(&mut self) {
        self.pending = false;
        self.clears.set(self.clears.get() + 1);
    }
}

impl EdgeWait for MockEdges {
    type Error = Exhausted;

    fn wait_for_edge(&mut self) -> Result<(), Exhausted> {
        if self.remaining == 0 {
            return Err(Exhausted);
        }
        self.remaining -= 1;
        self.pending = true;
        Ok(())
    }
}
