//! Test doubles for the scan port and the tick timer

use rowscan_hal::{PeriodicTimer, TickPeriod};

use crate::traits::ScanPort;

/// One write to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortEvent {
    Shift(bool),
    Latch,
    Address(u8),
    Enable(bool),
}

/// Port that records every write
#[derive(Debug)]
pub struct RecordingPort {
    events: Vec<PortEvent>,
    capacity: Option<usize>,
    /// Reported as the port's address atomicity
    pub atomic: bool,
}

impl Default for RecordingPort {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            capacity: None,
            atomic: true,
        }
    }
}

impl RecordingPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Port whose address lines select `capacity` rows
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Drain the recorded events
    pub fn take(&mut self) -> Vec<PortEvent> {
        core::mem::take(&mut self.events)
    }

    /// Bits shifted since the last `take`
    pub fn shifted(&self) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PortEvent::Shift(bit) => Some(*bit),
                _ => None,
            })
            .collect()
    }

    /// Row addresses written since the last `take`
    pub fn addresses(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PortEvent::Address(a) => Some(*a),
                _ => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<PortEvent> {
        self.events.last().copied()
    }
}

impl ScanPort for RecordingPort {
    fn shift_bit(&mut self, lit: bool) {
        self.events.push(PortEvent::Shift(lit));
    }

    fn latch(&mut self) {
        self.events.push(PortEvent::Latch);
    }

    fn set_row_address(&mut self, address: u8) {
        self.events.push(PortEvent::Address(address));
    }

    fn address_capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn address_is_atomic(&self) -> bool {
        self.atomic
    }

    fn set_output_enable(&mut self, enabled: bool) {
        self.events.push(PortEvent::Enable(enabled));
    }
}

/// Timer that only remembers how it was driven
#[derive(Debug, Default)]
pub struct MockTimer {
    pub period: Option<TickPeriod>,
    pub arm_count: usize,
    pub detach_count: usize,
}

impl PeriodicTimer for MockTimer {
    fn arm(&mut self, period: TickPeriod) {
        self.period = Some(period);
        self.arm_count += 1;
    }

    fn detach(&mut self) {
        self.period = None;
        self.detach_count += 1;
    }

    fn is_armed(&self) -> bool {
        self.period.is_some()
    }
}
