//! Address bus over individual output lines
//!
//! Each line is written separately, so between the first and the last write
//! the multiplexer sees mixed addresses. That is harmless only while the
//! row drivers are held off by an enable line.

use rowscan_hal::bus::line_capacity;
use rowscan_hal::{AddressBus, OutputPin};

/// `A` multiplexer address lines driven one at a time
pub struct PinBus<P, const A: usize> {
    lines: [P; A],
}

impl<P: OutputPin, const A: usize> PinBus<P, A> {
    /// Take the lines and drive address 0
    ///
    /// `lines[0]` is the least significant address bit.
    pub fn new(lines: [P; A]) -> Self {
        let mut bus = Self { lines };
        for line in bus.lines.iter_mut() {
            line.set_low();
        }
        bus
    }

    /// Address currently on the lines
    pub fn address(&self) -> usize {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_set_high())
            .fold(0, |address, (bit, _)| address | (1 << bit))
    }

    /// Hand back the lines
    pub fn release(self) -> [P; A] {
        self.lines
    }
}

impl<P: OutputPin, const A: usize> AddressBus for PinBus<P, A> {
    fn capacity(&self) -> usize {
        line_capacity(A)
    }

    fn write(&mut self, address: u8) {
        for (bit, line) in self.lines.iter_mut().enumerate() {
            line.set_state(bit < 8 && address & (1 << bit) != 0);
        }
    }

    fn is_atomic(&self) -> bool {
        A <= 1
    }
}
