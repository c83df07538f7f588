//! Row address bus on the SIO output register
//!
//! The address lines all live in GPIO bank 0, so a single store to the SIO
//! XOR register flips exactly the lines that differ. The multiplexer goes
//! from the old address straight to the new one.

use embassy_rp::gpio::{AnyPin, Level, Output, Pin};
use embassy_rp::{pac, Peri};
use rowscan_hal::bus::{bus_mask, line_capacity, line_mask};
use rowscan_hal::AddressBus;

/// `A` multiplexer address lines switched in one register write
pub struct SioAddressBus<'d, const A: usize> {
    // Owned so the pins stay configured as SIO outputs
    _lines: [Output<'d>; A],
    pins: [u8; A],
    mask: u32,
}

impl<'d, const A: usize> SioAddressBus<'d, A> {
    /// Configure `lines` as outputs at address 0
    ///
    /// `lines[0]` is the least significant address bit.
    pub fn new(lines: [Peri<'d, AnyPin>; A]) -> Self {
        let pins = lines.each_ref().map(|line| line.pin());
        let lines = lines.map(|line| Output::new(line, Level::Low));
        Self {
            _lines: lines,
            pins,
            mask: bus_mask(&pins),
        }
    }

    /// Address currently on the lines
    pub fn address(&self) -> u8 {
        let out = pac::SIO.gpio_out(0).value().read();
        self.pins
            .iter()
            .enumerate()
            .filter(|&(_, &pin)| out & (1 << pin) != 0)
            .fold(0, |address, (bit, _)| address | (1 << bit))
    }
}

impl<const A: usize> AddressBus for SioAddressBus<'_, A> {
    fn capacity(&self) -> usize {
        line_capacity(A)
    }

    #[inline]
    fn write(&mut self, address: u8) {
        let out = pac::SIO.gpio_out(0);
        let current = out.value().read() & self.mask;
        out.value_xor()
            .write_value(current ^ line_mask(&self.pins, address));
    }

    fn is_atomic(&self) -> bool {
        true
    }
}
