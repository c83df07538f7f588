//! Output encoders
//!
//! An encoder turns a stored pixel value into the single bit that is
//! shifted out for the current scan. The choice is made at construction
//! time through the type parameter of the scanner, so the carry grid only
//! exists for the dithered encoder.

use crate::dither::{dither_step, CarrySeed};

/// Converts stored pixel values into column bits
pub trait OutputEncoder<const W: usize, const H: usize> {
    /// Bit to display for pixel (`col`, `row`) holding `value`
    fn encode(&mut self, row: usize, col: usize, value: u8) -> bool;
}

/// Two-state output: any non-zero value is lit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Binary;

impl<const W: usize, const H: usize> OutputEncoder<W, H> for Binary {
    #[inline(always)]
    fn encode(&mut self, _row: usize, _col: usize, value: u8) -> bool {
        value != 0
    }
}

/// Multi-level output through per-pixel temporal dithering
///
/// Holds one carry per pixel. Carries persist across frames, so a pixel
/// that keeps its intensity through a frame change keeps its exact duty
/// cycle.
#[derive(Debug, Clone)]
pub struct Dithered<const W: usize, const H: usize> {
    carry: [[u8; W]; H],
}

impl<const W: usize, const H: usize> Default for Dithered<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Dithered<W, H> {
    /// Create an encoder with every carry at zero
    pub const fn new() -> Self {
        Self { carry: [[0; W]; H] }
    }

    /// Create an encoder with pseudo-random starting carries
    ///
    /// Pixels at the same intensity then light on different scans instead
    /// of all at once.
    pub fn seeded(seed: u32) -> Self {
        let mut encoder = Self::new();
        let mut rng = CarrySeed::new(seed);
        for carry in encoder.carry.iter_mut().flatten() {
            *carry = rng.next_carry();
        }
        encoder
    }

    /// Current carry of pixel (`col`, `row`)
    pub fn carry(&self, row: usize, col: usize) -> Option<u8> {
        self.carry.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Zero every carry
    pub fn reset(&mut self) {
        for row in self.carry.iter_mut() {
            row.fill(0);
        }
    }
}

impl<const W: usize, const H: usize> OutputEncoder<W, H> for Dithered<W, H> {
    #[inline(always)]
    fn encode(&mut self, row: usize, col: usize, value: u8) -> bool {
        match self.carry.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(carry) => {
                let (lit, next) = dither_step(*carry, value);
                *carry = next;
                lit
            }
            None => false,
        }
    }
}
