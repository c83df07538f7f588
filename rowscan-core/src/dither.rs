//! Temporal dithering
//!
//! Each pixel owns an 8-bit carry. Every scan adds the pixel's intensity to
//! its carry; an overflow past 255 lights the LED for that scan and keeps
//! the remainder. Over any 256 consecutive scans at a constant intensity
//! `i`, the pixel is lit exactly `i` times and the carry returns to where it
//! started, so the duty cycle is exact and never drifts.

/// One accumulate-and-carry step
///
/// Returns `(lit, new_accumulator)`. `lit` is true when
/// `accumulator + intensity > 255`, in which case 256 is subtracted.
#[inline(always)]
pub const fn dither_step(accumulator: u8, intensity: u8) -> (bool, u8) {
    let sum = accumulator as u16 + intensity as u16;
    // Truncation is the "- 256" of the carry
    (sum > 0xFF, sum as u8)
}

/// Seed sequence for decorrelating pixel carries
///
/// A xorshift32 generator. Seeding carries with different values makes
/// pixels of equal intensity light on different scans, which turns a
/// whole-panel flicker into an even shimmer.
#[derive(Debug, Clone)]
pub struct CarrySeed {
    state: u32,
}

impl CarrySeed {
    /// Create a generator; a zero seed is replaced with a fixed non-zero one
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    /// Next carry value
    pub fn next_carry(&mut self) -> u8 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        (x >> 24) as u8
    }
}
