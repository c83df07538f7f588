//! Host-side frame type
//!
//! A [`Frame`] is a plain `H x W` grid of 8-bit intensities owned by whoever
//! is composing the next image. It is handed to a store in one bulk copy.

/// Errors that can occur when handing a frame to a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Buffer length is not exactly `W * H`
    SizeMismatch {
        /// Required length in bytes
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },
    /// A double-buffered store still holds a published frame the scanner
    /// has not picked up yet
    Busy,
}

/// Full-frame intensity grid, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<const W: usize, const H: usize> {
    rows: [[u8; W]; H],
}

impl<const W: usize, const H: usize> Default for Frame<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Frame<W, H> {
    /// Number of bytes in a flat frame buffer
    pub const LEN: usize = W * H;

    /// Create an all-dark frame
    pub const fn new() -> Self {
        Self { rows: [[0; W]; H] }
    }

    /// Create a frame from row arrays
    pub const fn from_rows(rows: [[u8; W]; H]) -> Self {
        Self { rows }
    }

    /// Create a frame from a flat row-major buffer
    pub fn from_bytes(data: &[u8]) -> Result<Self, FrameError> {
        if data.len() != Self::LEN {
            return Err(FrameError::SizeMismatch {
                expected: Self::LEN,
                actual: data.len(),
            });
        }
        let mut frame = Self::new();
        for (cell, &byte) in frame.rows.iter_mut().flatten().zip(data) {
            *cell = byte;
        }
        Ok(frame)
    }

    /// Intensity at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Set the intensity at column `x`, row `y`
    ///
    /// Returns false (and changes nothing) when out of range.
    pub fn set(&mut self, x: usize, y: usize, value: u8) -> bool {
        match self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// One row
    pub fn row(&self, y: usize) -> Option<&[u8; W]> {
        self.rows.get(y)
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> &[[u8; W]; H] {
        &self.rows
    }

    /// Set every pixel to `value`
    pub fn fill(&mut self, value: u8) {
        for row in self.rows.iter_mut() {
            row.fill(value);
        }
    }

    /// Iterate over all intensities in row-major order
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// Copy into a flat row-major buffer
    pub fn copy_to(&self, out: &mut [u8]) -> Result<(), FrameError> {
        if out.len() != Self::LEN {
            return Err(FrameError::SizeMismatch {
                expected: Self::LEN,
                actual: out.len(),
            });
        }
        for (dst, src) in out.iter_mut().zip(self.bytes()) {
            *dst = src;
        }
        Ok(())
    }
}
