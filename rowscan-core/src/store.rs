//! Frame storage shared between the host and the scan tick
//!
//! The host writes whole frames at arbitrary moments; the scan tick reads
//! one row per tick. There is no lock between them. Every cell is an
//! `AtomicU8` accessed with relaxed ordering, so a read always sees some
//! byte that was written (never a torn byte), but a frame written while a
//! cycle is in progress shows up row by row: for one cycle the panel may
//! show old rows above and new rows below. That tear is accepted for
//! [`FrameStore`]. [`DoubleBuffer`] is the opt-in variant that never tears,
//! at the cost of a second bank and a `Busy` result when the host outpaces
//! the scanner.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::frame::{Frame, FrameError};

/// Read side of a store, used by the scanner
pub trait RowSource<const W: usize> {
    /// Called by the scanner at the start of every scan cycle (row 0)
    fn begin_cycle(&self) {}

    /// Copy row `row` into `out`
    ///
    /// Rows outside the store read as dark.
    fn read_row(&self, row: usize, out: &mut [u8; W]);
}

/// Write side of a store, used by the host
pub trait FrameSink {
    /// Replace the whole frame with a flat row-major buffer
    ///
    /// The buffer must be exactly `W * H` bytes; anything else is rejected
    /// without touching the store.
    fn write(&self, data: &[u8]) -> Result<(), FrameError>;

    /// Zero the store
    ///
    /// Only meant for initialisation, while nothing is scanning.
    fn clear(&self);
}

fn check_len(len: usize, expected: usize) -> Result<(), FrameError> {
    if len == expected {
        Ok(())
    } else {
        Err(FrameError::SizeMismatch {
            expected,
            actual: len,
        })
    }
}

/// Single-bank scan buffer
///
/// Designed to live in a `static` and be shared by `&'static` reference
/// between the host and the tick handler.
#[derive(Debug)]
pub struct FrameStore<const W: usize, const H: usize> {
    cells: [[AtomicU8; W]; H],
}

impl<const W: usize, const H: usize> Default for FrameStore<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> FrameStore<W, H> {
    /// Number of bytes in a full frame
    pub const LEN: usize = W * H;

    /// Create a zeroed store
    pub const fn new() -> Self {
        Self {
            cells: [const { [const { AtomicU8::new(0) }; W] }; H],
        }
    }

    /// Bulk-copy a flat row-major buffer into the store
    pub fn write(&self, data: &[u8]) -> Result<(), FrameError> {
        check_len(data.len(), Self::LEN)?;
        for (cell, &byte) in self.cells.iter().flatten().zip(data) {
            cell.store(byte, Ordering::Relaxed);
        }
        Ok(())
    }

    /// Bulk-copy a typed frame into the store
    pub fn write_frame(&self, frame: &Frame<W, H>) {
        for (cell, byte) in self.cells.iter().flatten().zip(frame.bytes()) {
            cell.store(byte, Ordering::Relaxed);
        }
    }

    /// Zero every cell
    pub fn clear(&self) {
        for cell in self.cells.iter().flatten() {
            cell.store(0, Ordering::Relaxed);
        }
    }

    /// Current intensity at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .map(|cell| cell.load(Ordering::Relaxed))
    }

    /// Copy one row out of the store
    ///
    /// Each byte is whatever was stored at the instant it is read.
    pub fn read_row(&self, row: usize, out: &mut [u8; W]) {
        match self.cells.get(row) {
            Some(cells) => {
                for (dst, cell) in out.iter_mut().zip(cells) {
                    *dst = cell.load(Ordering::Relaxed);
                }
            }
            None => out.fill(0),
        }
    }

    /// Copy the whole store into a frame
    pub fn snapshot(&self) -> Frame<W, H> {
        let mut rows = [[0u8; W]; H];
        for (y, row) in rows.iter_mut().enumerate() {
            self.read_row(y, row);
        }
        Frame::from_rows(rows)
    }
}

impl<const W: usize, const H: usize> RowSource<W> for FrameStore<W, H> {
    fn read_row(&self, row: usize, out: &mut [u8; W]) {
        FrameStore::read_row(self, row, out);
    }
}

impl<const W: usize, const H: usize> FrameSink for FrameStore<W, H> {
    fn write(&self, data: &[u8]) -> Result<(), FrameError> {
        FrameStore::write(self, data)
    }

    fn clear(&self) {
        FrameStore::clear(self);
    }
}

/// Two-bank, tear-free scan buffer
///
/// The host always writes the bank the scanner is not reading, then
/// publishes it. The scanner latches the published bank at the start of
/// each cycle, so every cycle shows exactly one frame.
///
/// A single host context may write. While a published frame has not been
/// latched yet, further writes return [`FrameError::Busy`]; the next
/// vsync is the natural moment to retry.
#[derive(Debug)]
pub struct DoubleBuffer<const W: usize, const H: usize> {
    banks: [FrameStore<W, H>; 2],
    /// Bank most recently published by the host
    front: AtomicU8,
    /// Bank the scanner is reading this cycle
    latched: AtomicU8,
}

impl<const W: usize, const H: usize> Default for DoubleBuffer<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> DoubleBuffer<W, H> {
    /// Number of bytes in a full frame
    pub const LEN: usize = W * H;

    /// Create a zeroed double buffer
    pub const fn new() -> Self {
        Self {
            banks: [FrameStore::new(), FrameStore::new()],
            front: AtomicU8::new(0),
            latched: AtomicU8::new(0),
        }
    }

    /// Check whether a published frame is still waiting for the scanner
    pub fn is_pending(&self) -> bool {
        self.front.load(Ordering::Acquire) != self.latched.load(Ordering::Acquire)
    }

    /// Bank the host may write, if any
    fn back_bank(&self) -> Result<&FrameStore<W, H>, FrameError> {
        if self.is_pending() {
            return Err(FrameError::Busy);
        }
        let latched = self.latched.load(Ordering::Acquire) & 1;
        Ok(&self.banks[usize::from(latched ^ 1)])
    }

    fn publish(&self, bank: &FrameStore<W, H>) {
        let index = if core::ptr::eq(bank, &self.banks[0]) { 0 } else { 1 };
        self.front.store(index, Ordering::Release);
    }

    /// Write and publish a flat row-major frame
    pub fn write(&self, data: &[u8]) -> Result<(), FrameError> {
        check_len(data.len(), Self::LEN)?;
        let bank = self.back_bank()?;
        bank.write(data)?;
        self.publish(bank);
        Ok(())
    }

    /// Write and publish a typed frame
    pub fn write_frame(&self, frame: &Frame<W, H>) -> Result<(), FrameError> {
        let bank = self.back_bank()?;
        bank.write_frame(frame);
        self.publish(bank);
        Ok(())
    }

    /// Frame the scanner is currently showing
    pub fn snapshot(&self) -> Frame<W, H> {
        let latched = self.latched.load(Ordering::Acquire) & 1;
        self.banks[usize::from(latched)].snapshot()
    }

    /// Zero both banks and forget any pending frame
    pub fn clear(&self) {
        for bank in &self.banks {
            bank.clear();
        }
        self.front.store(0, Ordering::Release);
        self.latched.store(0, Ordering::Release);
    }
}

impl<const W: usize, const H: usize> RowSource<W> for DoubleBuffer<W, H> {
    fn begin_cycle(&self) {
        let front = self.front.load(Ordering::Acquire);
        self.latched.store(front, Ordering::Release);
    }

    fn read_row(&self, row: usize, out: &mut [u8; W]) {
        let latched = self.latched.load(Ordering::Relaxed) & 1;
        self.banks[usize::from(latched)].read_row(row, out);
    }
}

impl<const W: usize, const H: usize> FrameSink for DoubleBuffer<W, H> {
    fn write(&self, data: &[u8]) -> Result<(), FrameError> {
        DoubleBuffer::write(self, data)
    }

    fn clear(&self) {
        DoubleBuffer::clear(self);
    }
}
