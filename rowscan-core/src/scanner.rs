//! Row-scanning state machine
//!
//! Called once per timer tick. A full cycle is `H + 1` ticks: one tick per
//! row, then a blank slot in which the host is notified.
//!
//! ```text
//!   tick:   0      1      ...    H-1      H
//!   slot:  Row(0) Row(1) ...  Row(H-1)  Blank ──► vsync, row = 0
//! ```
//!
//! Every tick starts by blanking the panel, so the row lit during the
//! previous tick goes dark before its column data is replaced. The row
//! address only ever changes while the panel is blank.

use crate::config::{ConfigError, ScanConfig};
use crate::encoder::OutputEncoder;
use crate::store::RowSource;
use crate::traits::ScanPort;
use crate::vsync::{VsyncHandler, VsyncNotifier};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which slot a tick handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanSlot {
    /// A real row was shifted out and lit
    Row(usize),
    /// The dark vsync slot
    Blank,
}

/// How "no row lit" is expressed on the hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RowActivation {
    /// Select a multiplexer address that is wired to no row, shift, then
    /// select the real row
    BlankThenSelect {
        /// Address wired to no row
        blank_address: u8,
    },
    /// Drop a dedicated enable line, shift, select the row, raise enable
    DirectEnableLine,
}

/// Order in which a row's columns go into the shift register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColumnOrder {
    /// Column 0 is shifted first
    #[default]
    FirstToLast,
    /// Column `W - 1` is shifted first
    LastToFirst,
}

/// The scan state machine
///
/// Owns the output encoder (and with it any dithering carries) and the
/// current row. The frame store, port and vsync notifier are passed in on
/// every tick so the scanner itself never shares state.
#[derive(Debug, Clone)]
pub struct RowScanner<E, const W: usize, const H: usize> {
    encoder: E,
    config: ScanConfig,
    /// Next row to scan; `H` is the blank slot
    row: usize,
}

impl<E, const W: usize, const H: usize> RowScanner<E, W, H>
where
    E: OutputEncoder<W, H>,
{
    /// Create a scanner at row 0
    pub fn new(encoder: E, config: ScanConfig) -> Result<Self, ConfigError> {
        config.validate::<H>()?;
        Ok(Self {
            encoder,
            config,
            row: 0,
        })
    }

    /// Row the next tick will scan (`H` = blank slot)
    pub fn row(&self) -> usize {
        self.row
    }

    /// Slot the next tick will handle
    pub fn next_slot(&self) -> ScanSlot {
        if self.row < H {
            ScanSlot::Row(self.row)
        } else {
            ScanSlot::Blank
        }
    }

    /// Restart from row 0
    pub fn reset(&mut self) {
        self.row = 0;
    }

    /// Scan configuration
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Output encoder
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Mutable output encoder
    pub fn encoder_mut(&mut self) -> &mut E {
        &mut self.encoder
    }

    /// Put the panel into the blank state
    pub fn blank<P: ScanPort>(&self, port: &mut P) {
        match self.config.activation {
            RowActivation::BlankThenSelect { blank_address } => {
                port.set_row_address(blank_address);
            }
            RowActivation::DirectEnableLine => port.set_output_enable(false),
        }
    }

    /// Light `row` with the data currently in the column register
    fn activate<P: ScanPort>(&self, port: &mut P, row: usize) {
        let address = self.config.row_address(row);
        match self.config.activation {
            RowActivation::BlankThenSelect { .. } => port.set_row_address(address),
            RowActivation::DirectEnableLine => {
                port.set_row_address(address);
                port.set_output_enable(true);
            }
        }
    }

    /// Handle one timer tick
    ///
    /// Bounded work: at most `W` encoder steps and `W + 3` port writes, no
    /// allocation, no waiting.
    pub fn tick<P, S, V>(
        &mut self,
        port: &mut P,
        source: &S,
        vsync: &mut VsyncNotifier<V>,
    ) -> ScanSlot
    where
        P: ScanPort,
        S: RowSource<W> + ?Sized,
        V: VsyncHandler,
    {
        self.blank(port);

        if self.row >= H {
            vsync.notify();
            self.row = 0;
            return ScanSlot::Blank;
        }

        let row = self.row;
        if row == 0 {
            source.begin_cycle();
        }

        let mut line = [0u8; W];
        source.read_row(row, &mut line);

        match self.config.column_order {
            ColumnOrder::FirstToLast => {
                for (col, &value) in line.iter().enumerate() {
                    port.shift_bit(self.encoder.encode(row, col, value));
                }
            }
            ColumnOrder::LastToFirst => {
                for (col, &value) in line.iter().enumerate().rev() {
                    port.shift_bit(self.encoder.encode(row, col, value));
                }
            }
        }
        port.latch();

        // Address of the row just shifted, selected only now that its data is in place
        self.activate(port, row);
        self.row = row + 1;
        ScanSlot::Row(row)
    }
}
