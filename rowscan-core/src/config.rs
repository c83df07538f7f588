//! Driver configuration
//!
//! Plain `Copy` structs chosen once at driver construction. Geometry is not
//! part of the configuration: it is fixed by the `W`/`H` const generics.

use rowscan_hal::TickPeriod;

use crate::scanner::{ColumnOrder, RowActivation};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default scan tick: 100 µs, i.e. 10 kHz
pub const DEFAULT_TICK_PERIOD_US: u32 = 100;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick period of zero
    ZeroTickPeriod,
    /// `address_offset + rows` does not fit the row address lines
    AddressOutOfRange,
    /// The blank sentinel is also the address of a real row
    BlankAddressCollides,
    /// Blanking by sentinel needs address writes that never pass through
    /// another row
    AddressNotAtomic,
    /// Gamma must be finite and positive
    InvalidGamma,
}

/// How the scanner talks to the row and column hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanConfig {
    /// Blanking mechanism
    pub activation: RowActivation,
    /// Order in which columns are shifted out
    pub column_order: ColumnOrder,
    /// Multiplexer address of row 0
    ///
    /// Some boards reserve address 0 for "no row" and wire row `r` to
    /// address `r + 1`.
    pub address_offset: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            activation: RowActivation::BlankThenSelect {
                blank_address: u8::MAX,
            },
            column_order: ColumnOrder::FirstToLast,
            address_offset: 0,
        }
    }
}

impl ScanConfig {
    /// Multiplexer address of `row`
    pub const fn row_address(&self, row: usize) -> u8 {
        self.address_offset.wrapping_add(row as u8)
    }

    /// Check the configuration against a panel with `ROWS` rows
    pub fn validate<const ROWS: usize>(&self) -> Result<(), ConfigError> {
        let first = self.address_offset as usize;
        let end = first + ROWS;
        if end > 256 {
            return Err(ConfigError::AddressOutOfRange);
        }

        if let RowActivation::BlankThenSelect { blank_address } = self.activation {
            if (first..end).contains(&(blank_address as usize)) {
                return Err(ConfigError::BlankAddressCollides);
            }
        }

        Ok(())
    }

    /// Check the configuration against the port's address lines
    ///
    /// `capacity` is the number of addresses the wired lines can select
    /// (`None` for all 256). Row and blank addresses are compared as the
    /// multiplexer sees them, after dropping the unwired bits. A port whose
    /// address writes are not `atomic` can only be used with a separate
    /// enable line.
    pub fn validate_wiring<const ROWS: usize>(
        &self,
        capacity: Option<usize>,
        atomic: bool,
    ) -> Result<(), ConfigError> {
        self.validate::<ROWS>()?;

        let Some(capacity) = capacity.filter(|&capacity| capacity < 256) else {
            return self.check_blank_transition(atomic);
        };
        let first = self.address_offset as usize;
        if capacity == 0 || first + ROWS > capacity {
            return Err(ConfigError::AddressOutOfRange);
        }
        if let RowActivation::BlankThenSelect { blank_address } = self.activation {
            let wired = blank_address as usize % capacity;
            if (first..first + ROWS).contains(&wired) {
                return Err(ConfigError::BlankAddressCollides);
            }
        }

        self.check_blank_transition(atomic)
    }

    fn check_blank_transition(&self, atomic: bool) -> Result<(), ConfigError> {
        match self.activation {
            RowActivation::BlankThenSelect { .. } if !atomic => {
                Err(ConfigError::AddressNotAtomic)
            }
            _ => Ok(()),
        }
    }
}

/// Full driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriverConfig {
    /// Time between scan ticks in microseconds
    pub tick_period_us: u32,
    /// Scan hardware configuration
    pub scan: ScanConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_period_us: DEFAULT_TICK_PERIOD_US,
            scan: ScanConfig::default(),
        }
    }
}

impl DriverConfig {
    /// Tick period as a HAL value
    pub const fn tick_period(&self) -> TickPeriod {
        TickPeriod::from_micros(self.tick_period_us)
    }

    /// Full refresh rate in Hz for a panel with `ROWS` rows
    ///
    /// One cycle is `ROWS` scanned rows plus the blank slot.
    pub const fn refresh_hz<const ROWS: usize>(&self) -> u32 {
        let cycle_us = self.tick_period_us as u64 * (ROWS as u64 + 1);
        if cycle_us == 0 {
            0
        } else {
            (1_000_000 / cycle_us) as u32
        }
    }

    /// Check the configuration against a panel with `ROWS` rows
    pub fn validate<const ROWS: usize>(&self) -> Result<(), ConfigError> {
        if self.tick_period_us == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        self.scan.validate::<ROWS>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(DriverConfig::default().validate::<7>(), Ok(()));
        assert_eq!(DriverConfig::default().validate::<255>(), Ok(()));
    }

    #[test]
    fn test_blank_collision() {
        let scan = ScanConfig {
            activation: RowActivation::BlankThenSelect { blank_address: 3 },
            ..Default::default()
        };
        assert_eq!(scan.validate::<7>(), Err(ConfigError::BlankAddressCollides));
        assert_eq!(scan.validate::<3>(), Ok(()));

        // Full 8-bit range leaves no room for a sentinel
        assert_eq!(
            ScanConfig::default().validate::<256>(),
            Err(ConfigError::BlankAddressCollides)
        );
    }

    #[test]
    fn test_offset_wiring() {
        // Address 0 reserved for blank, rows on 1..=7
        let scan = ScanConfig {
            activation: RowActivation::BlankThenSelect { blank_address: 0 },
            address_offset: 1,
            ..Default::default()
        };
        assert_eq!(scan.validate::<7>(), Ok(()));
        assert_eq!(scan.row_address(0), 1);
        assert_eq!(scan.row_address(6), 7);

        let scan = ScanConfig {
            address_offset: 250,
            activation: RowActivation::DirectEnableLine,
            ..Default::default()
        };
        assert_eq!(scan.validate::<7>(), Err(ConfigError::AddressOutOfRange));
    }

    #[test]
    fn test_direct_enable_has_no_sentinel() {
        let scan = ScanConfig {
            activation: RowActivation::DirectEnableLine,
            ..Default::default()
        };
        assert_eq!(scan.validate::<256>(), Ok(()));
    }

    #[test]
    fn test_default_sentinel_wraps_onto_last_row() {
        // 0xFF on three lines is address 7
        let scan = ScanConfig::default();
        assert_eq!(
            scan.validate_wiring::<8>(Some(8), true),
            Err(ConfigError::BlankAddressCollides)
        );
        assert_eq!(scan.validate_wiring::<7>(Some(8), true), Ok(()));
        assert_eq!(scan.validate_wiring::<8>(None, true), Ok(()));
    }

    #[test]
    fn test_wired_sentinel_aliases() {
        // Sentinel 9 is address 1 on three lines
        let scan = ScanConfig {
            activation: RowActivation::BlankThenSelect { blank_address: 9 },
            ..Default::default()
        };
        assert_eq!(scan.validate::<7>(), Ok(()));
        assert_eq!(
            scan.validate_wiring::<7>(Some(8), true),
            Err(ConfigError::BlankAddressCollides)
        );
        assert_eq!(scan.validate_wiring::<7>(Some(16), true), Ok(()));
    }

    #[test]
    fn test_rows_must_fit_wired_lines() {
        let scan = ScanConfig {
            activation: RowActivation::DirectEnableLine,
            address_offset: 1,
            ..Default::default()
        };
        assert_eq!(scan.validate_wiring::<7>(Some(8), false), Ok(()));
        assert_eq!(
            scan.validate_wiring::<8>(Some(8), false),
            Err(ConfigError::AddressOutOfRange)
        );
        assert_eq!(
            scan.validate_wiring::<1>(Some(0), false),
            Err(ConfigError::AddressOutOfRange)
        );
    }

    #[test]
    fn test_sentinel_needs_atomic_address() {
        let scan = ScanConfig {
            activation: RowActivation::BlankThenSelect { blank_address: 7 },
            ..Default::default()
        };
        assert_eq!(scan.validate_wiring::<7>(Some(8), true), Ok(()));
        assert_eq!(
            scan.validate_wiring::<7>(Some(8), false),
            Err(ConfigError::AddressNotAtomic)
        );
        assert_eq!(
            scan.validate_wiring::<7>(None, false),
            Err(ConfigError::AddressNotAtomic)
        );

        let direct = ScanConfig {
            activation: RowActivation::DirectEnableLine,
            ..Default::default()
        };
        assert_eq!(direct.validate_wiring::<7>(Some(8), false), Ok(()));
    }

    #[test]
    fn test_zero_tick_period() {
        let config = DriverConfig {
            tick_period_us: 0,
            ..Default::default()
        };
        assert_eq!(config.validate::<7>(), Err(ConfigError::ZeroTickPeriod));
        assert_eq!(config.refresh_hz::<7>(), 0);
    }

    #[test]
    fn test_refresh_rate() {
        // 100 µs * (7 rows + blank) = 800 µs per frame
        assert_eq!(DriverConfig::default().refresh_hz::<7>(), 1250);
        assert_eq!(DriverConfig::default().tick_period().as_micros(), 100);
    }
}
