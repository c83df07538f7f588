//! GPIO output line abstractions
//!
//! The display is driven entirely through push-pull output lines: the row
//! multiplexer address, the column shift data and clock, and optionally a
//! latch and an output-enable line.

/// Electrical level of an output line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level == Level::High
    }
}

/// Which level of a line means "asserted"
///
/// Column drivers frequently sink current, so a lit LED is a low data bit;
/// enable lines on row drivers are commonly active-low as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Asserted = high
    #[default]
    ActiveHigh,
    /// Asserted = low
    ActiveLow,
}

impl Polarity {
    /// Level that represents `asserted` under this polarity
    pub const fn level(self, asserted: bool) -> Level {
        match (self, asserted) {
            (Polarity::ActiveHigh, true) | (Polarity::ActiveLow, false) => Level::High,
            (Polarity::ActiveHigh, false) | (Polarity::ActiveLow, true) => Level::Low,
        }
    }
}

/// Digital output line
///
/// Implementations handle the register access for the specific chip. Calls
/// happen from the scan tick, so they must not block.
pub trait OutputPin {
    /// Drive the line to `level`
    fn set_level(&mut self, level: Level);

    /// Check if the line is currently driven high
    fn is_set_high(&self) -> bool;

    /// Drive the line high
    fn set_high(&mut self) {
        self.set_level(Level::High);
    }

    /// Drive the line low
    fn set_low(&mut self) {
        self.set_level(Level::Low);
    }

    /// Drive the line high when `high` is true
    fn set_state(&mut self, high: bool) {
        self.set_level(Level::from(high));
    }

    /// Drive the line to its asserted or released level under `polarity`
    fn assert(&mut self, polarity: Polarity, asserted: bool) {
        self.set_level(polarity.level(asserted));
    }
}

impl<P: OutputPin + ?Sized> OutputPin for &mut P {
    fn set_level(&mut self, level: Level) {
        (**self).set_level(level);
    }

    fn is_set_high(&self) -> bool {
        (**self).is_set_high()
    }
}
