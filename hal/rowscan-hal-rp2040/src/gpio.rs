//! GPIO output lines

use embassy_rp::gpio::{Level as RpLevel, Output, Pin};
use embassy_rp::Peri;
use rowscan_hal::{Level, OutputPin};

/// Push-pull output line
///
/// Type-erased so every scan line can share one pin type.
pub struct RpOutput<'d> {
    inner: Output<'d>,
}

impl<'d> RpOutput<'d> {
    /// Configure `pin` as an output driven to `initial`
    pub fn new(pin: Peri<'d, impl Pin>, initial: Level) -> Self {
        Self {
            inner: Output::new(pin, to_rp(initial)),
        }
    }

    /// Wrap an already configured output
    pub fn from_output(inner: Output<'d>) -> Self {
        Self { inner }
    }
}

fn to_rp(level: Level) -> RpLevel {
    match level {
        Level::Low => RpLevel::Low,
        Level::High => RpLevel::High,
    }
}

impl OutputPin for RpOutput<'_> {
    #[inline]
    fn set_level(&mut self, level: Level) {
        self.inner.set_level(to_rp(level));
    }

    #[inline]
    fn is_set_high(&self) -> bool {
        self.inner.is_set_high()
    }
}
