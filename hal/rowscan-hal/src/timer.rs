//! Periodic tick abstraction
//!
//! The scanner needs exactly one scheduling capability: "invoke this
//! bounded-time handler every fixed period". Platforms realise it with a
//! hardware timer interrupt or a high-priority executor; the handler itself
//! is routed by the platform glue (there is no way to pass a closure into a
//! vector table), so the trait only arms and detaches the cadence.

/// Tick period in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickPeriod(u32);

impl TickPeriod {
    /// Create a period from microseconds
    pub const fn from_micros(us: u32) -> Self {
        Self(us)
    }

    /// Create a period from a tick rate in Hz
    ///
    /// Rates above 1 MHz round down to a zero period.
    pub const fn from_hz(hz: u32) -> Self {
        if hz == 0 {
            Self(0)
        } else {
            Self(1_000_000 / hz)
        }
    }

    /// Period in microseconds
    pub const fn as_micros(self) -> u32 {
        self.0
    }

    /// Check for a zero period (never a valid cadence)
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Fixed-cadence tick source
///
/// While armed, the platform calls the registered scan handler once per
/// period. There is no mid-tick cancellation: `detach` takes effect before
/// the next tick, never inside one.
pub trait PeriodicTimer {
    /// Start (or restart) ticking every `period`
    fn arm(&mut self, period: TickPeriod);

    /// Stop ticking
    fn detach(&mut self);

    /// Check whether ticks are currently being delivered
    fn is_armed(&self) -> bool;
}

impl<T: PeriodicTimer + ?Sized> PeriodicTimer for &mut T {
    fn arm(&mut self, period: TickPeriod) {
        (**self).arm(period);
    }

    fn detach(&mut self) {
        (**self).detach();
    }

    fn is_armed(&self) -> bool {
        (**self).is_armed()
    }
}
