//! Scan tick timer
//!
//! The RP2040 port paces the scan from an interrupt-priority executor
//! rather than a raw alarm. [`TickControl`] is the shared state between
//! the driver, which arms and detaches through [`TickTimer`], and the scan
//! task, which waits until armed and then ticks at the requested period.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Duration;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};
use rowscan_hal::{PeriodicTimer, TickPeriod};

/// Shared arm/detach state
pub struct TickControl {
    armed: AtomicBool,
    period_us: AtomicU32,
    changed: Signal<CriticalSectionRawMutex, ()>,
}

impl Default for TickControl {
    fn default() -> Self {
        Self::new()
    }
}

impl TickControl {
    /// Detached control with no period set
    pub const fn new() -> Self {
        Self {
            armed: AtomicBool::new(false),
            period_us: AtomicU32::new(0),
            changed: Signal::new(),
        }
    }

    /// Timer handle for the driver
    pub fn timer(&'static self) -> TickTimer {
        TickTimer { control: self }
    }

    /// Check whether the driver has the timer armed
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// Period of the current arming
    pub fn period(&self) -> TickPeriod {
        TickPeriod::from_micros(self.period_us.load(Ordering::Relaxed))
    }

    /// Wait until the timer is armed and return its tick interval
    pub async fn wait_armed(&self) -> Duration {
        loop {
            if self.is_armed() {
                return Duration::from_micros(self.period().as_micros() as u64);
            }
            self.changed.wait().await;
        }
    }

    fn arm(&self, period: TickPeriod) {
        self.period_us.store(period.as_micros(), Ordering::Relaxed);
        self.armed.store(true, Ordering::Release);
        self.changed.signal(());
    }

    fn detach(&self) {
        self.armed.store(false, Ordering::Release);
        self.changed.signal(());
    }
}

/// Driver-side handle to a [`TickControl`]
#[derive(Clone, Copy)]
pub struct TickTimer {
    control: &'static TickControl,
}

impl PeriodicTimer for TickTimer {
    fn arm(&mut self, period: TickPeriod) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Scan tick armed at {} us", period.as_micros());
        self.control.arm(period);
    }

    fn detach(&mut self) {
        self.control.detach();
    }

    fn is_armed(&self) -> bool {
        self.control.is_armed()
    }
}
