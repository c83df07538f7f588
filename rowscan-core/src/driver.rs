//! Driver lifecycle
//!
//! [`LedDriver`] is the single owned driver instance: the scanner, its
//! vsync notifier, the output port and the tick timer, plus a shared
//! reference to the frame store. The store is the only state the host
//! touches concurrently, so it stays outside and is shared by reference.
//!
//! ```text
//!  init ──► (stopped, blank) ──enable──► (scanning) ──disable──► (stopped, blank)
//!                 ▲                                                    │
//!                 └────────────────────────────────────────────────────┘
//! ```
//!
//! The platform routes the timer interrupt to [`LedDriver::on_tick`].

use rowscan_hal::{PeriodicTimer, TickPeriod};

use crate::config::{ConfigError, DriverConfig};
use crate::encoder::OutputEncoder;
use crate::frame::FrameError;
use crate::scanner::{RowScanner, ScanSlot};
use crate::store::{FrameSink, RowSource};
use crate::traits::ScanPort;
use crate::vsync::{VsyncHandler, VsyncNotifier};

/// Row-multiplexed LED matrix driver
pub struct LedDriver<'a, S: ?Sized, E, P, T, V, const W: usize, const H: usize> {
    store: &'a S,
    scanner: RowScanner<E, W, H>,
    notifier: VsyncNotifier<V>,
    port: P,
    timer: T,
    period: TickPeriod,
    enabled: bool,
}

impl<'a, S, E, P, T, V, const W: usize, const H: usize> LedDriver<'a, S, E, P, T, V, W, H>
where
    S: RowSource<W> + FrameSink + ?Sized,
    E: OutputEncoder<W, H>,
    P: ScanPort,
    T: PeriodicTimer,
    V: VsyncHandler,
{
    /// Set up a stopped driver
    ///
    /// Validates `config` against the panel and the port's address lines,
    /// zeroes the store, blanks the panel and makes sure the timer is not
    /// running. Scanning starts with [`enable`].
    ///
    /// [`enable`]: LedDriver::enable
    pub fn init(
        store: &'a S,
        encoder: E,
        mut port: P,
        mut timer: T,
        vsync: V,
        config: DriverConfig,
    ) -> Result<Self, ConfigError> {
        config.validate::<H>()?;
        config
            .scan
            .validate_wiring::<H>(port.address_capacity(), port.address_is_atomic())?;
        let scanner = RowScanner::new(encoder, config.scan)?;

        if timer.is_armed() {
            timer.detach();
        }
        store.clear();
        scanner.blank(&mut port);

        Ok(Self {
            store,
            scanner,
            notifier: VsyncNotifier::new(vsync),
            port,
            timer,
            period: config.tick_period(),
            enabled: false,
        })
    }

    /// Start scanning from row 0
    ///
    /// Does nothing if already enabled.
    pub fn enable(&mut self) {
        if self.enabled {
            return;
        }
        self.scanner.reset();
        self.scanner.blank(&mut self.port);
        self.enabled = true;
        self.timer.arm(self.period);
    }

    /// Stop scanning and leave the panel blank
    ///
    /// The timer is detached before blanking so no later tick can light a
    /// row again.
    pub fn disable(&mut self) {
        self.timer.detach();
        self.enabled = false;
        self.scanner.blank(&mut self.port);
    }

    /// Timer tick entry point
    ///
    /// Returns the slot handled, or `None` when the driver is disabled
    /// (a tick that raced with `disable`).
    pub fn on_tick(&mut self) -> Option<ScanSlot> {
        if !self.enabled {
            return None;
        }
        Some(
            self.scanner
                .tick(&mut self.port, self.store, &mut self.notifier),
        )
    }

    /// Replace the displayed frame with a flat row-major buffer
    ///
    /// The buffer must be exactly `W * H` bytes.
    pub fn write_framebuffer(&self, data: &[u8]) -> Result<(), FrameError> {
        self.store.write(data)
    }

    /// Shared frame store
    pub fn store(&self) -> &'a S {
        self.store
    }

    /// Check whether the driver is scanning
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Row the next tick will scan (`H` = blank slot)
    pub fn row(&self) -> usize {
        self.scanner.row()
    }

    /// Number the next vsync will carry
    pub fn frame_counter(&self) -> u32 {
        self.notifier.frame_counter()
    }

    /// The scan state machine
    pub fn scanner(&self) -> &RowScanner<E, W, H> {
        &self.scanner
    }

    /// The vsync handler
    pub fn vsync_handler_mut(&mut self) -> &mut V {
        self.notifier.handler_mut()
    }

    /// Output port
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Tick timer
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Stop the driver and hand back the hardware
    pub fn release(mut self) -> (P, T) {
        self.disable();
        (self.port, self.timer)
    }
}
