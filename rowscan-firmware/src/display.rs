//! The board's display instance
//!
//! One 80x7 panel: three multiplexer address lines, column data and clock,
//! no separate latch or enable. Address 7 of the multiplexer is wired to no
//! row and serves as the blank state, so the address lines go through the
//! SIO bus that switches them in one write.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use rowscan_core::{Dithered, FrameStore, LedDriver};
use rowscan_drivers::GpioScanPort;
use rowscan_hal_rp2040::{RpOutput, SioAddressBus, TickControl, TickTimer};

/// Panel columns
pub const WIDTH: usize = 80;

/// Panel rows
pub const HEIGHT: usize = 7;

/// Scan port over the board's GPIO lines
pub type Port = GpioScanPort<RpOutput<'static>, SioAddressBus<'static, 3>>;

/// Concrete driver type for this board
pub type Display = LedDriver<
    'static,
    FrameStore<WIDTH, HEIGHT>,
    Dithered<WIDTH, HEIGHT>,
    Port,
    TickTimer,
    fn(u32),
    WIDTH,
    HEIGHT,
>;

/// Pixels shared between the host and the scan tick
pub static STORE: FrameStore<WIDTH, HEIGHT> = FrameStore::new();

/// Arm/detach state for the scan task
pub static TICK: TickControl = TickControl::new();

/// The driver, once initialised
///
/// Ticks and host calls to `enable`/`disable` serialise on this lock. The
/// host never holds it across an await and pixels go through [`STORE`]
/// without it, so a tick waits at most for one `enable`/`disable`.
pub static DRIVER: Mutex<CriticalSectionRawMutex, RefCell<Option<Display>>> =
    Mutex::new(RefCell::new(None));

/// Run `f` on the driver, or return `None` before it is installed
pub fn with_driver<R>(f: impl FnOnce(&mut Display) -> R) -> Option<R> {
    DRIVER.lock(|cell| cell.borrow_mut().as_mut().map(f))
}
