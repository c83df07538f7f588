//! Inter-task communication
//!
//! The scan task runs at interrupt priority and must never wait on the host,
//! so everything it tells the host goes through signals.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Frame number of the most recent vsync
///
/// Overwritten each cycle; a host that falls behind just sees the latest.
pub static VSYNC: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Vsync handler installed in the driver
pub fn on_vsync(frame: u32) {
    VSYNC.signal(frame);
}
