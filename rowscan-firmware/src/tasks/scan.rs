//! Scan task
//!
//! Stands in for a timer interrupt: while the driver's timer is armed, it
//! calls `on_tick` once per tick period. Runs on the high-priority
//! interrupt executor so host work cannot delay it.

use defmt::*;
use embassy_time::Ticker;
use rowscan_hal_rp2040::TickControl;

use crate::display::with_driver;

#[embassy_executor::task]
pub async fn scan_task(control: &'static TickControl) {
    info!("Scan task started");

    loop {
        let interval = control.wait_armed().await;
        let period = control.period();
        debug!("Scanning every {} us", period.as_micros());

        let mut ticker = Ticker::every(interval);
        // Re-arming with a new period restarts the ticker
        while control.is_armed() && control.period() == period {
            ticker.next().await;
            // Held for one row: W shifts and a handful of line writes
            with_driver(|driver| driver.on_tick());
        }

        debug!("Scan stopped");
    }
}
