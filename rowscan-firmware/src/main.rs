//! rowscan - LED matrix firmware
//!
//! Drives an 80x7 row-multiplexed LED panel from an RP2040. The scan runs
//! as a high-priority task on an interrupt executor; the host renders
//! frames on the thread executor and is woken by vsync.
//!
//! Wiring (board-specific):
//! - GPIO2..4: multiplexer address A/B/C
//! - GPIO5: column shift clock
//! - GPIO6: column data

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_time::Instant;
use {defmt_rtt as _, panic_probe as _};

use rowscan_core::{Dithered, DriverConfig, LedDriver, RowActivation, ScanConfig};
use rowscan_drivers::{GpioScanPort, ScanPolarity};
use rowscan_hal::Level;
use rowscan_hal_rp2040::{RpOutput, SioAddressBus};

use crate::display::{Display, STORE, TICK};

mod channels;
mod display;
mod tasks;

/// Multiplexer address wired to no row
const BLANK_ADDRESS: u8 = 7;

static EXECUTOR_SCAN: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_SCAN.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("rowscan firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let port = GpioScanPort::new(
        RpOutput::new(p.PIN_6, Level::Low),
        RpOutput::new(p.PIN_5, Level::Low),
        None,
        SioAddressBus::new([p.PIN_2.into(), p.PIN_3.into(), p.PIN_4.into()]),
        None,
        ScanPolarity::default(),
    );

    let config = DriverConfig {
        scan: ScanConfig {
            activation: RowActivation::BlankThenSelect {
                blank_address: BLANK_ADDRESS,
            },
            ..Default::default()
        },
        ..Default::default()
    };
    info!(
        "Scan tick {} us, refresh {} Hz",
        config.tick_period_us,
        config.refresh_hz::<{ display::HEIGHT }>()
    );

    // Seeded carries spread the dithering phase across pixels
    let encoder = Dithered::seeded(Instant::now().as_ticks() as u32);

    let driver: Display = match LedDriver::init(
        &STORE,
        encoder,
        port,
        TICK.timer(),
        channels::on_vsync as fn(u32),
        config,
    ) {
        Ok(driver) => driver,
        Err(e) => {
            error!("Display config rejected: {}", e);
            return;
        }
    };
    display::DRIVER.lock(|cell| cell.replace(Some(driver)));
    info!("Display initialized");

    // Scan on the high-priority executor
    interrupt::SWI_IRQ_1.set_priority(Priority::P1);
    let scan_spawner = EXECUTOR_SCAN.start(interrupt::SWI_IRQ_1);
    scan_spawner.spawn(tasks::scan_task(&TICK)).unwrap();

    spawner.spawn(tasks::host_task()).unwrap();

    display::with_driver(|driver| driver.enable());
    info!("Display enabled");
}
