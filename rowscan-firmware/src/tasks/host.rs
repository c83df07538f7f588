//! Host task
//!
//! Renders a scrolling message and the uptime into a canvas after each
//! vsync and hands the finished frame to the store.

use defmt::*;
use embassy_time::Instant;
use rowscan_core::GammaTable;
use rowscan_draw::Canvas;

use crate::channels::VSYNC;
use crate::display::{HEIGHT, STORE, WIDTH};

/// Text scrolled across the panel
const MESSAGE: &str = "rowscan 80x7";

/// Perceptual correction for the panel's LEDs
const GAMMA: f32 = 2.2;

/// Scan cycles per one-column scroll step
const FRAMES_PER_STEP: u32 = 40;

#[embassy_executor::task]
pub async fn host_task() {
    info!("Host task started");

    let mut canvas = Canvas::<WIDTH, HEIGHT>::new();
    match GammaTable::new(GAMMA) {
        Ok(table) => canvas.set_gamma(Some(table)),
        Err(e) => warn!("Gamma table rejected: {}", e),
    }

    let message_width = Canvas::<WIDTH, HEIGHT>::text_width(MESSAGE);
    let mut x = WIDTH as i32;

    loop {
        let frame = VSYNC.wait().await;
        if frame % FRAMES_PER_STEP != 0 {
            continue;
        }

        canvas.clear();
        let end = canvas.draw_text(MESSAGE, x, 255, 0);
        let uptime = Instant::now().as_secs();
        if canvas
            .draw_fmt(end + 4, 96, 0, format_args!("{}s", uptime))
            .is_err()
        {
            warn!("Uptime text too long");
        }
        STORE.write_frame(canvas.frame());

        x -= 1;
        if x < -message_width {
            x = WIDTH as i32;
            debug!("Scroll wrapped at frame {}", frame);
        }
    }
}
