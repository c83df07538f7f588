//! RP2040-specific HAL for the LED matrix firmware
//!
//! This crate provides RP2040 implementations of the shared `rowscan-hal`
//! traits:
//!
//! - Push-pull output lines over `embassy_rp::gpio::Output`
//! - A row address bus that switches every line in one SIO write
//! - Tick timer control shared between the driver and the scan task

#![no_std]

pub mod bus;
pub mod gpio;
pub mod timer;

pub use bus::SioAddressBus;
pub use gpio::RpOutput;
pub use timer::{TickControl, TickTimer};
