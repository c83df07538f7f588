//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in rowscan-core on top of the HAL line abstractions:
//!
//! - Bit-banged scan port (shift register + row multiplexer)
//! - Row address bus over individual output lines
//! - Output lines over any embedded-hal 1.0 pin

#![no_std]
#![deny(unsafe_code)]

pub mod pin;
pub mod scan;

pub use pin::EhPin;
pub use scan::{GpioScanPort, PinBus, ScanPolarity};
