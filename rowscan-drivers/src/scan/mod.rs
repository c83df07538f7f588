//! Scan port implementations

pub mod bus;
pub mod gpio;

pub use bus::PinBus;
pub use gpio::{GpioScanPort, ScanPolarity};
