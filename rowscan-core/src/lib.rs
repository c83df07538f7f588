//! Board-agnostic scanning engine for row-multiplexed LED matrix displays
//!
//! This crate contains everything that runs on the timing-critical path
//! and does not depend on a specific chip:
//!
//! - Temporal dithering (accumulate-and-carry per pixel)
//! - Frame storage shared between the host and the scan tick
//! - The row-scanning state machine
//! - Vsync notification
//! - Driver lifecycle (init / enable / disable)
//! - Configuration types and gamma tables
//!
//! Geometry is fixed at compile time through const generics: `W` columns
//! and `H` rows.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod dither;
pub mod driver;
pub mod encoder;
pub mod frame;
pub mod gamma;
pub mod scanner;
pub mod store;
pub mod traits;
pub mod vsync;

#[cfg(test)]
pub(crate) mod mock;

pub use config::{ConfigError, DriverConfig, ScanConfig};
pub use driver::LedDriver;
pub use encoder::{Binary, Dithered, OutputEncoder};
pub use frame::{Frame, FrameError};
pub use gamma::GammaTable;
pub use scanner::{ColumnOrder, RowActivation, RowScanner, ScanSlot};
pub use store::{DoubleBuffer, FrameSink, FrameStore, RowSource};
pub use traits::ScanPort;
pub use vsync::{NoVsync, VsyncHandler, VsyncNotifier};
