//! rowscan Hardware Abstraction Layer
//!
//! This crate defines the hardware-facing traits the scanning engine needs.
//! Chip-specific HALs implement them so the same driver runs on different
//! platforms (and against mocks on the host).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (rowscan-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rowscan-core / rowscan-drivers         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rowscan-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ rowscan-hal-    │
//!            │    rp2040       │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output lines (shift data, clock, enable)
//! - [`bus::AddressBus`] - Row multiplexer address lines
//! - [`timer::PeriodicTimer`] - The fixed-cadence scan tick

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod gpio;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use bus::AddressBus;
pub use gpio::{Level, OutputPin, Polarity};
pub use timer::{PeriodicTimer, TickPeriod};
