//! Hardware-facing traits
//!
//! These traits define the interface between the scanning engine and
//! board-specific output drivers.

pub mod port;

pub use port::ScanPort;
