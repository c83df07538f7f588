//! Embassy async tasks
//!
//! The scan task runs on the interrupt executor; the host task on the
//! thread executor.

pub mod host;
pub mod scan;

pub use host::host_task;
pub use scan::scan_task;
