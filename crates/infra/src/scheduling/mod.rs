//! Scheduling infrastructure for background tasks
//!
//! Interval-driven scheduler for the SLA monitor with:
//! - Explicit lifecycle management (start/stop)
//! - Join handles for spawned tasks
//! - Cancellation token support
//! - Timeout wrapping on every monitor pass

pub mod error;
pub mod monitor_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use monitor_scheduler::{MonitorScheduler, MonitorSchedulerConfig};
