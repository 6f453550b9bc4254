//! SLA breach notifications
//!
//! Watches the demand board and raises a toast and sound cue the first time
//! a demand goes overdue or enters its warning window, with a cooldown so
//! the same demand does not re-alert on every poll.

pub mod monitor;
pub mod ports;

pub use monitor::SlaMonitor;
