//! Notification sink and clock implementations

pub mod sink;

pub use sink::{ChannelSink, Notification, SystemClock};
