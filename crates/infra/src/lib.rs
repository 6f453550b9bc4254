//! # OpsDeck Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The PostgREST backend client (auth, retry/backoff) and repository
//!   implementations
//! - Configuration loading (environment + file)
//! - The interval scheduler driving the SLA monitor
//! - Notification sink and system clock
//!
//! ## Architecture
//! - Implements traits defined in `opsdeck-core`
//! - Depends on `opsdeck-domain` and `opsdeck-core`
//! - Contains all "impure" code (I/O, wall clock, channels)

pub mod backend;
pub mod config;
pub mod errors;
pub mod notify;
pub mod scheduling;

pub use backend::{
    BackendClient, BackendDesignOrderRepository, BackendMigrationRepository,
    BackendProfileRepository, BackendTicketRepository, BackendTimelineRepository, RetryPolicy,
    SystemSettingsSlaStore,
};
pub use config::{AppConfig, BackendConfig, MonitorConfig};
pub use errors::InfraError;
pub use notify::{ChannelSink, Notification, SystemClock};
pub use scheduling::{MonitorScheduler, MonitorSchedulerConfig, SchedulerError, SchedulerResult};
