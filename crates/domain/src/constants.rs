//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Timeline fetch/assembly limits
pub const TIMELINE_EVENTS_LIMIT: usize = 100;
pub const TIMELINE_PER_CATEGORY: usize = 50;
pub const BRAND_DELIVERIES_LIMIT: usize = 10;
pub const BRAND_FEEDBACK_LIMIT: usize = 20;

// Timeline presentation (dashboard view)
pub const TIMELINE_INITIAL_ITEMS: usize = 5;
pub const TIMELINE_PAGE_SIZE: usize = 10;
pub const MAX_DASHBOARD_ITEMS: usize = 40;

// SLA notification monitor
pub const MONITOR_TICK_SECS: u64 = 30;
pub const NOTIFIED_CLEAR_SECS: u64 = 300;
pub const TOAST_DURATION_MS: u64 = 10_000;

// Deadline math
pub const HOURS_PER_DAY: f64 = 24.0;

// Backend identifiers
pub const SLA_CONFIG_KEY: &str = "sla_config";
pub const BRAND_PACKAGE_ID: &str = "pkg-brand-creation";
