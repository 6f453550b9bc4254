//! SLA window and deadline arithmetic
//!
//! Pure functions: given identical inputs and configuration, the derived
//! window and deadline are always identical. All fractional-day math runs in
//! milliseconds to avoid truncating sub-day windows.

use chrono::{DateTime, Duration, Utc};
use opsdeck_domain::constants::HOURS_PER_DAY;
use opsdeck_domain::{SlaConfig, TicketPriority};

/// Fallback window when an order has no package estimate, in days
const PACKAGE_ESTIMATE_FALLBACK_DAYS: f64 = 5.0;

/// Base estimate for a design order, in days.
///
/// The package's own `estimated_days` drives the window when
/// `use_package_estimate` is set; otherwise the configured default applies
/// to every order.
pub fn design_base_estimate(config: &SlaConfig, package_estimate: Option<f64>) -> f64 {
    if config.design_new.use_package_estimate {
        package_estimate.unwrap_or(PACKAGE_ESTIMATE_FALLBACK_DAYS)
    } else {
        config.design_new.default_days
    }
}

/// Window for a requested revision, in days.
///
/// A percentage of the original order's window, floored at the configured
/// minimum hours.
pub fn revision_window_days(config: &SlaConfig, base_days: f64) -> f64 {
    let revision_days = base_days * config.design_revision.percent_of_original / 100.0;
    let min_days = config.design_revision.min_hours / HOURS_PER_DAY;
    revision_days.max(min_days)
}

/// SLA hours for a ticket, selected by priority
pub fn ticket_sla_hours(config: &SlaConfig, priority: TicketPriority) -> f64 {
    match priority {
        TicketPriority::Urgent => config.ticket.urgent,
        TicketPriority::High => config.ticket.high,
        TicketPriority::Medium => config.ticket.medium,
        TicketPriority::Low => config.ticket.low,
    }
}

/// Deadline a fractional number of days after `start`
pub fn deadline_after_days(start: DateTime<Utc>, days: f64) -> DateTime<Utc> {
    start + Duration::milliseconds((days * 24.0 * 60.0 * 60.0 * 1000.0) as i64)
}

/// Deadline a fractional number of hours after `start`
pub fn deadline_after_hours(start: DateTime<Utc>, hours: f64) -> DateTime<Utc> {
    start + Duration::milliseconds((hours * 60.0 * 60.0 * 1000.0) as i64)
}
