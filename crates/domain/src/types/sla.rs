//! SLA configuration
//!
//! Process-wide configuration loaded from the backend `system_settings`
//! table. Every field carries a serde default so a partial document stored by
//! the admin settings screen merges cleanly over the built-in defaults; a
//! missing or malformed document falls back to the full defaults and is never
//! a fatal error.

use serde::{Deserialize, Serialize};

/// SLA rules for brand-new design orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignNewSla {
    pub enabled: bool,
    /// When true, the package's own `estimated_days` drives the window;
    /// otherwise `default_days` applies to every order.
    pub use_package_estimate: bool,
    pub default_days: f64,
}

impl Default for DesignNewSla {
    fn default() -> Self {
        Self { enabled: true, use_package_estimate: true, default_days: 5.0 }
    }
}

/// SLA rules for requested design revisions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignRevisionSla {
    pub enabled: bool,
    /// Revision window as a percentage of the original order's window
    pub percent_of_original: f64,
    /// Floor for the revision window, in hours
    pub min_hours: f64,
}

impl Default for DesignRevisionSla {
    fn default() -> Self {
        Self { enabled: true, percent_of_original: 50.0, min_hours: 24.0 }
    }
}

/// Per-priority SLA hours for support tickets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketSla {
    pub enabled: bool,
    pub urgent: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for TicketSla {
    fn default() -> Self {
        Self { enabled: true, urgent: 6.0, high: 12.0, medium: 24.0, low: 48.0 }
    }
}

/// SLA rules for site migration requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationSla {
    pub enabled: bool,
    pub default_days: f64,
}

impl Default for MigrationSla {
    fn default() -> Self {
        Self { enabled: true, default_days: 3.0 }
    }
}

/// Notification behavior for the SLA monitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSla {
    pub enabled: bool,
    /// Warn when less than this percentage of the SLA window remains
    pub warning_percent: f64,
    pub sound_enabled: bool,
    pub toast_enabled: bool,
}

impl Default for NotificationSla {
    fn default() -> Self {
        Self { enabled: true, warning_percent: 25.0, sound_enabled: true, toast_enabled: true }
    }
}

/// Complete SLA configuration snapshot
///
/// Treated as immutable for the duration of one aggregation or monitor
/// cycle; a fresh snapshot may be adopted between cycles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaConfig {
    pub design_new: DesignNewSla,
    pub design_revision: DesignRevisionSla,
    pub ticket: TicketSla,
    pub migration: MigrationSla,
    pub notifications: NotificationSla,
}

impl SlaConfig {
    /// Merge a backend-stored JSON document over the defaults.
    ///
    /// Any shape problem yields the defaults; per the error-handling design
    /// a bad config document is silently replaced, never propagated.
    pub fn from_backend_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}
