//! Demand board types
//!
//! A `Demand` is one outstanding unit of work requiring admin action: a
//! design order awaiting production or revision, an open support ticket, or
//! a pending site migration. Demands are recomputed on every fetch and never
//! persisted by this module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of outstanding work a demand represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandKind {
    DesignNew,
    DesignRevision,
    Ticket,
    Migration,
}

impl DemandKind {
    /// Stable wire/key name for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DesignNew => "design_new",
            Self::DesignRevision => "design_revision",
            Self::Ticket => "ticket",
            Self::Migration => "migration",
        }
    }
}

/// Ticket priority used to select the SLA window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Urgent,
    High,
    Medium,
    Low,
}

impl TicketPriority {
    /// Parse a backend priority string. Unrecognized values fall back to
    /// `Medium`, matching the board's default SLA selection.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "urgent" => Self::Urgent,
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Which backend source a demand (or a fetch failure) came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandSource {
    DesignOrders,
    Tickets,
    Migrations,
}

/// One outstanding, actionable work item with its derived deadline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demand {
    /// Source row id (opaque, source-specific)
    pub id: String,
    pub kind: DemandKind,
    pub title: String,
    pub client_name: String,
    /// Source-specific status string (e.g. "open", "revision_requested")
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Derived: always a pure function of kind, timestamps and SLA config
    pub deadline: DateTime<Utc>,
    /// The SLA window in days used to compute `deadline`
    pub estimated_days: f64,

    // Subtype-specific fields
    pub priority: Option<TicketPriority>,
    pub project_id: Option<String>,
    pub package_name: Option<String>,
    pub revisions_used: Option<i32>,
    pub max_revisions: Option<i32>,
    pub migration_domain: Option<String>,
    pub migration_site_type: Option<String>,
}

impl Demand {
    /// Composite key used for notification deduplication
    pub fn notification_key(&self) -> String {
        format!("{}-{}", self.kind.as_str(), self.id)
    }

    /// Remaining time until the deadline (negative when overdue)
    pub fn remaining(&self, now: DateTime<Utc>) -> chrono::Duration {
        self.deadline - now
    }

    /// Fraction of the SLA window still remaining, as a percentage.
    ///
    /// Negative when overdue; can exceed 100 for freshly created items whose
    /// window starts in the past relative to `now`.
    pub fn percent_remaining(&self, now: DateTime<Utc>) -> f64 {
        let total_ms = self.estimated_days * 24.0 * 60.0 * 60.0 * 1000.0;
        if total_ms <= 0.0 {
            return 0.0;
        }
        let remaining_ms = (self.deadline - now).num_milliseconds() as f64;
        remaining_ms / total_ms * 100.0
    }

    /// Classify this demand against the configured warning threshold
    pub fn urgency(&self, now: DateTime<Utc>, warning_percent: f64) -> Urgency {
        if self.deadline < now {
            Urgency::Overdue
        } else if self.percent_remaining(now) < warning_percent {
            Urgency::Warning
        } else {
            Urgency::Normal
        }
    }
}

/// Urgency classification shared by the board counts and the SLA monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Overdue,
    Warning,
    Normal,
}

/// A source fetch that failed while building the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFailure {
    pub source: DemandSource,
    pub error: String,
}

/// The assembled demand board: ranked demands plus derived counts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemandBoard {
    /// Demands sorted overdue-first, then soonest-due
    pub demands: Vec<Demand>,
    pub overdue: usize,
    pub urgent: usize,
    pub normal: usize,
    /// Sources that failed to fetch; siblings are still included
    pub failed_sources: Vec<SourceFailure>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn demand_due(deadline: DateTime<Utc>, estimated_days: f64) -> Demand {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Demand {
            id: "d1".into(),
            kind: DemandKind::Ticket,
            title: "Ticket".into(),
            client_name: "Cliente".into(),
            status: "open".into(),
            created_at: created,
            updated_at: created,
            deadline,
            estimated_days,
            priority: Some(TicketPriority::Medium),
            project_id: None,
            package_name: None,
            revisions_used: None,
            max_revisions: None,
            migration_domain: None,
            migration_site_type: None,
        }
    }

    #[test]
    fn notification_key_combines_kind_and_id() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let demand = demand_due(now, 1.0);
        assert_eq!(demand.notification_key(), "ticket-d1");
    }

    #[test]
    fn urgency_overdue_when_past_deadline() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let demand = demand_due(now - chrono::Duration::hours(1), 1.0);
        assert_eq!(demand.urgency(now, 25.0), Urgency::Overdue);
    }

    #[test]
    fn urgency_warning_under_threshold() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        // 2 hours left of a 24-hour window: ~8.3% remaining
        let demand = demand_due(now + chrono::Duration::hours(2), 1.0);
        assert_eq!(demand.urgency(now, 25.0), Urgency::Warning);
    }

    #[test]
    fn urgency_normal_with_plenty_of_time() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let demand = demand_due(now + chrono::Duration::hours(20), 1.0);
        assert_eq!(demand.urgency(now, 25.0), Urgency::Normal);
    }

    #[test]
    fn percent_remaining_is_zero_for_empty_window() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let demand = demand_due(now + chrono::Duration::hours(1), 0.0);
        assert_eq!(demand.percent_remaining(now), 0.0);
    }

    #[test]
    fn ticket_priority_parse_defaults_to_medium() {
        assert_eq!(TicketPriority::parse("urgent"), TicketPriority::Urgent);
        assert_eq!(TicketPriority::parse("high"), TicketPriority::High);
        assert_eq!(TicketPriority::parse("low"), TicketPriority::Low);
        assert_eq!(TicketPriority::parse("medium"), TicketPriority::Medium);
        assert_eq!(TicketPriority::parse("whatever"), TicketPriority::Medium);
    }
}
