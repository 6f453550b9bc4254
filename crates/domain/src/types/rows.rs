//! Raw backend row types
//!
//! Deserialization targets for the hosted backend's REST responses. Embedded
//! relations (package on a design order, project on a ticket) mirror the
//! foreign-key joins the query layer requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Design package joined onto an order row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageRow {
    pub name: String,
    pub estimated_days: Option<f64>,
}

/// Actionable design order with its package relation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignOrderRow {
    pub id: String,
    pub client_id: Option<String>,
    pub status: String,
    pub revisions_used: Option<i32>,
    pub max_revisions: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub package: Option<PackageRow>,
}

/// Client profile used to resolve display names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRow {
    pub user_id: String,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
}

impl ProfileRow {
    /// Preferred display name: company name, else full name
    pub fn display_name(&self) -> Option<&str> {
        self.company_name.as_deref().or(self.full_name.as_deref())
    }
}

/// Project relation joined onto a ticket row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub name: Option<String>,
    pub client_id: Option<String>,
}

/// Support ticket with its project relation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketRow {
    pub id: String,
    pub title: String,
    pub status: String,
    pub priority: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub project: Option<ProjectRef>,
    pub project_id: Option<String>,
}

/// Site migration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationRow {
    pub id: String,
    pub name: String,
    pub status: String,
    pub current_domain: String,
    pub site_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Client onboarding record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingRow {
    pub created_at: DateTime<Utc>,
    pub selected_plan: String,
    #[serde(default)]
    pub needs_brand_creation: bool,
}

/// Client project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: String,
    pub name: String,
    pub domain: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Direct timeline message (admin or client authored)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineMessageRow {
    pub id: String,
    pub message: String,
    pub message_type: Option<String>,
    pub sender_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Admin-message notification (legacy fallback channel)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRow {
    pub id: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Project credential (timeline surfaces e-mail accounts)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRow {
    pub id: String,
    pub label: String,
    pub credential_type: Option<String>,
    pub project_id: String,
    pub created_at: DateTime<Utc>,
}

/// Project file exchanged between client and agency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRow {
    pub id: String,
    pub file_name: String,
    pub uploaded_by: Option<String>,
    pub project_id: String,
    pub created_at: DateTime<Utc>,
}

/// Paid design order summary for the timeline feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignOrderSummaryRow {
    pub id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub package: Option<PackageRow>,
}

/// Order relation joined onto a delivery row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRef {
    pub client_id: Option<String>,
    pub package: Option<PackageRow>,
}

/// Design delivery (a versioned handoff on an order)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignDeliveryRow {
    pub id: String,
    pub version_number: i32,
    pub status: Option<String>,
    pub order_id: String,
    pub created_at: DateTime<Utc>,
    pub order: Option<OrderRef>,
}

/// Client feedback on a design delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignFeedbackRow {
    pub id: String,
    pub feedback_type: String,
    pub delivery_id: String,
    pub created_at: DateTime<Utc>,
}
