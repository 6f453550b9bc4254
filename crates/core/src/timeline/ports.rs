//! Port interface for timeline source data

use async_trait::async_trait;
use opsdeck_domain::{
    CredentialRow, DesignDeliveryRow, DesignFeedbackRow, DesignOrderSummaryRow, FileRow,
    NotificationRow, OnboardingRow, ProjectRow, Result, TicketRow, TimelineMessageRow,
};

/// Per-source fetches backing the timeline feed.
///
/// The first six methods take only the client id and run as one concurrent
/// wave; the rest are keyed on id sets produced by that wave. List fetches
/// are capped at the per-category limit.
#[async_trait]
pub trait TimelineRepository: Send + Sync {
    /// Onboarding record for the client, if any
    async fn fetch_onboarding(&self, client_id: &str) -> Result<Option<OnboardingRow>>;

    /// All projects owned by the client
    async fn fetch_projects(&self, client_id: &str) -> Result<Vec<ProjectRow>>;

    /// Id of the client's most recent paid brand-creation order, if any
    async fn fetch_brand_order_id(&self, client_id: &str) -> Result<Option<String>>;

    /// Direct timeline messages, newest first
    async fn fetch_timeline_messages(&self, client_id: &str) -> Result<Vec<TimelineMessageRow>>;

    /// Admin-message notifications (legacy fallback channel), newest first
    async fn fetch_admin_notifications(&self, client_id: &str) -> Result<Vec<NotificationRow>>;

    /// Paid design orders with package names, newest first
    async fn fetch_paid_design_orders(
        &self,
        client_id: &str,
    ) -> Result<Vec<DesignOrderSummaryRow>>;

    /// E-mail credentials across the given projects
    async fn fetch_email_credentials(&self, project_ids: &[String]) -> Result<Vec<CredentialRow>>;

    /// Files across the given projects
    async fn fetch_files(&self, project_ids: &[String]) -> Result<Vec<FileRow>>;

    /// Tickets across the given projects
    async fn fetch_tickets(&self, project_ids: &[String]) -> Result<Vec<TicketRow>>;

    /// Deliveries on the client's brand order
    async fn fetch_brand_deliveries(&self, order_id: &str) -> Result<Vec<DesignDeliveryRow>>;

    /// The client's design feedback entries
    async fn fetch_brand_feedback(&self, client_id: &str) -> Result<Vec<DesignFeedbackRow>>;

    /// Deliveries across the given design orders, with the owning order joined
    async fn fetch_design_deliveries(&self, order_ids: &[String])
        -> Result<Vec<DesignDeliveryRow>>;
}
