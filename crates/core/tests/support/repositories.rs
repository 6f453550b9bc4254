//! Mock repository implementations for testing
//!
//! In-memory mocks for the demand and timeline ports, enabling
//! deterministic tests without a backend. Each mock can be switched into a
//! failing state to exercise the degradation paths.

use std::sync::Arc;

use async_trait::async_trait;
use opsdeck_core::demands::ports::{
    DesignOrderRepository, MigrationRepository, ProfileRepository, SlaConfigStore,
    TicketRepository,
};
use opsdeck_core::timeline::ports::TimelineRepository;
use opsdeck_domain::{
    CredentialRow, DesignDeliveryRow, DesignFeedbackRow, DesignOrderRow, DesignOrderSummaryRow,
    FileRow, MigrationRow, NotificationRow, OnboardingRow, OpsDeckError, ProfileRow, ProjectRow,
    Result, SlaConfig, TicketRow, TimelineMessageRow,
};

fn unavailable() -> OpsDeckError {
    OpsDeckError::Backend("mock source unavailable".into())
}

/// In-memory mock for `DesignOrderRepository`
#[derive(Default, Clone)]
pub struct MockDesignOrderRepository {
    orders: Arc<Vec<DesignOrderRow>>,
    failing: bool,
}

impl MockDesignOrderRepository {
    pub fn new(orders: Vec<DesignOrderRow>) -> Self {
        Self { orders: Arc::new(orders), failing: false }
    }

    /// Mock that fails every fetch
    pub fn failing() -> Self {
        Self { orders: Arc::new(Vec::new()), failing: true }
    }
}

#[async_trait]
impl DesignOrderRepository for MockDesignOrderRepository {
    async fn fetch_actionable_orders(&self) -> Result<Vec<DesignOrderRow>> {
        if self.failing {
            return Err(unavailable());
        }
        Ok(self.orders.as_ref().clone())
    }
}

/// In-memory mock for `TicketRepository`
#[derive(Default, Clone)]
pub struct MockTicketRepository {
    tickets: Arc<Vec<TicketRow>>,
    failing: bool,
}

impl MockTicketRepository {
    pub fn new(tickets: Vec<TicketRow>) -> Self {
        Self { tickets: Arc::new(tickets), failing: false }
    }

    pub fn failing() -> Self {
        Self { tickets: Arc::new(Vec::new()), failing: true }
    }
}

#[async_trait]
impl TicketRepository for MockTicketRepository {
    async fn fetch_open_tickets(&self) -> Result<Vec<TicketRow>> {
        if self.failing {
            return Err(unavailable());
        }
        Ok(self.tickets.as_ref().clone())
    }
}

/// In-memory mock for `MigrationRepository`
#[derive(Default, Clone)]
pub struct MockMigrationRepository {
    migrations: Arc<Vec<MigrationRow>>,
    failing: bool,
}

impl MockMigrationRepository {
    pub fn new(migrations: Vec<MigrationRow>) -> Self {
        Self { migrations: Arc::new(migrations), failing: false }
    }

    pub fn failing() -> Self {
        Self { migrations: Arc::new(Vec::new()), failing: true }
    }
}

#[async_trait]
impl MigrationRepository for MockMigrationRepository {
    async fn fetch_pending_migrations(&self) -> Result<Vec<MigrationRow>> {
        if self.failing {
            return Err(unavailable());
        }
        Ok(self.migrations.as_ref().clone())
    }
}

/// In-memory mock for `ProfileRepository`
#[derive(Default, Clone)]
pub struct MockProfileRepository {
    profiles: Arc<Vec<ProfileRow>>,
    failing: bool,
}

impl MockProfileRepository {
    pub fn new(profiles: Vec<ProfileRow>) -> Self {
        Self { profiles: Arc::new(profiles), failing: false }
    }

    pub fn failing() -> Self {
        Self { profiles: Arc::new(Vec::new()), failing: true }
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn fetch_profiles(&self, user_ids: &[String]) -> Result<Vec<ProfileRow>> {
        if self.failing {
            return Err(unavailable());
        }
        Ok(self
            .profiles
            .iter()
            .filter(|p| user_ids.contains(&p.user_id))
            .cloned()
            .collect())
    }
}

/// `SlaConfigStore` serving a fixed configuration
#[derive(Default, Clone)]
pub struct MockSlaConfigStore {
    config: SlaConfig,
}

impl MockSlaConfigStore {
    pub fn new(config: SlaConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SlaConfigStore for MockSlaConfigStore {
    async fn load(&self) -> Result<SlaConfig> {
        Ok(self.config.clone())
    }
}

/// In-memory mock for the whole `TimelineRepository` surface.
///
/// Seed the fields the test cares about; everything else defaults to empty.
#[derive(Default, Clone)]
pub struct MockTimelineRepository {
    pub onboarding: Option<OnboardingRow>,
    pub projects: Vec<ProjectRow>,
    pub brand_order_id: Option<String>,
    pub messages: Vec<TimelineMessageRow>,
    pub notifications: Vec<NotificationRow>,
    pub design_orders: Vec<DesignOrderSummaryRow>,
    pub credentials: Vec<CredentialRow>,
    pub files: Vec<FileRow>,
    pub tickets: Vec<TicketRow>,
    pub brand_deliveries: Vec<DesignDeliveryRow>,
    pub brand_feedback: Vec<DesignFeedbackRow>,
    pub design_deliveries: Vec<DesignDeliveryRow>,
    /// When set, project fetches fail (exercises partial degradation)
    pub fail_projects: bool,
}

#[async_trait]
impl TimelineRepository for MockTimelineRepository {
    async fn fetch_onboarding(&self, _client_id: &str) -> Result<Option<OnboardingRow>> {
        Ok(self.onboarding.clone())
    }

    async fn fetch_projects(&self, _client_id: &str) -> Result<Vec<ProjectRow>> {
        if self.fail_projects {
            return Err(unavailable());
        }
        Ok(self.projects.clone())
    }

    async fn fetch_brand_order_id(&self, _client_id: &str) -> Result<Option<String>> {
        Ok(self.brand_order_id.clone())
    }

    async fn fetch_timeline_messages(
        &self,
        _client_id: &str,
    ) -> Result<Vec<TimelineMessageRow>> {
        Ok(self.messages.clone())
    }

    async fn fetch_admin_notifications(&self, _client_id: &str) -> Result<Vec<NotificationRow>> {
        Ok(self.notifications.clone())
    }

    async fn fetch_paid_design_orders(
        &self,
        _client_id: &str,
    ) -> Result<Vec<DesignOrderSummaryRow>> {
        Ok(self.design_orders.clone())
    }

    async fn fetch_email_credentials(
        &self,
        project_ids: &[String],
    ) -> Result<Vec<CredentialRow>> {
        Ok(self
            .credentials
            .iter()
            .filter(|c| project_ids.contains(&c.project_id))
            .cloned()
            .collect())
    }

    async fn fetch_files(&self, project_ids: &[String]) -> Result<Vec<FileRow>> {
        Ok(self.files.iter().filter(|f| project_ids.contains(&f.project_id)).cloned().collect())
    }

    async fn fetch_tickets(&self, project_ids: &[String]) -> Result<Vec<TicketRow>> {
        Ok(self
            .tickets
            .iter()
            .filter(|t| t.project_id.as_ref().is_some_and(|pid| project_ids.contains(pid)))
            .cloned()
            .collect())
    }

    async fn fetch_brand_deliveries(&self, order_id: &str) -> Result<Vec<DesignDeliveryRow>> {
        Ok(self
            .brand_deliveries
            .iter()
            .filter(|d| d.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn fetch_brand_feedback(&self, _client_id: &str) -> Result<Vec<DesignFeedbackRow>> {
        Ok(self.brand_feedback.clone())
    }

    async fn fetch_design_deliveries(
        &self,
        order_ids: &[String],
    ) -> Result<Vec<DesignDeliveryRow>> {
        Ok(self
            .design_deliveries
            .iter()
            .filter(|d| order_ids.contains(&d.order_id))
            .cloned()
            .collect())
    }
}
