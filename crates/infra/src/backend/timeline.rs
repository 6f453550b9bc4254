//! Backend implementation of the timeline source port

use std::sync::Arc;

use async_trait::async_trait;
use opsdeck_core::timeline::ports::TimelineRepository;
use opsdeck_domain::constants::{
    BRAND_DELIVERIES_LIMIT, BRAND_FEEDBACK_LIMIT, BRAND_PACKAGE_ID, TIMELINE_PER_CATEGORY,
};
use opsdeck_domain::{
    CredentialRow, DesignDeliveryRow, DesignFeedbackRow, DesignOrderSummaryRow, FileRow,
    NotificationRow, OnboardingRow, ProjectRow, Result, TicketRow, TimelineMessageRow,
};
use serde::Deserialize;

use super::client::BackendClient;

#[derive(Debug, Deserialize)]
struct IdRow {
    id: String,
}

/// Timeline source fetches backed by the hosted REST interface
pub struct BackendTimelineRepository {
    client: Arc<BackendClient>,
}

impl BackendTimelineRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TimelineRepository for BackendTimelineRepository {
    async fn fetch_onboarding(&self, client_id: &str) -> Result<Option<OnboardingRow>> {
        self.client
            .table("client_onboarding")
            .select("created_at,selected_plan,needs_brand_creation")
            .eq("user_id", client_id)
            .maybe_single()
            .await
    }

    async fn fetch_projects(&self, client_id: &str) -> Result<Vec<ProjectRow>> {
        self.client
            .table("client_projects")
            .select("id,name,domain,status,created_at,updated_at")
            .eq("client_id", client_id)
            .fetch()
            .await
    }

    async fn fetch_brand_order_id(&self, client_id: &str) -> Result<Option<String>> {
        let row: Option<IdRow> = self
            .client
            .table("design_orders")
            .select("id")
            .eq("client_id", client_id)
            .eq("package_id", BRAND_PACKAGE_ID)
            .eq("payment_status", "paid")
            .order_desc("created_at")
            .maybe_single()
            .await?;
        Ok(row.map(|r| r.id))
    }

    async fn fetch_timeline_messages(
        &self,
        client_id: &str,
    ) -> Result<Vec<TimelineMessageRow>> {
        self.client
            .table("timeline_messages")
            .select("id,message,message_type,created_at,sender_type")
            .eq("client_id", client_id)
            .order_desc("created_at")
            .limit(TIMELINE_PER_CATEGORY)
            .fetch()
            .await
    }

    async fn fetch_admin_notifications(&self, client_id: &str) -> Result<Vec<NotificationRow>> {
        self.client
            .table("notifications")
            .select("id,message,created_at")
            .eq("user_id", client_id)
            .eq("type", "admin_message")
            .order_desc("created_at")
            .limit(TIMELINE_PER_CATEGORY)
            .fetch()
            .await
    }

    async fn fetch_paid_design_orders(
        &self,
        client_id: &str,
    ) -> Result<Vec<DesignOrderSummaryRow>> {
        self.client
            .table("design_orders")
            .select("id,status,created_at,package:design_packages(name,estimated_days)")
            .eq("client_id", client_id)
            .eq("payment_status", "paid")
            .order_desc("created_at")
            .limit(TIMELINE_PER_CATEGORY)
            .fetch()
            .await
    }

    async fn fetch_email_credentials(
        &self,
        project_ids: &[String],
    ) -> Result<Vec<CredentialRow>> {
        self.client
            .table("project_credentials")
            .select("id,label,created_at,credential_type,project_id")
            .in_list("project_id", project_ids)
            .eq("credential_type", "email")
            .order_desc("created_at")
            .limit(TIMELINE_PER_CATEGORY)
            .fetch()
            .await
    }

    async fn fetch_files(&self, project_ids: &[String]) -> Result<Vec<FileRow>> {
        self.client
            .table("project_files")
            .select("id,file_name,created_at,uploaded_by,project_id")
            .in_list("project_id", project_ids)
            .order_desc("created_at")
            .limit(TIMELINE_PER_CATEGORY)
            .fetch()
            .await
    }

    async fn fetch_tickets(&self, project_ids: &[String]) -> Result<Vec<TicketRow>> {
        self.client
            .table("project_tickets")
            .select("id,title,created_at,resolved_at,status,project_id")
            .in_list("project_id", project_ids)
            .order_desc("created_at")
            .limit(TIMELINE_PER_CATEGORY)
            .fetch()
            .await
    }

    async fn fetch_brand_deliveries(&self, order_id: &str) -> Result<Vec<DesignDeliveryRow>> {
        self.client
            .table("design_deliveries")
            .select("id,version_number,created_at,status,order_id")
            .eq("order_id", order_id)
            .order_desc("created_at")
            .limit(BRAND_DELIVERIES_LIMIT)
            .fetch()
            .await
    }

    async fn fetch_brand_feedback(&self, client_id: &str) -> Result<Vec<DesignFeedbackRow>> {
        self.client
            .table("design_feedback")
            .select("id,feedback_type,created_at,delivery_id")
            .eq("user_id", client_id)
            .order_desc("created_at")
            .limit(BRAND_FEEDBACK_LIMIT)
            .fetch()
            .await
    }

    async fn fetch_design_deliveries(
        &self,
        order_ids: &[String],
    ) -> Result<Vec<DesignDeliveryRow>> {
        self.client
            .table("design_deliveries")
            .select(
                "id,version_number,status,created_at,order_id,\
                 order:design_orders(client_id,package:design_packages(name,estimated_days))",
            )
            .in_list("order_id", order_ids)
            .order_desc("created_at")
            .limit(TIMELINE_PER_CATEGORY)
            .fetch()
            .await
    }
}
