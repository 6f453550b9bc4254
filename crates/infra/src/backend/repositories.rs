//! Repository implementations for the demand board ports

use std::sync::Arc;

use async_trait::async_trait;
use opsdeck_core::demands::ports::{
    DesignOrderRepository, MigrationRepository, ProfileRepository, SlaConfigStore,
    TicketRepository,
};
use opsdeck_domain::constants::SLA_CONFIG_KEY;
use opsdeck_domain::{
    DesignOrderRow, MigrationRow, ProfileRow, Result, SlaConfig, TicketRow,
};
use serde::Deserialize;
use tracing::warn;

use super::client::BackendClient;

const ACTIONABLE_ORDER_STATUSES: [&str; 4] =
    ["revision_requested", "paid", "confirmed", "in_production"];
const OPEN_TICKET_STATUSES: [&str; 2] = ["open", "in_progress"];
const PENDING_MIGRATION_STATUSES: [&str; 3] = ["pending", "in_progress", "analyzing"];

fn owned(statuses: &[&str]) -> Vec<String> {
    statuses.iter().map(|s| (*s).to_owned()).collect()
}

/// Design orders needing admin action, with the package relation joined
pub struct BackendDesignOrderRepository {
    client: Arc<BackendClient>,
}

impl BackendDesignOrderRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DesignOrderRepository for BackendDesignOrderRepository {
    async fn fetch_actionable_orders(&self) -> Result<Vec<DesignOrderRow>> {
        self.client
            .table("design_orders")
            .select(
                "id,client_id,status,revisions_used,max_revisions,created_at,updated_at,\
                 package:design_packages(name,estimated_days)",
            )
            .in_list("status", &owned(&ACTIONABLE_ORDER_STATUSES))
            .order_asc("updated_at")
            .fetch()
            .await
    }
}

/// Open support tickets with the project relation joined
pub struct BackendTicketRepository {
    client: Arc<BackendClient>,
}

impl BackendTicketRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TicketRepository for BackendTicketRepository {
    async fn fetch_open_tickets(&self) -> Result<Vec<TicketRow>> {
        self.client
            .table("project_tickets")
            .select(
                "id,title,status,priority,created_at,updated_at,resolved_at,\
                 project:client_projects(id,name,client_id)",
            )
            .in_list("status", &owned(&OPEN_TICKET_STATUSES))
            .order_asc("created_at")
            .fetch()
            .await
    }
}

/// Migration requests that still need work
pub struct BackendMigrationRepository {
    client: Arc<BackendClient>,
}

impl BackendMigrationRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MigrationRepository for BackendMigrationRepository {
    async fn fetch_pending_migrations(&self) -> Result<Vec<MigrationRow>> {
        self.client
            .table("migration_requests")
            .select("id,name,status,current_domain,site_type,created_at,updated_at")
            .in_list("status", &owned(&PENDING_MIGRATION_STATUSES))
            .order_asc("created_at")
            .fetch()
            .await
    }
}

/// Client profiles for display-name resolution
pub struct BackendProfileRepository {
    client: Arc<BackendClient>,
}

impl BackendProfileRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileRepository for BackendProfileRepository {
    async fn fetch_profiles(&self, user_ids: &[String]) -> Result<Vec<ProfileRow>> {
        self.client
            .table("profiles")
            .select("user_id,full_name,company_name")
            .in_list("user_id", user_ids)
            .fetch()
            .await
    }
}

#[derive(Debug, Deserialize)]
struct SettingRow {
    value: serde_json::Value,
}

/// SLA configuration stored as one JSON document in `system_settings`.
///
/// Partial documents merge over the built-in defaults; a missing or
/// malformed document, or a failing fetch, silently yields defaults. SLA
/// config can never take the board down.
pub struct SystemSettingsSlaStore {
    client: Arc<BackendClient>,
}

impl SystemSettingsSlaStore {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SlaConfigStore for SystemSettingsSlaStore {
    async fn load(&self) -> Result<SlaConfig> {
        let row: Option<SettingRow> = match self
            .client
            .table("system_settings")
            .select("value")
            .eq("key", SLA_CONFIG_KEY)
            .maybe_single()
            .await
        {
            Ok(row) => row,
            Err(err) => {
                warn!(error = %err, "SLA config fetch failed, using defaults");
                return Ok(SlaConfig::default());
            }
        };

        Ok(row.map(|r| SlaConfig::from_backend_value(r.value)).unwrap_or_default())
    }
}
