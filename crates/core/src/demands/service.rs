//! Demand board service - core business logic

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use opsdeck_domain::{
    Demand, DemandBoard, DemandKind, DemandSource, DesignOrderRow, MigrationRow, ProfileRow,
    Result, SlaConfig, SourceFailure, TicketPriority, TicketRow, Urgency,
};
use tracing::{instrument, warn};

use super::ports::{
    DesignOrderRepository, MigrationRepository, ProfileRepository, SlaConfigStore,
    TicketRepository,
};
use super::sla;
use crate::notify::ports::DemandFeed;

/// Fallback display name when no profile resolves
const FALLBACK_CLIENT_NAME: &str = "Cliente";

/// Demand board service: fans out to the three demand sources, attaches SLA
/// deadlines and produces one ranked list.
pub struct DemandService {
    orders: Arc<dyn DesignOrderRepository>,
    tickets: Arc<dyn TicketRepository>,
    migrations: Arc<dyn MigrationRepository>,
    profiles: Arc<dyn ProfileRepository>,
    sla_config: Arc<dyn SlaConfigStore>,
}

impl DemandService {
    /// Create a new demand board service
    pub fn new(
        orders: Arc<dyn DesignOrderRepository>,
        tickets: Arc<dyn TicketRepository>,
        migrations: Arc<dyn MigrationRepository>,
        profiles: Arc<dyn ProfileRepository>,
        sla_config: Arc<dyn SlaConfigStore>,
    ) -> Self {
        Self { orders, tickets, migrations, profiles, sla_config }
    }

    /// Build the ranked demand board as of `now`.
    ///
    /// The three sources are fetched concurrently; a failing source is
    /// reported in `failed_sources` and does not block its siblings.
    #[instrument(skip(self))]
    pub async fn fetch_board(&self, now: DateTime<Utc>) -> Result<DemandBoard> {
        let config = match self.sla_config.load().await {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "Failed to load SLA config, using defaults");
                SlaConfig::default()
            }
        };

        let (orders, tickets, migrations) = tokio::join!(
            self.fetch_design_demands(&config),
            self.fetch_ticket_demands(&config),
            self.fetch_migration_demands(&config),
        );

        let mut demands = Vec::new();
        let mut failed_sources = Vec::new();
        for (source, outcome) in [
            (DemandSource::DesignOrders, orders),
            (DemandSource::Tickets, tickets),
            (DemandSource::Migrations, migrations),
        ] {
            match outcome {
                Ok(mut batch) => demands.append(&mut batch),
                Err(err) => {
                    warn!(?source, error = %err, "Demand source fetch failed");
                    failed_sources.push(SourceFailure { source, error: err.to_string() });
                }
            }
        }

        sort_demands(&mut demands, now);

        let warning_percent = config.notifications.warning_percent;
        let mut overdue = 0;
        let mut urgent = 0;
        let mut normal = 0;
        for demand in &demands {
            match demand.urgency(now, warning_percent) {
                Urgency::Overdue => overdue += 1,
                Urgency::Warning => urgent += 1,
                Urgency::Normal => normal += 1,
            }
        }

        Ok(DemandBoard { demands, overdue, urgent, normal, failed_sources })
    }

    async fn fetch_design_demands(&self, config: &SlaConfig) -> Result<Vec<Demand>> {
        let orders = self.orders.fetch_actionable_orders().await?;
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let client_ids = collect_ids(orders.iter().map(|o| o.client_id.as_deref()));
        let profiles = self.profile_map(&client_ids).await;

        Ok(orders.into_iter().map(|order| design_demand(order, config, &profiles)).collect())
    }

    async fn fetch_ticket_demands(&self, config: &SlaConfig) -> Result<Vec<Demand>> {
        let tickets = self.tickets.fetch_open_tickets().await?;
        if tickets.is_empty() {
            return Ok(Vec::new());
        }

        let client_ids = collect_ids(
            tickets.iter().map(|t| t.project.as_ref().and_then(|p| p.client_id.as_deref())),
        );
        let profiles = self.profile_map(&client_ids).await;

        Ok(tickets.into_iter().map(|ticket| ticket_demand(ticket, config, &profiles)).collect())
    }

    async fn fetch_migration_demands(&self, config: &SlaConfig) -> Result<Vec<Demand>> {
        let migrations = self.migrations.fetch_pending_migrations().await?;
        Ok(migrations.into_iter().map(|migration| migration_demand(migration, config)).collect())
    }

    /// Resolve profiles for a set of client ids.
    ///
    /// A lookup failure degrades to an empty map; demands then fall back to
    /// the generic client label rather than dropping out of the board.
    async fn profile_map(&self, client_ids: &[String]) -> HashMap<String, ProfileRow> {
        if client_ids.is_empty() {
            return HashMap::new();
        }
        match self.profiles.fetch_profiles(client_ids).await {
            Ok(profiles) => profiles.into_iter().map(|p| (p.user_id.clone(), p)).collect(),
            Err(err) => {
                warn!(error = %err, "Profile lookup failed, using fallback names");
                HashMap::new()
            }
        }
    }
}

#[async_trait]
impl DemandFeed for DemandService {
    async fn current(&self, now: DateTime<Utc>) -> Result<Vec<Demand>> {
        Ok(self.fetch_board(now).await?.demands)
    }
}

fn collect_ids<'a>(ids: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut out: Vec<String> = ids.flatten().map(str::to_owned).collect();
    out.sort_unstable();
    out.dedup();
    out
}

fn design_demand(
    order: DesignOrderRow,
    config: &SlaConfig,
    profiles: &HashMap<String, ProfileRow>,
) -> Demand {
    let package_name = order.package.as_ref().map(|p| p.name.clone());
    let package_estimate = order.package.as_ref().and_then(|p| p.estimated_days);
    let base_days = sla::design_base_estimate(config, package_estimate);

    let (kind, estimated_days, deadline) = if order.status == "revision_requested" {
        let window = sla::revision_window_days(config, base_days);
        (DemandKind::DesignRevision, window, sla::deadline_after_days(order.updated_at, window))
    } else {
        (DemandKind::DesignNew, base_days, sla::deadline_after_days(order.created_at, base_days))
    };

    let client_name = order
        .client_id
        .as_ref()
        .and_then(|id| profiles.get(id))
        .and_then(ProfileRow::display_name)
        .unwrap_or(FALLBACK_CLIENT_NAME)
        .to_owned();

    Demand {
        id: order.id,
        kind,
        title: package_name.clone().unwrap_or_else(|| "Pedido de Design".to_owned()),
        client_name,
        status: order.status,
        created_at: order.created_at,
        updated_at: order.updated_at,
        deadline,
        estimated_days,
        priority: None,
        project_id: None,
        package_name,
        revisions_used: Some(order.revisions_used.unwrap_or(0)),
        max_revisions: Some(order.max_revisions.unwrap_or(2)),
        migration_domain: None,
        migration_site_type: None,
    }
}

fn ticket_demand(
    ticket: TicketRow,
    config: &SlaConfig,
    profiles: &HashMap<String, ProfileRow>,
) -> Demand {
    let priority = TicketPriority::parse(ticket.priority.as_deref().unwrap_or_default());
    let sla_hours = sla::ticket_sla_hours(config, priority);
    let deadline = sla::deadline_after_hours(ticket.created_at, sla_hours);

    let project = ticket.project.as_ref();
    let client_name = project
        .and_then(|p| p.client_id.as_ref())
        .and_then(|id| profiles.get(id))
        .and_then(ProfileRow::display_name)
        .or_else(|| project.and_then(|p| p.name.as_deref()))
        .unwrap_or(FALLBACK_CLIENT_NAME)
        .to_owned();

    Demand {
        id: ticket.id,
        kind: DemandKind::Ticket,
        title: ticket.title,
        client_name,
        status: ticket.status,
        created_at: ticket.created_at,
        updated_at: ticket.updated_at.unwrap_or(ticket.created_at),
        deadline,
        estimated_days: sla_hours / 24.0,
        priority: Some(priority),
        project_id: project.map(|p| p.id.clone()),
        package_name: None,
        revisions_used: None,
        max_revisions: None,
        migration_domain: None,
        migration_site_type: None,
    }
}

fn migration_demand(migration: MigrationRow, config: &SlaConfig) -> Demand {
    let window_days = config.migration.default_days;
    let deadline = sla::deadline_after_days(migration.created_at, window_days);
    let site_type = migration.site_type.as_deref().map(site_type_label);

    Demand {
        id: migration.id,
        kind: DemandKind::Migration,
        title: format!("Migração: {}", migration.current_domain),
        client_name: migration.name,
        status: migration.status,
        created_at: migration.created_at,
        updated_at: migration.updated_at.unwrap_or(migration.created_at),
        deadline,
        estimated_days: window_days,
        priority: None,
        project_id: None,
        package_name: None,
        revisions_used: None,
        max_revisions: None,
        migration_domain: Some(migration.current_domain),
        migration_site_type: site_type,
    }
}

fn site_type_label(raw: &str) -> String {
    match raw {
        "wordpress" => "WordPress".to_owned(),
        "html" => "HTML/CSS".to_owned(),
        "wix" => "Wix".to_owned(),
        "squarespace" => "Squarespace".to_owned(),
        "ecommerce" => "E-commerce".to_owned(),
        "outro" => "Outro".to_owned(),
        other => other.to_owned(),
    }
}

/// Sort demands by urgency: overdue items first, then least time remaining.
///
/// The sort is stable, so ties keep their input order.
fn sort_demands(demands: &mut [Demand], now: DateTime<Utc>) {
    demands.sort_by_key(|d| {
        let remaining = (d.deadline - now).num_milliseconds();
        (remaining >= 0, remaining)
    });
}
