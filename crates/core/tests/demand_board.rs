//! End-to-end demand board assembly tests

mod support;

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use opsdeck_core::demands::DemandService;
use opsdeck_domain::{
    DemandKind, DemandSource, DesignOrderRow, MigrationRow, PackageRow, ProfileRow, ProjectRef,
    SlaConfig, TicketPriority, TicketRow,
};
use support::repositories::{
    MockDesignOrderRepository, MockMigrationRepository, MockProfileRepository,
    MockSlaConfigStore, MockTicketRepository,
};

fn at(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, h, 0, 0).unwrap()
}

fn order(id: &str, client: &str, status: &str, created: DateTime<Utc>) -> DesignOrderRow {
    DesignOrderRow {
        id: id.into(),
        client_id: Some(client.into()),
        status: status.into(),
        revisions_used: Some(1),
        max_revisions: Some(2),
        created_at: created,
        updated_at: created + Duration::hours(2),
        package: Some(PackageRow { name: "Logo Premium".into(), estimated_days: Some(4.0) }),
    }
}

fn ticket(id: &str, priority: &str, created: DateTime<Utc>) -> TicketRow {
    TicketRow {
        id: id.into(),
        title: "Erro no formulário".into(),
        status: "open".into(),
        priority: Some(priority.into()),
        created_at: created,
        updated_at: None,
        resolved_at: None,
        project: Some(ProjectRef {
            id: "proj-1".into(),
            name: Some("Site Institucional".into()),
            client_id: Some("client-1".into()),
        }),
        project_id: None,
    }
}

fn migration(id: &str, created: DateTime<Utc>) -> MigrationRow {
    MigrationRow {
        id: id.into(),
        name: "Mercearia Dois Irmãos".into(),
        status: "pending".into(),
        current_domain: "mercearia.com.br".into(),
        site_type: Some("wordpress".into()),
        created_at: created,
        updated_at: None,
    }
}

fn profile(user_id: &str, company: Option<&str>, name: Option<&str>) -> ProfileRow {
    ProfileRow {
        user_id: user_id.into(),
        full_name: name.map(Into::into),
        company_name: company.map(Into::into),
    }
}

fn service(
    orders: MockDesignOrderRepository,
    tickets: MockTicketRepository,
    migrations: MockMigrationRepository,
    profiles: MockProfileRepository,
) -> DemandService {
    DemandService::new(
        Arc::new(orders),
        Arc::new(tickets),
        Arc::new(migrations),
        Arc::new(profiles),
        Arc::new(MockSlaConfigStore::new(SlaConfig::default())),
    )
}

#[tokio::test]
async fn board_merges_all_three_sources() {
    let svc = service(
        MockDesignOrderRepository::new(vec![order("o1", "client-1", "paid", at(0))]),
        MockTicketRepository::new(vec![ticket("t1", "urgent", at(0))]),
        MockMigrationRepository::new(vec![migration("m1", at(0))]),
        MockProfileRepository::new(vec![profile("client-1", Some("Padaria Central"), None)]),
    );

    let board = svc.fetch_board(at(1)).await.unwrap();
    assert_eq!(board.demands.len(), 3);
    assert!(board.failed_sources.is_empty());

    let kinds: Vec<DemandKind> = board.demands.iter().map(|d| d.kind).collect();
    assert!(kinds.contains(&DemandKind::DesignNew));
    assert!(kinds.contains(&DemandKind::Ticket));
    assert!(kinds.contains(&DemandKind::Migration));
}

#[tokio::test]
async fn deadlines_follow_the_sla_rules() {
    let svc = service(
        MockDesignOrderRepository::new(vec![
            order("new", "client-1", "paid", at(0)),
            order("rev", "client-1", "revision_requested", at(0)),
        ]),
        MockTicketRepository::new(vec![ticket("t1", "urgent", at(0))]),
        MockMigrationRepository::new(vec![migration("m1", at(0))]),
        MockProfileRepository::default(),
    );

    let board = svc.fetch_board(at(1)).await.unwrap();
    let by_id = |id: &str| board.demands.iter().find(|d| d.id == id).unwrap();

    // New order: package estimate of 4 days from creation.
    assert_eq!(by_id("new").deadline, at(0) + Duration::days(4));
    assert_eq!(by_id("new").estimated_days, 4.0);

    // Revision: 50% of 4 days from the update timestamp (floored at 24h).
    let rev = by_id("rev");
    assert_eq!(rev.kind, DemandKind::DesignRevision);
    assert_eq!(rev.estimated_days, 2.0);
    assert_eq!(rev.deadline, rev.updated_at + Duration::days(2));

    // Urgent ticket: 6 hours from creation.
    assert_eq!(by_id("t1").deadline, at(6));
    assert_eq!(by_id("t1").priority, Some(TicketPriority::Urgent));

    // Migration: flat 3 days.
    assert_eq!(by_id("m1").deadline, at(0) + Duration::days(3));
}

#[tokio::test]
async fn overdue_demands_rank_before_upcoming_ones() {
    let now = at(12);
    let svc = service(
        MockDesignOrderRepository::new(vec![order("o1", "client-1", "paid", at(0))]),
        // Urgent ticket created 12h ago breached its 6h window at hour 6.
        MockTicketRepository::new(vec![ticket("t1", "urgent", at(0))]),
        MockMigrationRepository::new(vec![migration("m1", at(0))]),
        MockProfileRepository::default(),
    );

    let board = svc.fetch_board(now).await.unwrap();
    assert_eq!(board.demands[0].id, "t1");
    assert_eq!(board.overdue, 1);
    assert_eq!(board.urgent, 0);
    assert_eq!(board.normal, 2);

    // Remaining time ascends within the non-overdue partition.
    let remaining: Vec<i64> = board.demands[1..]
        .iter()
        .map(|d| (d.deadline - now).num_milliseconds())
        .collect();
    assert!(remaining.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn failing_source_degrades_without_blocking_siblings() {
    let svc = service(
        MockDesignOrderRepository::new(vec![order("o1", "client-1", "paid", at(0))]),
        MockTicketRepository::failing(),
        MockMigrationRepository::new(vec![migration("m1", at(0))]),
        MockProfileRepository::default(),
    );

    let board = svc.fetch_board(at(1)).await.unwrap();
    assert_eq!(board.demands.len(), 2);
    assert_eq!(board.failed_sources.len(), 1);
    assert_eq!(board.failed_sources[0].source, DemandSource::Tickets);
}

#[tokio::test]
async fn client_names_resolve_with_fallbacks() {
    let svc = service(
        MockDesignOrderRepository::new(vec![
            order("o1", "client-1", "paid", at(0)),
            order("o2", "client-2", "paid", at(0)),
            order("o3", "client-3", "paid", at(0)),
        ]),
        MockTicketRepository::new(vec![ticket("t1", "high", at(0))]),
        MockMigrationRepository::default(),
        MockProfileRepository::new(vec![
            profile("client-1", Some("Padaria Central"), Some("Ana Souza")),
            profile("client-2", None, Some("Bruno Lima")),
        ]),
    );

    let board = svc.fetch_board(at(1)).await.unwrap();
    let name = |id: &str| {
        board.demands.iter().find(|d| d.id == id).unwrap().client_name.clone()
    };

    // Company name wins, then full name, then the generic label.
    assert_eq!(name("o1"), "Padaria Central");
    assert_eq!(name("o2"), "Bruno Lima");
    assert_eq!(name("o3"), "Cliente");
    // Tickets resolve through the project's client.
    assert_eq!(name("t1"), "Padaria Central");
}

#[tokio::test]
async fn profile_lookup_failure_falls_back_to_generic_names() {
    let svc = service(
        MockDesignOrderRepository::new(vec![order("o1", "client-1", "paid", at(0))]),
        MockTicketRepository::default(),
        MockMigrationRepository::default(),
        MockProfileRepository::failing(),
    );

    let board = svc.fetch_board(at(1)).await.unwrap();
    assert_eq!(board.demands.len(), 1);
    assert_eq!(board.demands[0].client_name, "Cliente");
    assert!(board.failed_sources.is_empty());
}

#[tokio::test]
async fn migration_demands_carry_display_fields() {
    let svc = service(
        MockDesignOrderRepository::default(),
        MockTicketRepository::default(),
        MockMigrationRepository::new(vec![migration("m1", at(0))]),
        MockProfileRepository::default(),
    );

    let board = svc.fetch_board(at(1)).await.unwrap();
    let demand = &board.demands[0];
    assert_eq!(demand.title, "Migração: mercearia.com.br");
    assert_eq!(demand.client_name, "Mercearia Dois Irmãos");
    assert_eq!(demand.migration_site_type.as_deref(), Some("WordPress"));
}
