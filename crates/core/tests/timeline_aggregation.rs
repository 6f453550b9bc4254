//! End-to-end timeline assembly tests

mod support;

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use opsdeck_core::timeline::TimelineService;
use opsdeck_domain::constants::TIMELINE_EVENTS_LIMIT;
use opsdeck_domain::{
    DesignDeliveryRow, DesignFeedbackRow, DesignOrderSummaryRow, EventCategory, EventKind,
    FileRow, NotificationRow, OnboardingRow, OrderRef, PackageRow, ProjectRow,
    TimelineMessageRow,
};
use support::repositories::MockTimelineRepository;

const CLIENT: &str = "client-1";

fn at(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, h, 0, 0).unwrap()
}

fn service(repo: MockTimelineRepository) -> TimelineService {
    TimelineService::new(Arc::new(repo))
}

fn project(id: &str, status: &str, domain: Option<&str>) -> ProjectRow {
    ProjectRow {
        id: id.into(),
        name: "Site Institucional".into(),
        domain: domain.map(Into::into),
        status: status.into(),
        created_at: at(1),
        updated_at: at(5),
    }
}

fn message(id: &str, text: &str, sender: &str, date: DateTime<Utc>) -> TimelineMessageRow {
    TimelineMessageRow {
        id: id.into(),
        message: text.into(),
        message_type: None,
        sender_type: Some(sender.into()),
        created_at: date,
    }
}

fn notification(id: &str, text: &str, date: DateTime<Utc>) -> NotificationRow {
    NotificationRow { id: id.into(), message: Some(text.into()), created_at: date }
}

#[tokio::test]
async fn onboarding_with_brand_creation_yields_two_events() {
    let repo = MockTimelineRepository {
        onboarding: Some(OnboardingRow {
            created_at: at(0),
            selected_plan: "profissional".into(),
            needs_brand_creation: true,
        }),
        ..Default::default()
    };

    let events = service(repo).build(CLIENT).await.unwrap();
    assert_eq!(events.len(), 2);

    let subscription = events.iter().find(|e| e.kind == EventKind::Subscription).unwrap();
    assert_eq!(subscription.title, "Assinou o plano");
    assert_eq!(subscription.description, "profissional");
    assert_eq!(subscription.category, EventCategory::Geral);

    let brand = events.iter().find(|e| e.category == EventCategory::Marca).unwrap();
    assert_eq!(brand.title, "Contratou");
    assert_eq!(brand.description, "Criação de Marca");
    assert_eq!(brand.date, at(0));
}

#[tokio::test]
async fn published_event_requires_online_status_and_domain() {
    let repo = MockTimelineRepository {
        projects: vec![
            project("p1", "online", Some("padaria.com.br")),
            project("p2", "online", None),
            project("p3", "building", Some("draft.com.br")),
        ],
        ..Default::default()
    };

    let events = service(repo).build(CLIENT).await.unwrap();
    assert_eq!(events.iter().filter(|e| e.kind == EventKind::ProjectCreated).count(), 3);

    let published: Vec<_> =
        events.iter().filter(|e| e.kind == EventKind::SitePublished).collect();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].description, "padaria.com.br");
    assert_eq!(published[0].link.as_deref(), Some("https://padaria.com.br"));
    // Published uses the project's update timestamp, not creation.
    assert_eq!(published[0].date, at(5));
}

#[tokio::test]
async fn files_split_by_uploader() {
    let repo = MockTimelineRepository {
        projects: vec![project("p1", "building", None)],
        files: vec![
            FileRow {
                id: "f1".into(),
                file_name: "logo.png".into(),
                uploaded_by: Some(CLIENT.into()),
                project_id: "p1".into(),
                created_at: at(2),
            },
            FileRow {
                id: "f2".into(),
                file_name: "contrato.pdf".into(),
                uploaded_by: Some("admin-1".into()),
                project_id: "p1".into(),
                created_at: at(3),
            },
        ],
        ..Default::default()
    };

    let events = service(repo).build(CLIENT).await.unwrap();
    let by_id = |id: &str| events.iter().find(|e| e.id == id).unwrap();
    assert_eq!(by_id("file-f1").kind, EventKind::FileUploaded);
    assert_eq!(by_id("file-f1").title, "Arquivo enviado");
    assert_eq!(by_id("file-f2").kind, EventKind::FileReceived);
    assert_eq!(by_id("file-f2").title, "Arquivo recebido");
}

#[tokio::test]
async fn duplicate_admin_notification_is_suppressed() {
    let text = "Seu site está pronto";
    let repo = MockTimelineRepository {
        messages: vec![message("m1", text, "admin", at(10))],
        notifications: vec![
            // Same text 3ms later: duplicate of the message above.
            notification("n1", text, at(10) + Duration::milliseconds(3)),
            // Same text 6s later: distinct announcement, kept.
            notification("n2", text, at(10) + Duration::seconds(6)),
        ],
        ..Default::default()
    };

    let events = service(repo).build(CLIENT).await.unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().any(|e| e.id == "msg-m1"));
    assert!(events.iter().any(|e| e.id == "notif-msg-n2"));
    assert!(!events.iter().any(|e| e.id == "notif-msg-n1"));
}

#[tokio::test]
async fn brand_feedback_limited_to_brand_deliveries() {
    let repo = MockTimelineRepository {
        brand_order_id: Some("brand-1".into()),
        brand_deliveries: vec![DesignDeliveryRow {
            id: "bd1".into(),
            version_number: 2,
            status: None,
            order_id: "brand-1".into(),
            created_at: at(4),
            order: None,
        }],
        brand_feedback: vec![
            DesignFeedbackRow {
                id: "fb1".into(),
                feedback_type: "approve".into(),
                delivery_id: "bd1".into(),
                created_at: at(6),
            },
            // Feedback on an unrelated delivery stays out of the feed.
            DesignFeedbackRow {
                id: "fb2".into(),
                feedback_type: "revision".into(),
                delivery_id: "other".into(),
                created_at: at(7),
            },
        ],
        ..Default::default()
    };

    let events = service(repo).build(CLIENT).await.unwrap();
    let delivered = events.iter().find(|e| e.kind == EventKind::BrandDelivered).unwrap();
    assert_eq!(delivered.description, "Versão 2");

    let approved = events.iter().find(|e| e.kind == EventKind::BrandApproved).unwrap();
    assert_eq!(approved.title, "Logo aprovado");
    assert!(!events.iter().any(|e| e.kind == EventKind::BrandRevision));
}

#[tokio::test]
async fn design_deliveries_check_order_ownership() {
    let package = PackageRow { name: "Cartão de Visita".into(), estimated_days: None };
    let repo = MockTimelineRepository {
        design_orders: vec![DesignOrderSummaryRow {
            id: "ord-1".into(),
            status: "in_production".into(),
            created_at: at(1),
            package: Some(package.clone()),
        }],
        design_deliveries: vec![
            DesignDeliveryRow {
                id: "dd1".into(),
                version_number: 1,
                status: None,
                order_id: "ord-1".into(),
                created_at: at(3),
                order: Some(OrderRef {
                    client_id: Some(CLIENT.into()),
                    package: Some(package.clone()),
                }),
            },
            // Joined row owned by someone else never surfaces.
            DesignDeliveryRow {
                id: "dd2".into(),
                version_number: 1,
                status: None,
                order_id: "ord-1".into(),
                created_at: at(4),
                order: Some(OrderRef { client_id: Some("client-2".into()), package: None }),
            },
        ],
        ..Default::default()
    };

    let events = service(repo).build(CLIENT).await.unwrap();
    let order_event = events.iter().find(|e| e.id == "design-order-ord-1").unwrap();
    assert_eq!(order_event.title, "Pedido de design");
    assert_eq!(order_event.description, "Cartão de Visita");

    let deliveries: Vec<_> =
        events.iter().filter(|e| e.kind == EventKind::DesignOrderDelivered).collect();
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].id, "design-delivery-dd1");
    assert_eq!(deliveries[0].title, "Entrega v1");
}

#[tokio::test]
async fn feed_sorts_descending_and_caps_total() {
    let messages: Vec<TimelineMessageRow> = (0..120)
        .map(|i| {
            message(
                &format!("m{i}"),
                "oi",
                "client",
                at(0) + Duration::minutes(i),
            )
        })
        .collect();
    let repo = MockTimelineRepository { messages, ..Default::default() };

    let events = service(repo).build(CLIENT).await.unwrap();
    assert_eq!(events.len(), TIMELINE_EVENTS_LIMIT);
    assert!(events.windows(2).all(|w| w[0].date >= w[1].date));
    // The cap keeps the newest events.
    assert_eq!(events[0].id, "msg-m119");
}

#[tokio::test]
async fn failing_source_degrades_to_an_empty_contribution() {
    let repo = MockTimelineRepository {
        fail_projects: true,
        messages: vec![message("m1", "oi", "client", at(2))],
        ..Default::default()
    };

    let events = service(repo).build(CLIENT).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::ClientMessage);
}
