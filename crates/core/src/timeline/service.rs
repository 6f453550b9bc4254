//! Timeline assembly service

use std::sync::Arc;

use opsdeck_domain::constants::TIMELINE_EVENTS_LIMIT;
use opsdeck_domain::{
    CredentialRow, DesignDeliveryRow, DesignFeedbackRow, DesignOrderSummaryRow, EventKind,
    FileRow, MessageTone, NotificationRow, OnboardingRow, ProjectRow, Result, TicketRow,
    TimelineEvent, TimelineMessageRow,
};
use tracing::{instrument, warn};

use super::ports::TimelineRepository;

/// Two admin messages with identical text this close together are the same
/// announcement arriving over both channels, in milliseconds
const DUPLICATE_WINDOW_MS: i64 = 5000;

/// Assembles a client's activity feed from the timeline sources.
///
/// Fetches run in two waves: the client-keyed sources first, then the
/// sources keyed on id sets the first wave produced. A failing source
/// degrades to an empty contribution so one outage never blanks the feed.
pub struct TimelineService {
    repo: Arc<dyn TimelineRepository>,
}

impl TimelineService {
    pub fn new(repo: Arc<dyn TimelineRepository>) -> Self {
        Self { repo }
    }

    /// Build the feed for one client: normalize every source row, sort
    /// descending by date and truncate to the feed cap.
    #[instrument(skip(self))]
    pub async fn build(&self, client_id: &str) -> Result<Vec<TimelineEvent>> {
        let (onboarding, projects, brand_order_id, messages, notifications, design_orders) = tokio::join!(
            self.repo.fetch_onboarding(client_id),
            self.repo.fetch_projects(client_id),
            self.repo.fetch_brand_order_id(client_id),
            self.repo.fetch_timeline_messages(client_id),
            self.repo.fetch_admin_notifications(client_id),
            self.repo.fetch_paid_design_orders(client_id),
        );

        let onboarding = or_empty("onboarding", onboarding);
        let projects = or_empty("projects", projects);
        let brand_order_id = or_empty("brand_order", brand_order_id);
        let messages = or_empty("timeline_messages", messages);
        let notifications = or_empty("admin_notifications", notifications);
        let design_orders = or_empty("design_orders", design_orders);

        let project_ids: Vec<String> = projects.iter().map(|p| p.id.clone()).collect();
        let order_ids: Vec<String> = design_orders.iter().map(|o| o.id.clone()).collect();

        // Second wave, gated on the ids the first wave produced.
        let (credentials, files, tickets) = if project_ids.is_empty() {
            (Vec::new(), Vec::new(), Vec::new())
        } else {
            let (credentials, files, tickets) = tokio::join!(
                self.repo.fetch_email_credentials(&project_ids),
                self.repo.fetch_files(&project_ids),
                self.repo.fetch_tickets(&project_ids),
            );
            (
                or_empty("credentials", credentials),
                or_empty("files", files),
                or_empty("tickets", tickets),
            )
        };

        let (brand_deliveries, brand_feedback) = match &brand_order_id {
            Some(order_id) => {
                let (deliveries, feedback) = tokio::join!(
                    self.repo.fetch_brand_deliveries(order_id),
                    self.repo.fetch_brand_feedback(client_id),
                );
                (or_empty("brand_deliveries", deliveries), or_empty("brand_feedback", feedback))
            }
            None => (Vec::new(), Vec::new()),
        };

        let design_deliveries = if order_ids.is_empty() {
            Vec::new()
        } else {
            or_empty("design_deliveries", self.repo.fetch_design_deliveries(&order_ids).await)
        };

        let mut events = Vec::new();
        if let Some(onboarding) = onboarding {
            push_onboarding_events(&mut events, &onboarding);
        }
        for project in &projects {
            push_project_events(&mut events, project);
        }
        for credential in &credentials {
            events.push(credential_event(credential));
        }
        for file in &files {
            events.push(file_event(file, client_id));
        }
        for ticket in &tickets {
            push_ticket_events(&mut events, ticket);
        }
        for delivery in &brand_deliveries {
            events.push(brand_delivery_event(delivery));
        }
        for feedback in &brand_feedback {
            // Only feedback on this client's brand deliveries belongs here.
            if brand_deliveries.iter().any(|d| d.id == feedback.delivery_id) {
                events.push(brand_feedback_event(feedback));
            }
        }
        for message in &messages {
            events.push(message_event(message));
        }
        for notification in &notifications {
            if !is_duplicate_notification(&events, notification) {
                events.push(notification_event(notification));
            }
        }
        for order in &design_orders {
            events.push(design_order_event(order));
        }
        for delivery in &design_deliveries {
            // Joined rows can leak deliveries on shared orders; keep only
            // the client's own.
            let owned = delivery
                .order
                .as_ref()
                .and_then(|o| o.client_id.as_deref())
                .is_some_and(|id| id == client_id);
            if owned {
                events.push(design_delivery_event(delivery));
            }
        }

        events.sort_by(|a, b| b.date.cmp(&a.date));
        events.truncate(TIMELINE_EVENTS_LIMIT);
        Ok(events)
    }
}

/// Coerce a failed source fetch to its empty value, logging the failure
fn or_empty<T: Default>(source: &str, outcome: Result<T>) -> T {
    match outcome {
        Ok(value) => value,
        Err(err) => {
            warn!(source, error = %err, "Timeline source fetch failed, continuing without it");
            T::default()
        }
    }
}

fn push_onboarding_events(events: &mut Vec<TimelineEvent>, onboarding: &OnboardingRow) {
    events.push(TimelineEvent::new(
        format!("onboarding-{}", onboarding.created_at.timestamp_millis()),
        EventKind::Subscription,
        onboarding.created_at,
        "Assinou o plano",
        onboarding.selected_plan.clone(),
    ));

    if onboarding.needs_brand_creation {
        events.push(TimelineEvent::new(
            format!("brand-contracted-{}", onboarding.created_at.timestamp_millis()),
            EventKind::BrandDelivered,
            onboarding.created_at,
            "Contratou",
            "Criação de Marca",
        ));
    }
}

fn push_project_events(events: &mut Vec<TimelineEvent>, project: &ProjectRow) {
    events.push(
        TimelineEvent::new(
            format!("project-created-{}", project.id),
            EventKind::ProjectCreated,
            project.created_at,
            "Projeto criado",
            project.name.clone(),
        )
        .with_link(format!("/cliente/projeto/{}/configuracoes", project.id)),
    );

    if project.status == "online" {
        if let Some(domain) = &project.domain {
            events.push(
                TimelineEvent::new(
                    format!("site-published-{}", project.id),
                    EventKind::SitePublished,
                    project.updated_at,
                    "Site publicado",
                    domain.clone(),
                )
                .with_link(format!("https://{domain}")),
            );
        }
    }
}

fn credential_event(credential: &CredentialRow) -> TimelineEvent {
    TimelineEvent::new(
        format!("email-{}", credential.id),
        EventKind::EmailCreated,
        credential.created_at,
        "E-mail criado",
        credential.label.clone(),
    )
    .with_link(format!("/cliente/projeto/{}/emails", credential.project_id))
}

fn file_event(file: &FileRow, client_id: &str) -> TimelineEvent {
    let uploaded = file.uploaded_by.as_deref() == Some(client_id);
    let (kind, title) = if uploaded {
        (EventKind::FileUploaded, "Arquivo enviado")
    } else {
        (EventKind::FileReceived, "Arquivo recebido")
    };
    TimelineEvent::new(
        format!("file-{}", file.id),
        kind,
        file.created_at,
        title,
        file.file_name.clone(),
    )
    .with_link(format!("/cliente/projeto/{}/arquivos", file.project_id))
}

fn push_ticket_events(events: &mut Vec<TimelineEvent>, ticket: &TicketRow) {
    let link = ticket
        .project_id
        .as_ref()
        .map(|pid| format!("/cliente/projeto/{pid}/tickets?ticket={}", ticket.id));

    let mut created = TimelineEvent::new(
        format!("ticket-created-{}", ticket.id),
        EventKind::TicketCreated,
        ticket.created_at,
        "Ticket criado",
        ticket.title.clone(),
    );
    created.link = link.clone();
    events.push(created);

    if let Some(resolved_at) = ticket.resolved_at {
        let mut resolved = TimelineEvent::new(
            format!("ticket-resolved-{}", ticket.id),
            EventKind::TicketResolved,
            resolved_at,
            "Ticket resolvido",
            ticket.title.clone(),
        );
        resolved.link = link;
        events.push(resolved);
    }
}

fn brand_delivery_event(delivery: &DesignDeliveryRow) -> TimelineEvent {
    TimelineEvent::new(
        format!("brand-delivery-{}", delivery.id),
        EventKind::BrandDelivered,
        delivery.created_at,
        "Logo entregue",
        format!("Versão {}", delivery.version_number),
    )
    .with_link("/cliente/design")
}

fn brand_feedback_event(feedback: &DesignFeedbackRow) -> TimelineEvent {
    let approved = feedback.feedback_type == "approve";
    let (kind, title, description) = if approved {
        (EventKind::BrandApproved, "Logo aprovado", "Identidade visual finalizada!")
    } else {
        (EventKind::BrandRevision, "Revisão solicitada", "Ajustes solicitados na logo")
    };
    TimelineEvent::new(
        format!("brand-feedback-{}", feedback.id),
        kind,
        feedback.created_at,
        title,
        description,
    )
    .with_link("/cliente/design")
}

fn message_event(message: &TimelineMessageRow) -> TimelineEvent {
    let from_client = message.sender_type.as_deref() == Some("client");
    let (kind, title) = if from_client {
        (EventKind::ClientMessage, "Sua mensagem")
    } else {
        let tone = MessageTone::canonicalize(message.message_type.as_deref());
        (EventKind::admin_message(tone), "Mensagem da agência")
    };
    TimelineEvent::new(
        format!("msg-{}", message.id),
        kind,
        message.created_at,
        title,
        message.message.clone(),
    )
}

/// A notification row duplicates an already-collected admin message when the
/// text is identical and the timestamps fall within the duplicate window.
fn is_duplicate_notification(events: &[TimelineEvent], notification: &NotificationRow) -> bool {
    let Some(text) = notification.message.as_deref() else {
        return false;
    };
    events.iter().any(|event| {
        event.kind.is_admin_message()
            && event.description == text
            && (event.date - notification.created_at).num_milliseconds().abs()
                < DUPLICATE_WINDOW_MS
    })
}

fn notification_event(notification: &NotificationRow) -> TimelineEvent {
    TimelineEvent::new(
        format!("notif-msg-{}", notification.id),
        EventKind::AdminMessageInfo,
        notification.created_at,
        "Mensagem da agência",
        notification.message.clone().unwrap_or_default(),
    )
}

fn design_order_event(order: &DesignOrderSummaryRow) -> TimelineEvent {
    let package_name =
        order.package.as_ref().map_or_else(|| "Design".to_owned(), |p| p.name.clone());
    TimelineEvent::new(
        format!("design-order-{}", order.id),
        EventKind::DesignOrderCreated,
        order.created_at,
        "Pedido de design",
        package_name,
    )
    .with_link(format!("/cliente/design/{}", order.id))
}

fn design_delivery_event(delivery: &DesignDeliveryRow) -> TimelineEvent {
    let package_name = delivery
        .order
        .as_ref()
        .and_then(|o| o.package.as_ref())
        .map_or_else(|| "Design".to_owned(), |p| p.name.clone());
    TimelineEvent::new(
        format!("design-delivery-{}", delivery.id),
        EventKind::DesignOrderDelivered,
        delivery.created_at,
        format!("Entrega v{}", delivery.version_number),
        package_name,
    )
    .with_link(format!("/cliente/design/{}", delivery.order_id))
}
