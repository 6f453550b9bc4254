//! Timeline event types
//!
//! A `TimelineEvent` is one normalized, display-ready fact in a client's
//! history feed. Event subtypes form a closed enum with an exhaustive
//! presentation mapping; records the aggregator cannot classify surface as
//! `EventKind::Unknown` rather than disappearing on a lookup miss.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse grouping used by the category filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Geral,
    Emails,
    Arquivos,
    Tickets,
    Marca,
    Mensagens,
    Design,
}

impl EventCategory {
    /// All categories, in filter display order
    pub const ALL: [Self; 7] = [
        Self::Mensagens,
        Self::Tickets,
        Self::Arquivos,
        Self::Marca,
        Self::Design,
        Self::Emails,
        Self::Geral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Geral => "geral",
            Self::Emails => "emails",
            Self::Arquivos => "arquivos",
            Self::Tickets => "tickets",
            Self::Marca => "marca",
            Self::Mensagens => "mensagens",
            Self::Design => "design",
        }
    }
}

/// Canonical tone of an admin timeline message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageTone {
    Success,
    Warning,
    Info,
}

impl MessageTone {
    /// Canonicalize a free-text `message_type` value.
    ///
    /// Matching is case-insensitive against known synonym lists; anything
    /// unrecognized is informational.
    pub fn canonicalize(raw: Option<&str>) -> Self {
        let tone = raw.unwrap_or("info").trim().to_lowercase();
        match tone.as_str() {
            "success" | "sucesso" | "ok" | "positivo" => Self::Success,
            "warning" | "warn" | "aviso" | "atencao" | "atenção" => Self::Warning,
            _ => Self::Info,
        }
    }
}

/// Fine-grained timeline event subtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Subscription,
    ProjectCreated,
    SitePublished,
    EmailCreated,
    FileUploaded,
    FileReceived,
    TicketCreated,
    TicketResolved,
    BrandDelivered,
    BrandApproved,
    BrandRevision,
    AdminMessageInfo,
    AdminMessageWarning,
    AdminMessageSuccess,
    ClientMessage,
    DesignOrderCreated,
    DesignOrderDelivered,
    DesignOrderApproved,
    DesignOrderRevision,
    /// Fallback for records no normalization rule claimed
    Unknown,
}

impl EventKind {
    /// Admin message subtype for a canonicalized tone
    pub fn admin_message(tone: MessageTone) -> Self {
        match tone {
            MessageTone::Success => Self::AdminMessageSuccess,
            MessageTone::Warning => Self::AdminMessageWarning,
            MessageTone::Info => Self::AdminMessageInfo,
        }
    }

    /// Whether this is any admin-message subtype (used by the fallback
    /// dedup rule for notification rows)
    pub fn is_admin_message(&self) -> bool {
        matches!(
            self,
            Self::AdminMessageInfo | Self::AdminMessageWarning | Self::AdminMessageSuccess
        )
    }

    /// The coarse category this subtype belongs to
    pub fn category(&self) -> EventCategory {
        match self {
            Self::Subscription | Self::ProjectCreated | Self::SitePublished | Self::Unknown => {
                EventCategory::Geral
            }
            Self::EmailCreated => EventCategory::Emails,
            Self::FileUploaded | Self::FileReceived => EventCategory::Arquivos,
            Self::TicketCreated | Self::TicketResolved => EventCategory::Tickets,
            Self::BrandDelivered | Self::BrandApproved | Self::BrandRevision => EventCategory::Marca,
            Self::AdminMessageInfo
            | Self::AdminMessageWarning
            | Self::AdminMessageSuccess
            | Self::ClientMessage => EventCategory::Mensagens,
            Self::DesignOrderCreated
            | Self::DesignOrderDelivered
            | Self::DesignOrderApproved
            | Self::DesignOrderRevision => EventCategory::Design,
        }
    }

    /// Static icon identifier for the presentation layer
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Subscription => "credit-card",
            Self::ProjectCreated => "folder-plus",
            Self::SitePublished => "globe",
            Self::EmailCreated => "mail",
            Self::FileUploaded => "file-up",
            Self::FileReceived => "file-down",
            Self::TicketCreated => "message-square",
            Self::TicketResolved => "check-circle",
            Self::BrandDelivered | Self::BrandRevision => "palette",
            Self::BrandApproved => "thumbs-up",
            Self::AdminMessageInfo | Self::Unknown => "message-square",
            Self::AdminMessageWarning => "alert-triangle",
            Self::AdminMessageSuccess => "check-circle",
            Self::ClientMessage => "user",
            Self::DesignOrderCreated | Self::DesignOrderDelivered | Self::DesignOrderRevision => {
                "package"
            }
            Self::DesignOrderApproved => "check-circle",
        }
    }

    /// Static color class for the presentation layer
    pub fn color_class(&self) -> &'static str {
        match self {
            Self::Subscription | Self::TicketResolved | Self::BrandApproved
            | Self::DesignOrderApproved => "text-green-500 bg-green-500/10",
            Self::ProjectCreated | Self::DesignOrderCreated => "text-blue-500 bg-blue-500/10",
            Self::SitePublished => "text-emerald-500 bg-emerald-500/10",
            Self::EmailCreated => "text-indigo-500 bg-indigo-500/10",
            Self::FileUploaded => "text-orange-500 bg-orange-500/10",
            Self::FileReceived => "text-cyan-500 bg-cyan-500/10",
            Self::TicketCreated => "text-yellow-500 bg-yellow-500/10",
            Self::BrandDelivered | Self::DesignOrderDelivered => "text-purple-500 bg-purple-500/10",
            Self::BrandRevision | Self::DesignOrderRevision => "text-amber-500 bg-amber-500/10",
            Self::AdminMessageInfo | Self::Unknown => "text-primary bg-primary/10",
            Self::AdminMessageWarning => "text-amber-600 bg-amber-500/10",
            Self::AdminMessageSuccess | Self::ClientMessage => "text-emerald-600 bg-emerald-500/10",
        }
    }
}

/// One normalized, displayable fact in a client's history feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Subtype-prefixed source row id; unique within one assembled feed
    pub id: String,
    pub kind: EventKind,
    pub category: EventCategory,
    /// Timestamp used for sorting (descending)
    pub date: DateTime<Utc>,
    pub title: String,
    pub description: String,
    /// Optional navigation target
    pub link: Option<String>,
}

impl TimelineEvent {
    /// Build an event, deriving the category from the subtype
    pub fn new(
        id: impl Into<String>,
        kind: EventKind,
        date: DateTime<Utc>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            category: kind.category(),
            date,
            title: title.into(),
            description: description.into(),
            link: None,
        }
    }

    /// Attach a navigation target
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}
