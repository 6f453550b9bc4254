//! Domain type definitions

pub mod demand;
pub mod rows;
pub mod sla;
pub mod timeline;

pub use demand::{Demand, DemandBoard, DemandKind, DemandSource, SourceFailure, TicketPriority, Urgency};
pub use rows::{
    CredentialRow, DesignDeliveryRow, DesignFeedbackRow, DesignOrderRow, DesignOrderSummaryRow,
    FileRow, MigrationRow, NotificationRow, OnboardingRow, OrderRef, PackageRow, ProfileRow,
    ProjectRef, ProjectRow, TicketRow, TimelineMessageRow,
};
pub use sla::{
    DesignNewSla, DesignRevisionSla, MigrationSla, NotificationSla, SlaConfig, TicketSla,
};
pub use timeline::{EventCategory, EventKind, MessageTone, TimelineEvent};
