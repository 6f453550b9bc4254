//! # OpsDeck Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Demand board aggregation (SLA deadline computation, ranking, counts)
//! - Client timeline aggregation (fan-out fetch, normalize, dedupe, cap)
//! - SLA notification monitor (threshold detection, cooldown, dispatch)
//! - Port/adapter interfaces (traits) for every external capability
//!
//! ## Architecture Principles
//! - Only depends on `opsdeck-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod demands;
pub mod notify;
pub mod timeline;

// Re-export specific items to avoid ambiguity
pub use demands::ports::{
    DesignOrderRepository, MigrationRepository, ProfileRepository, SlaConfigStore,
    TicketRepository,
};
pub use demands::DemandService;
pub use notify::ports::{Clock, DemandFeed, NotificationSink, SoundCue, Toast, ToastAction};
pub use notify::SlaMonitor;
pub use timeline::ports::TimelineRepository;
pub use timeline::{TimelineService, TimelineView};
