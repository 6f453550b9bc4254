//! Hosted backend adapter
//!
//! A PostgREST-style REST client plus repository implementations of every
//! core port. All queries are read-only table selects with embedded
//! relations; writes stay with the product's CRUD surfaces.

pub mod client;
pub mod repositories;
pub mod timeline;

pub use client::{BackendClient, Query, RetryPolicy};
pub use repositories::{
    BackendDesignOrderRepository, BackendMigrationRepository, BackendProfileRepository,
    BackendTicketRepository, SystemSettingsSlaStore,
};
pub use timeline::BackendTimelineRepository;
