//! Port interfaces for demand board aggregation

use async_trait::async_trait;
use opsdeck_domain::{
    DesignOrderRow, MigrationRow, ProfileRow, Result, SlaConfig, TicketRow,
};

/// Source of design orders that need admin action
#[async_trait]
pub trait DesignOrderRepository: Send + Sync {
    /// Fetch orders in an actionable status (`revision_requested`, `paid`,
    /// `confirmed`, `in_production`), with their package relation joined.
    async fn fetch_actionable_orders(&self) -> Result<Vec<DesignOrderRow>>;
}

/// Source of open support tickets
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Fetch tickets in status `open` or `in_progress`, with their project
    /// relation joined.
    async fn fetch_open_tickets(&self) -> Result<Vec<TicketRow>>;
}

/// Source of pending site migration requests
#[async_trait]
pub trait MigrationRepository: Send + Sync {
    /// Fetch migrations in a non-terminal status (`pending`, `in_progress`,
    /// `analyzing`).
    async fn fetch_pending_migrations(&self) -> Result<Vec<MigrationRow>>;
}

/// Lookup of client profiles for display-name resolution
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch profiles for the given user ids
    async fn fetch_profiles(&self, user_ids: &[String]) -> Result<Vec<ProfileRow>>;
}

/// Provider of the process-wide SLA configuration snapshot
#[async_trait]
pub trait SlaConfigStore: Send + Sync {
    /// Load the current SLA configuration.
    ///
    /// Implementations merge the backend document over the built-in
    /// defaults; an absent or malformed document yields the defaults.
    async fn load(&self) -> Result<SlaConfig>;
}
