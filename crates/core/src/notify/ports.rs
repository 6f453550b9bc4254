//! Ports for notification dispatch and time

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use opsdeck_domain::{Demand, Result};
use serde::{Deserialize, Serialize};

/// Navigation action attached to a toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastAction {
    pub label: String,
    /// In-app route or external URL to open
    pub target: String,
}

/// A transient on-screen notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub duration_ms: u64,
    pub action: Option<ToastAction>,
}

/// Which sound to play for a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Ticket,
    File,
    Brand,
    Design,
    Message,
    Project,
    Payment,
    Default,
}

/// Fire-and-forget notification output.
///
/// Implementations may fail (no subscriber, platform error); callers log
/// and move on, dispatch is best-effort by contract.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn show_toast(&self, toast: Toast) -> Result<()>;
    async fn play_sound(&self, cue: SoundCue) -> Result<()>;
}

/// Current demand list, as the board would show it.
///
/// `now` is the caller's observation instant, so one monitoring pass uses a
/// single time source for both deadlines and classification.
#[async_trait]
pub trait DemandFeed: Send + Sync {
    async fn current(&self, now: DateTime<Utc>) -> Result<Vec<Demand>>;
}

/// Time source, injectable so tests can drive the cooldown clock
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
