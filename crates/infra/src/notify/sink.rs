//! Broadcast-channel notification sink and the wall clock

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use opsdeck_core::notify::ports::{Clock, NotificationSink, SoundCue, Toast};
use opsdeck_domain::Result;
use tokio::sync::broadcast;
use tracing::{debug, info};

const CHANNEL_CAPACITY: usize = 64;

/// One item published to notification subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Toast(Toast),
    Sound(SoundCue),
}

/// Publishes notifications onto a broadcast channel for a UI shell (or any
/// other consumer) to render.
///
/// Dispatch is fire-and-forget: with no subscriber attached the send fails,
/// which is tolerated by design of the sink contract.
pub struct ChannelSink {
    sender: broadcast::Sender<Notification>,
}

impl ChannelSink {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Attach a consumer
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for ChannelSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSink for ChannelSink {
    async fn show_toast(&self, toast: Toast) -> Result<()> {
        info!(title = %toast.title, "Dispatching toast notification");
        if self.sender.send(Notification::Toast(toast)).is_err() {
            debug!("No notification subscribers attached, toast dropped");
        }
        Ok(())
    }

    async fn play_sound(&self, cue: SoundCue) -> Result<()> {
        debug!(?cue, "Dispatching sound cue");
        if self.sender.send(Notification::Sound(cue)).is_err() {
            debug!("No notification subscribers attached, sound dropped");
        }
        Ok(())
    }
}

/// Wall-clock time source
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
