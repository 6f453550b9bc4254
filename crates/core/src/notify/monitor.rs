//! SLA breach monitor

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use opsdeck_domain::constants::{NOTIFIED_CLEAR_SECS, TOAST_DURATION_MS};
use opsdeck_domain::{Demand, DemandKind, Result, Urgency};
use tracing::{debug, instrument, warn};

use super::ports::{Clock, DemandFeed, NotificationSink, SoundCue, Toast, ToastAction};
use crate::demands::ports::SlaConfigStore;

/// Keys of demands already alerted in the current cooldown window.
///
/// Cleared wholesale once the window elapses, so a still-breaching demand
/// re-alerts at most once per window.
struct NotifiedSet {
    keys: HashSet<String>,
    last_clear: DateTime<Utc>,
    clear_window: Duration,
}

impl NotifiedSet {
    fn new(now: DateTime<Utc>, clear_window: Duration) -> Self {
        Self { keys: HashSet::new(), last_clear: now, clear_window }
    }

    fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    fn mark(&mut self, key: String) {
        self.keys.insert(key);
    }

    fn maybe_clear(&mut self, now: DateTime<Utc>) {
        if now - self.last_clear >= self.clear_window {
            debug!(cleared = self.keys.len(), "Clearing notified demand keys");
            self.keys.clear();
            self.last_clear = now;
        }
    }
}

/// Polls the demand feed and alerts on demands that are overdue or inside
/// their warning window. Driven externally by a scheduler calling `tick`.
pub struct SlaMonitor {
    feed: Arc<dyn DemandFeed>,
    sink: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    sla_config: Arc<dyn SlaConfigStore>,
    notified: NotifiedSet,
}

impl SlaMonitor {
    pub fn new(
        feed: Arc<dyn DemandFeed>,
        sink: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
        sla_config: Arc<dyn SlaConfigStore>,
    ) -> Self {
        let now = clock.now();
        let window = Duration::seconds(NOTIFIED_CLEAR_SECS as i64);
        Self { feed, sink, clock, sla_config, notified: NotifiedSet::new(now, window) }
    }

    /// Override the cooldown clear window (defaults to five minutes).
    #[must_use]
    pub fn with_clear_secs(mut self, secs: u64) -> Self {
        self.notified.clear_window = Duration::seconds(secs as i64);
        self
    }

    /// One monitoring pass: classify every demand, alert on new breaches,
    /// then expire the cooldown window if due.
    ///
    /// Dispatch failures are logged and swallowed; the cooldown bookkeeping
    /// is unaffected, so a flaky sink does not cause alert storms.
    #[instrument(skip(self))]
    pub async fn tick(&mut self) -> Result<()> {
        let config = self.sla_config.load().await.unwrap_or_default();
        if !config.notifications.enabled {
            return Ok(());
        }

        let now = self.clock.now();
        let demands = self.feed.current(now).await?;

        for demand in &demands {
            let key = demand.notification_key();
            if self.notified.contains(&key) {
                continue;
            }

            let urgency = demand.urgency(now, config.notifications.warning_percent);
            if urgency == Urgency::Normal {
                continue;
            }

            self.notified.mark(key);
            debug!(demand_id = %demand.id, ?urgency, "Demand breached its SLA window");

            if config.notifications.toast_enabled {
                let toast = breach_toast(demand, urgency, now);
                if let Err(err) = self.sink.show_toast(toast).await {
                    warn!(demand_id = %demand.id, error = %err, "Toast dispatch failed");
                }
            }
            if config.notifications.sound_enabled {
                if let Err(err) = self.sink.play_sound(SoundCue::Default).await {
                    warn!(demand_id = %demand.id, error = %err, "Sound dispatch failed");
                }
            }
        }

        self.notified.maybe_clear(now);
        Ok(())
    }
}

fn breach_toast(demand: &Demand, urgency: Urgency, now: DateTime<Utc>) -> Toast {
    let overdue = urgency == Urgency::Overdue;
    let title = if overdue {
        format!("⚠️ Prazo vencido: {}", demand.title)
    } else {
        format!("⏰ Prazo urgente: {}", demand.title)
    };
    let description = if overdue {
        format!("{} - Demanda atrasada!", demand.client_name)
    } else {
        format!(
            "{} - Menos de {}% do tempo restante",
            demand.client_name,
            demand.percent_remaining(now).round()
        )
    };

    let target = match (&demand.kind, &demand.project_id) {
        (DemandKind::Ticket, Some(project_id)) => {
            format!("/admin/projects/{project_id}?tab=tickets&ticket={}", demand.id)
        }
        _ => format!("/admin/design/{}", demand.id),
    };

    Toast {
        title,
        description,
        duration_ms: TOAST_DURATION_MS,
        action: Some(ToastAction { label: "Ver".into(), target }),
    }
}
