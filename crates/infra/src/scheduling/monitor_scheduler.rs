//! Interval scheduler for the SLA monitor
//!
//! Runs the monitor immediately on start, then every `interval`. Each pass
//! is wrapped in a timeout so one stuck backend call cannot stall the loop.

use std::sync::Arc;
use std::time::Duration;

use opsdeck_core::SlaMonitor;
use opsdeck_domain::constants::MONITOR_TICK_SECS;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use super::error::{SchedulerError, SchedulerResult};
use crate::config::MonitorConfig;

/// Type alias for task handle to avoid complexity warnings
type TaskHandle = Arc<Mutex<Option<JoinHandle<()>>>>;

/// Configuration for the monitor scheduler
#[derive(Debug, Clone)]
pub struct MonitorSchedulerConfig {
    /// Time between monitor passes
    pub interval: Duration,
    /// Timeout for one monitor pass
    pub tick_timeout: Duration,
}

impl Default for MonitorSchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(MONITOR_TICK_SECS),
            tick_timeout: Duration::from_secs(25),
        }
    }
}

impl From<&MonitorConfig> for MonitorSchedulerConfig {
    fn from(config: &MonitorConfig) -> Self {
        Self { interval: Duration::from_secs(config.tick_secs), ..Self::default() }
    }
}

/// Drives [`SlaMonitor`] on a fixed interval with an explicit lifecycle
pub struct MonitorScheduler {
    monitor: Arc<Mutex<SlaMonitor>>,
    config: MonitorSchedulerConfig,
    cancellation_token: CancellationToken,
    task_handle: TaskHandle,
}

impl MonitorScheduler {
    /// Create a new scheduler owning the monitor
    pub fn new(monitor: SlaMonitor, config: MonitorSchedulerConfig) -> Self {
        Self {
            monitor: Arc::new(Mutex::new(monitor)),
            config,
            cancellation_token: CancellationToken::new(),
            task_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Start the scheduler
    ///
    /// Spawns a background task that runs the first pass immediately and
    /// then re-runs on every interval.
    ///
    /// # Errors
    /// Returns an error if the scheduler is already running.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        info!("Starting SLA monitor scheduler");

        // Fresh token so the scheduler can be restarted after a stop.
        self.cancellation_token = CancellationToken::new();

        let monitor = Arc::clone(&self.monitor);
        let config = self.config.clone();
        let cancel = self.cancellation_token.clone();

        let handle = tokio::spawn(async move {
            Self::monitor_loop(monitor, config, cancel).await;
        });

        *self.task_handle.lock().await = Some(handle);

        info!("SLA monitor scheduler started");
        Ok(())
    }

    /// Stop the scheduler gracefully
    ///
    /// Cancels the background task and awaits completion.
    ///
    /// # Errors
    /// Returns an error if the scheduler is not running.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        info!("Stopping SLA monitor scheduler");

        self.cancellation_token.cancel();

        if let Some(handle) = self.task_handle.lock().await.take() {
            let join_timeout = Duration::from_secs(5);
            tokio::time::timeout(join_timeout, handle)
                .await
                .map_err(|source| SchedulerError::Timeout { duration: join_timeout, source })??;
        }

        info!("SLA monitor scheduler stopped");
        Ok(())
    }

    /// Check if the scheduler is running
    ///
    /// A scheduler is considered running if it has an active task handle
    /// that hasn't finished.
    pub fn is_running(&self) -> bool {
        self.task_handle
            .try_lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    async fn monitor_loop(
        monitor: Arc<Mutex<SlaMonitor>>,
        config: MonitorSchedulerConfig,
        cancel: CancellationToken,
    ) {
        loop {
            Self::run_tick(&monitor, &config).await;

            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Monitor loop cancelled");
                    break;
                }
                _ = tokio::time::sleep(config.interval) => {}
            }
        }
    }

    async fn run_tick(monitor: &Arc<Mutex<SlaMonitor>>, config: &MonitorSchedulerConfig) {
        let pass = async {
            let mut monitor = monitor.lock().await;
            monitor.tick().await
        };

        match tokio::time::timeout(config.tick_timeout, pass).await {
            Ok(Ok(())) => debug!("Monitor pass completed"),
            Ok(Err(e)) => error!(error = %e, "Monitor pass failed"),
            Err(_) => {
                warn!(timeout = ?config.tick_timeout, "Monitor pass timed out");
            }
        }
    }
}

impl Drop for MonitorScheduler {
    fn drop(&mut self) {
        // Dropping the scheduler must not leave the loop running.
        self.cancellation_token.cancel();
    }
}
