use crate::controller::ThemeController;
use crate::probe::AppearanceProbe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(250);
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Polling fallback for hosts without push notification of appearance changes.
///
/// Each tick queries the probe and forwards the answer through
/// [`ThemeController::notify_os_preference`], which decides whether the
/// change is relevant. The interval is clamped to
/// [`MIN_POLL_INTERVAL`]..=[`MAX_POLL_INTERVAL`].
pub struct OsPreferenceWatcher {
    cancel_token: CancellationToken,
    handle: Option<JoinHandle<()>>,
    poll_interval: Duration,
}

impl OsPreferenceWatcher {
    /// Start watching on the current tokio runtime
    pub fn spawn(
        controller: ThemeController,
        probe: Arc<dyn AppearanceProbe>,
        poll_interval: Duration,
    ) -> Self {
        let poll_interval = poll_interval.clamp(MIN_POLL_INTERVAL, MAX_POLL_INTERVAL);
        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();

        let handle = tokio::spawn(async move {
            Self::run(controller, probe, poll_interval, token).await;
        });

        log::info!("OS appearance watcher started (every {poll_interval:?})");

        Self {
            cancel_token,
            handle: Some(handle),
            poll_interval,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop polling and wait for the task to finish. Safe to call repeatedly.
    pub async fn shutdown(&mut self) {
        self.cancel_token.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                log::error!("OS appearance watcher terminated abnormally: {e}");
            }
            log::info!("OS appearance watcher stopped");
        }
    }

    async fn run(
        controller: ThemeController,
        probe: Arc<dyn AppearanceProbe>,
        poll_interval: Duration,
        token: CancellationToken,
    ) {
        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await; // Skip the first immediate tick

        loop {
            tokio::select! {
                () = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let probe = Arc::clone(&probe);
            match tokio::task::spawn_blocking(move || probe.appearance()).await {
                Ok(os) => controller.notify_os_preference(os),
                Err(e) => log::warn!("OS appearance query failed: {e}"),
            }
        }
    }
}

impl Drop for OsPreferenceWatcher {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_bounds_are_ordered() {
        assert!(MIN_POLL_INTERVAL <= DEFAULT_POLL_INTERVAL);
        assert!(DEFAULT_POLL_INTERVAL <= MAX_POLL_INTERVAL);
    }
}
