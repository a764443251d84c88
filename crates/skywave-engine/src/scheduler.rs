use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use skywave_core::RefreshConfig;

use crate::telemetry::TelemetryService;

/// Periodic telemetry refresh task. Owned by whoever constructed it and must
/// be disposed on teardown; disposal cancels the timer and any in-flight
/// oracle call.
pub struct RefreshScheduler {
    handle: Mutex<Option<JoinHandle<()>>>,
    token: CancellationToken,
}

impl RefreshScheduler {
    /// Spawn the refresh loop. The first refresh happens one interval after
    /// start; callers wanting an immediate refresh issue it themselves.
    pub fn start(telemetry: Arc<TelemetryService>, config: RefreshConfig) -> Self {
        let token = CancellationToken::new();
        let task_token = token.child_token();

        let handle = tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(Duration::from_secs(config.interval_secs.max(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker.tick().await; // the zeroth tick fires immediately

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                if !config.auto_refresh {
                    continue;
                }

                tokio::select! {
                    _ = task_token.cancelled() => break,
                    result = telemetry.refresh() => match result {
                        Ok(Some(_)) => debug!("periodic telemetry refresh completed"),
                        Ok(None) => debug!("periodic refresh skipped; another refresh in flight"),
                        Err(e) => warn!("periodic refresh failed: {}", e),
                    }
                }
            }

            info!("refresh scheduler stopped");
        });

        Self {
            handle: Mutex::new(Some(handle)),
            token,
        }
    }

    /// Cancel the periodic task. Idempotent.
    pub async fn dispose(&self) {
        self.token.cancel();
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("refresh task join failed: {}", e);
            }
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        // Last-resort cancellation when dispose() was never called.
        self.token.cancel();
    }
}
