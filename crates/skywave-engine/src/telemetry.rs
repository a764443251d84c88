use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

use skywave_core::{
    HistoricalSample, IonosphereSnapshot, Notice, NotificationSink, Result, SolarSnapshot,
};
use skywave_oracle::PropagationOracle;
use skywave_store::{FallbackSource, LocalStore};

use crate::history;

/// The pair of telemetry snapshots a refresh produces. Either side may be a
/// fallback instance.
#[derive(Debug, Clone)]
pub struct TelemetrySnapshots {
    pub solar: SolarSnapshot,
    pub ionosphere: IonosphereSnapshot,
}

/// Fetches telemetry through the oracle with the store as the failure path,
/// and owns the synthetic trend series. Telemetry queries never fail the
/// caller: every oracle error degrades to cached or default data plus a
/// warning notice.
pub struct TelemetryService {
    oracle: Arc<dyn PropagationOracle>,
    store: Arc<LocalStore>,
    sink: Arc<dyn NotificationSink>,
    historical: Mutex<Vec<HistoricalSample>>,
    refresh_guard: tokio::sync::Mutex<()>,
}

impl TelemetryService {
    pub fn new(
        oracle: Arc<dyn PropagationOracle>,
        store: Arc<LocalStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            oracle,
            store,
            sink,
            historical: Mutex::new(Vec::new()),
            refresh_guard: tokio::sync::Mutex::new(()),
        }
    }

    /// Refresh both telemetry kinds concurrently and regenerate the trend
    /// series. Overlapping refreshes (manual vs. timer) are dropped rather
    /// than queued; returns None when another refresh already holds the
    /// guard.
    pub async fn refresh(&self) -> Result<Option<TelemetrySnapshots>> {
        let _guard = match self.refresh_guard.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                debug!("refresh already in flight; dropping overlapping request");
                return Ok(None);
            }
        };

        let (solar, ionosphere) = tokio::join!(self.fetch_solar(), self.fetch_ionosphere());
        let snapshots = TelemetrySnapshots {
            solar: solar?,
            ionosphere: ionosphere?,
        };

        self.regenerate_history();
        Ok(Some(snapshots))
    }

    /// Fetch solar telemetry; on any oracle failure fall back to the last
    /// known good snapshot or the built-in defaults.
    pub async fn fetch_solar(&self) -> Result<SolarSnapshot> {
        match self.oracle.solar_conditions().await {
            Ok(snapshot) => {
                self.store.snapshots.record_solar(snapshot.clone())?;
                Ok(snapshot)
            }
            Err(e) if e.is_oracle() => {
                warn!("solar query failed: {}", e);
                let (snapshot, source) = self.store.snapshots.fallback_solar();
                self.sink.notify(Notice::warning(match source {
                    FallbackSource::Cached => "Using cached solar data due to network issues",
                    FallbackSource::Default => "Using default solar data due to network issues",
                }));
                Ok(snapshot)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch ionospheric telemetry with the same fallback chain as solar.
    pub async fn fetch_ionosphere(&self) -> Result<IonosphereSnapshot> {
        match self.oracle.ionosphere_conditions().await {
            Ok(snapshot) => {
                self.store.snapshots.record_ionosphere(snapshot.clone())?;
                Ok(snapshot)
            }
            Err(e) if e.is_oracle() => {
                warn!("ionosphere query failed: {}", e);
                let (snapshot, source) = self.store.snapshots.fallback_ionosphere();
                self.sink.notify(Notice::warning(match source {
                    FallbackSource::Cached => "Using cached ionospheric data",
                    FallbackSource::Default => "Using default ionospheric data",
                }));
                Ok(snapshot)
            }
            Err(e) => Err(e),
        }
    }

    /// Rebuild the synthetic 24-hour trend series.
    pub fn regenerate_history(&self) {
        *self.historical.lock() = history::generate_historical_series_now();
    }

    pub fn historical(&self) -> Vec<HistoricalSample> {
        self.historical.lock().clone()
    }
}
