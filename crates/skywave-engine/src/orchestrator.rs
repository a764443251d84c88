use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use skywave_core::{
    validate_location, AnalysisId, AnalysisRecord, AnalysisResult, Band, ForecastResult, Notice,
    NotificationSink, Result,
};
use skywave_oracle::PropagationOracle;
use skywave_store::LocalStore;

/// Observable lifecycle of one analysis. Always returns to Idle, success or
/// not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    Idle,
    Validating,
    AnalyzingPrimary,
    AnalyzingForecast,
}

/// A completed analysis together with its best-effort forecast.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub id: AnalysisId,
    pub band: Band,
    pub from_location: String,
    pub to_location: String,
    pub analysis: AnalysisResult,
    /// Absent when the forecast query failed; that failure is logged only.
    pub forecast: Option<ForecastResult>,
}

/// Sequences location validation, the primary propagation analysis and the
/// dependent extended forecast. The primary analysis fails hard; the
/// forecast is a best-effort enhancement. At most one analysis is in flight
/// at a time.
pub struct Orchestrator {
    oracle: Arc<dyn PropagationOracle>,
    store: Arc<LocalStore>,
    sink: Arc<dyn NotificationSink>,
    phase: Mutex<AnalysisPhase>,
    latest: Mutex<Option<AnalysisOutcome>>,
    run_guard: tokio::sync::Mutex<()>,
}

impl Orchestrator {
    pub fn new(
        oracle: Arc<dyn PropagationOracle>,
        store: Arc<LocalStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            oracle,
            store,
            sink,
            phase: Mutex::new(AnalysisPhase::Idle),
            latest: Mutex::new(None),
            run_guard: tokio::sync::Mutex::new(()),
        }
    }

    pub fn phase(&self) -> AnalysisPhase {
        *self.phase.lock()
    }

    /// The UI loading flag: true while an analysis is in flight.
    pub fn is_loading(&self) -> bool {
        self.phase() != AnalysisPhase::Idle
    }

    /// The most recently completed analysis, if any.
    pub fn latest(&self) -> Option<AnalysisOutcome> {
        self.latest.lock().clone()
    }

    /// Run one full analysis. Validation failures abort before any network
    /// call; a primary analysis failure surfaces with no partial state; a
    /// forecast failure leaves the forecast absent.
    pub async fn run(&self, from: &str, to: &str, band: Band) -> Result<AnalysisOutcome> {
        let _guard = self.run_guard.lock().await;
        let result = self.run_inner(from, to, band).await;
        *self.phase.lock() = AnalysisPhase::Idle;

        match &result {
            Ok(outcome) => {
                *self.latest.lock() = Some(outcome.clone());
                self.sink
                    .notify(Notice::success("Analysis completed successfully!"));
            }
            Err(e) => {
                self.sink.notify(Notice::error(format!("Analysis failed: {}", e)));
            }
        }

        result
    }

    async fn run_inner(&self, from: &str, to: &str, band: Band) -> Result<AnalysisOutcome> {
        *self.phase.lock() = AnalysisPhase::Validating;
        let from = validate_location(from)?;
        let to = validate_location(to)?;

        // Telemetry context for the query; the fallback chain guarantees a
        // snapshot even on a cold start.
        let solar = match self.store.snapshots.current_solar() {
            Some(snapshot) => snapshot,
            None => self.store.snapshots.fallback_solar().0,
        };
        let ionosphere = match self.store.snapshots.current_ionosphere() {
            Some(snapshot) => snapshot,
            None => self.store.snapshots.fallback_ionosphere().0,
        };

        *self.phase.lock() = AnalysisPhase::AnalyzingPrimary;
        let analysis = self
            .oracle
            .analyze_path(band, &from, &to, &solar, &ionosphere)
            .await?;

        let record = AnalysisRecord {
            id: Uuid::new_v4(),
            band,
            from_location: from.as_str().to_string(),
            to_location: to.as_str().to_string(),
            timestamp: Utc::now(),
            result: analysis.clone(),
        };
        let id = record.id;
        self.store.analyses.append(record)?;
        info!(%id, %band, "analysis recorded");

        *self.phase.lock() = AnalysisPhase::AnalyzingForecast;
        let forecast = match self.oracle.extended_forecast(band, &solar, &ionosphere).await {
            Ok(forecast) => Some(forecast),
            Err(e) => {
                // Best-effort: the forecast enhances the analysis but never
                // fails it.
                warn!("extended forecast failed: {}", e);
                None
            }
        };

        Ok(AnalysisOutcome {
            id,
            band,
            from_location: from.as_str().to_string(),
            to_location: to.as_str().to_string(),
            analysis,
            forecast,
        })
    }
}
