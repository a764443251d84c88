pub mod charts;
pub mod export;
pub mod history;
pub mod orchestrator;
pub mod scheduler;
pub mod telemetry;

pub use charts::{build_chart_projection, ChartProjection};
pub use export::{build_export_document, write_export, ExportDocument, ExportMetadata};
pub use history::{generate_historical_series, generate_historical_series_now, SERIES_LEN};
pub use orchestrator::{AnalysisOutcome, AnalysisPhase, Orchestrator};
pub use scheduler::RefreshScheduler;
pub use telemetry::{TelemetryService, TelemetrySnapshots};
