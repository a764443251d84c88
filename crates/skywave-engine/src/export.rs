use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use skywave_core::{
    AnalysisResult, Band, FeedbackRecord, ForecastResult, HistoricalSample, IonosphereSnapshot,
    Result, SkywaveError, SolarSnapshot,
};

pub const EXPORT_VERSION: &str = "1.0";

/// How many trend samples and feedback records an export retains.
pub const EXPORT_HISTORICAL_CAP: usize = 24;
pub const EXPORT_FEEDBACK_CAP: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub band: Band,
    pub from_location: String,
    pub to_location: String,
    pub auto_refresh: bool,
}

/// The downloadable analysis document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: String,
    pub export_date: String,
    pub metadata: ExportMetadata,
    pub analysis: Option<AnalysisResult>,
    pub solar: Option<SolarSnapshot>,
    pub ionosphere: Option<IonosphereSnapshot>,
    pub forecast: Option<ForecastResult>,
    pub historical: Vec<HistoricalSample>,
    pub feedback_history: Vec<FeedbackRecord>,
}

/// Assemble the export document. Fails when there is nothing to export at
/// all; no state is mutated either way.
#[allow(clippy::too_many_arguments)]
pub fn build_export_document(
    metadata: ExportMetadata,
    analysis: Option<AnalysisResult>,
    solar: Option<SolarSnapshot>,
    ionosphere: Option<IonosphereSnapshot>,
    forecast: Option<ForecastResult>,
    historical: &[HistoricalSample],
    feedback: &[FeedbackRecord],
) -> Result<ExportDocument> {
    if analysis.is_none() && solar.is_none() && ionosphere.is_none() {
        return Err(SkywaveError::Export(
            "No data available to export. Run an analysis first.".to_string(),
        ));
    }

    let historical_start = historical.len().saturating_sub(EXPORT_HISTORICAL_CAP);
    let feedback_start = feedback.len().saturating_sub(EXPORT_FEEDBACK_CAP);

    Ok(ExportDocument {
        version: EXPORT_VERSION.to_string(),
        export_date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        metadata,
        analysis,
        solar,
        ionosphere,
        forecast,
        historical: historical[historical_start..].to_vec(),
        feedback_history: feedback[feedback_start..].to_vec(),
    })
}

/// File name for an export created on `iso_date`, e.g.
/// `hf_analysis_160m_2026-02-03.json`.
pub fn export_file_name(band: Band, export_date: &str) -> String {
    let date = export_date.split('T').next().unwrap_or(export_date);
    format!("hf_analysis_{}_{}.json", band, date)
}

/// Serialize the document into `dir`. Serialization or file-creation
/// failures surface as export errors; nothing else is touched.
pub fn write_export(document: &ExportDocument, dir: &Path) -> Result<PathBuf> {
    let raw = serde_json::to_string_pretty(document)
        .map_err(|e| SkywaveError::Export(format!("failed to serialize export: {}", e)))?;

    let path = dir.join(export_file_name(document.metadata.band, &document.export_date));
    fs::write(&path, raw)
        .map_err(|e| SkywaveError::Export(format!("failed to write {}: {}", path.display(), e)))?;

    info!(path = %path.display(), "analysis exported");
    Ok(path)
}
