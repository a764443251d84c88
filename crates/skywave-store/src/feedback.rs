use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use skywave_core::{
    AnalysisId, AnalysisResult, Band, ConditionsSnapshot, FeedbackRecord, Preset, Result,
    SkywaveError,
};

use crate::persist::{push_bounded, Storage, KEY_SAVED_PRESETS, KEY_USER_FEEDBACK};

/// Cap on saved presets, oldest evicted first.
pub const PRESET_CAP: usize = 10;

/// Append-only log of user verdicts on past analyses. The stored log is
/// unbounded; only exported slices are capped.
pub struct FeedbackLog {
    storage: Arc<Storage>,
}

impl FeedbackLog {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn record_feedback(
        &self,
        analysis_id: AnalysisId,
        is_correct: bool,
        analysis_snapshot: AnalysisResult,
        conditions_snapshot: ConditionsSnapshot,
    ) -> Result<FeedbackRecord> {
        let record = FeedbackRecord {
            analysis_id,
            is_correct,
            timestamp: Utc::now(),
            analysis_snapshot,
            conditions_snapshot,
        };

        let mut log: Vec<FeedbackRecord> = self
            .storage
            .load(KEY_USER_FEEDBACK)?
            .unwrap_or_default();
        log.push(record.clone());
        self.storage.save(KEY_USER_FEEDBACK, &log)?;
        Ok(record)
    }

    pub fn all(&self) -> Result<Vec<FeedbackRecord>> {
        Ok(self.storage.load(KEY_USER_FEEDBACK)?.unwrap_or_default())
    }

    /// The most recent `n` records, oldest of the slice first.
    pub fn recent(&self, n: usize) -> Result<Vec<FeedbackRecord>> {
        let log = self.all()?;
        let start = log.len().saturating_sub(n);
        Ok(log[start..].to_vec())
    }
}

/// Bounded list of saved path presets.
pub struct PresetStore {
    storage: Arc<Storage>,
}

impl PresetStore {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn save_preset(
        &self,
        name: impl Into<String>,
        from_location: impl Into<String>,
        to_location: impl Into<String>,
        band: Band,
    ) -> Result<Preset> {
        let from_location = from_location.into();
        let to_location = to_location.into();
        if from_location.trim().is_empty() || to_location.trim().is_empty() {
            return Err(SkywaveError::Validation(
                "Preset requires both locations".to_string(),
            ));
        }

        let preset = Preset {
            id: Uuid::new_v4(),
            name: name.into(),
            from_location,
            to_location,
            band,
            timestamp: Utc::now(),
        };

        let mut presets = self.load_presets()?;
        push_bounded(&mut presets, preset.clone(), PRESET_CAP);
        self.storage.save(KEY_SAVED_PRESETS, &presets)?;
        Ok(preset)
    }

    /// The persisted bounded list, as read at startup.
    pub fn load_presets(&self) -> Result<Vec<Preset>> {
        Ok(self.storage.load(KEY_SAVED_PRESETS)?.unwrap_or_default())
    }
}
