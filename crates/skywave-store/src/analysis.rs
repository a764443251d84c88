use std::sync::Arc;

use skywave_core::{AnalysisRecord, Result};

use crate::persist::{push_bounded, Storage, KEY_ANALYSIS_HISTORY};

/// Cap on retained completed analyses, oldest evicted first.
pub const ANALYSIS_HISTORY_CAP: usize = 50;

/// Bounded log of completed analyses, keyed by analysis id.
pub struct AnalysisHistory {
    storage: Arc<Storage>,
}

impl AnalysisHistory {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn append(&self, record: AnalysisRecord) -> Result<()> {
        let mut history: Vec<AnalysisRecord> = self
            .storage
            .load(KEY_ANALYSIS_HISTORY)?
            .unwrap_or_default();
        push_bounded(&mut history, record, ANALYSIS_HISTORY_CAP);
        self.storage.save(KEY_ANALYSIS_HISTORY, &history)
    }

    pub fn all(&self) -> Result<Vec<AnalysisRecord>> {
        Ok(self.storage.load(KEY_ANALYSIS_HISTORY)?.unwrap_or_default())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.all()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
