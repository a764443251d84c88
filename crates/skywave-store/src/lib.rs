pub mod analysis;
pub mod defaults;
pub mod feedback;
pub mod persist;
pub mod snapshot;

pub use analysis::{AnalysisHistory, ANALYSIS_HISTORY_CAP};
pub use feedback::{FeedbackLog, PresetStore, PRESET_CAP};
pub use persist::Storage;
pub use snapshot::{FallbackSource, SnapshotStore, SNAPSHOT_HISTORY_CAP};

use std::sync::Arc;

use skywave_core::{Result, StoreConfig};

/// All durable local state behind one handle: telemetry snapshots and
/// histories, completed analyses, feedback, presets.
pub struct LocalStore {
    pub snapshots: SnapshotStore,
    pub analyses: AnalysisHistory,
    pub feedback: FeedbackLog,
    pub presets: PresetStore,
}

impl LocalStore {
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let storage = Arc::new(Storage::open(&config.data_dir)?);
        Ok(Self {
            snapshots: SnapshotStore::new(Arc::clone(&storage)),
            analyses: AnalysisHistory::new(Arc::clone(&storage)),
            feedback: FeedbackLog::new(Arc::clone(&storage)),
            presets: PresetStore::new(storage),
        })
    }
}
