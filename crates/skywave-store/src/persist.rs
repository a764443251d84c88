use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use skywave_core::Result;

/// Durable local state keys. One JSON document per key.
pub const KEY_LAST_SOLAR: &str = "lastSolarData";
pub const KEY_LAST_IONOSPHERE: &str = "lastIonosphereData";
pub const KEY_SOLAR_HISTORY: &str = "solarDataHistory";
pub const KEY_IONOSPHERE_HISTORY: &str = "ionosphereHistory";
pub const KEY_ANALYSIS_HISTORY: &str = "analysisHistory";
pub const KEY_USER_FEEDBACK: &str = "userFeedback";
pub const KEY_SAVED_PRESETS: &str = "savedPresets";

/// Synchronous key/document storage backed by a local directory. Each write
/// is an atomic replace: the document is written to a temp file and renamed
/// over the previous one.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Load the document stored under `key`, or None if it was never written.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        let value = serde_json::from_str(&raw)?;
        Ok(Some(value))
    }

    /// Replace the document stored under `key`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        let raw = serde_json::to_string(value)?;
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &path)?;
        debug!(key, "persisted store document");
        Ok(())
    }
}

/// Append `item` to `entries`, evicting from the front once `cap` is
/// exceeded. The retained entries are always the most recent.
pub fn push_bounded<T>(entries: &mut Vec<T>, item: T, cap: usize) {
    entries.push(item);
    if entries.len() > cap {
        let excess = entries.len() - cap;
        entries.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();

        storage.save("numbers", &vec![1u32, 2, 3]).unwrap();
        let loaded: Option<Vec<u32>> = storage.load("numbers").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn missing_key_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let loaded: Option<Vec<u32>> = storage.load("nothing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn push_bounded_evicts_oldest_first() {
        let mut entries: Vec<u32> = Vec::new();
        for i in 0..105 {
            push_bounded(&mut entries, i, 100);
        }
        assert_eq!(entries.len(), 100);
        assert_eq!(entries[0], 5);
        assert_eq!(*entries.last().unwrap(), 104);
    }
}
