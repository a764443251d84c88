use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

use skywave_core::{IonosphereSnapshot, Result, SkywaveError, SolarSnapshot};

use crate::defaults;
use crate::persist::{
    push_bounded, Storage, KEY_IONOSPHERE_HISTORY, KEY_LAST_IONOSPHERE, KEY_LAST_SOLAR,
    KEY_SOLAR_HISTORY,
};

/// Cap on the telemetry history logs, oldest evicted first.
pub const SNAPSHOT_HISTORY_CAP: usize = 100;

/// Where a fallback snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackSource {
    /// The persisted last-known-good snapshot.
    Cached,
    /// The built-in default values; nothing was ever cached.
    Default,
}

/// Owns the current telemetry values, the "last known good" snapshot per
/// kind and the bounded history logs. Reads and writes are synchronous
/// against local durable state.
pub struct SnapshotStore {
    storage: Arc<Storage>,
    current_solar: Mutex<Option<SolarSnapshot>>,
    current_ionosphere: Mutex<Option<IonosphereSnapshot>>,
}

impl SnapshotStore {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self {
            storage,
            current_solar: Mutex::new(None),
            current_ionosphere: Mutex::new(None),
        }
    }

    /// Accept a validated solar snapshot. Authoritative (non-fallback)
    /// snapshots become the last known good value and join the history log;
    /// out-of-range ones are refused outright.
    pub fn record_solar(&self, snapshot: SolarSnapshot) -> Result<()> {
        if !snapshot.fallback {
            if let Err(errors) = snapshot.validate() {
                return Err(SkywaveError::Store(format!(
                    "rejected solar snapshot: {}",
                    errors.join("; ")
                )));
            }
            self.storage.save(KEY_LAST_SOLAR, &snapshot)?;
            let mut history: Vec<SolarSnapshot> = self
                .storage
                .load(KEY_SOLAR_HISTORY)?
                .unwrap_or_default();
            push_bounded(&mut history, snapshot.clone(), SNAPSHOT_HISTORY_CAP);
            self.storage.save(KEY_SOLAR_HISTORY, &history)?;
        }
        *self.current_solar.lock() = Some(snapshot);
        Ok(())
    }

    /// Accept a validated ionospheric snapshot, same rules as solar.
    pub fn record_ionosphere(&self, snapshot: IonosphereSnapshot) -> Result<()> {
        if !snapshot.fallback {
            self.storage.save(KEY_LAST_IONOSPHERE, &snapshot)?;
            let mut history: Vec<IonosphereSnapshot> = self
                .storage
                .load(KEY_IONOSPHERE_HISTORY)?
                .unwrap_or_default();
            push_bounded(&mut history, snapshot.clone(), SNAPSHOT_HISTORY_CAP);
            self.storage.save(KEY_IONOSPHERE_HISTORY, &history)?;
        }
        *self.current_ionosphere.lock() = Some(snapshot);
        Ok(())
    }

    /// Resolve the solar fallback chain: last known good if present, the
    /// built-in defaults otherwise. The returned snapshot always carries
    /// `fallback=true` and becomes the current value.
    pub fn fallback_solar(&self) -> (SolarSnapshot, FallbackSource) {
        let cached: Option<SolarSnapshot> = match self.storage.load(KEY_LAST_SOLAR) {
            Ok(value) => value,
            Err(e) => {
                warn!("failed to read cached solar snapshot: {}", e);
                None
            }
        };

        let (mut snapshot, source) = match cached {
            Some(snap) => (snap, FallbackSource::Cached),
            None => (defaults::default_solar(), FallbackSource::Default),
        };
        snapshot.fallback = true;

        debug!(?source, "serving solar fallback");
        *self.current_solar.lock() = Some(snapshot.clone());
        (snapshot, source)
    }

    /// Resolve the ionospheric fallback chain, same rules as solar.
    pub fn fallback_ionosphere(&self) -> (IonosphereSnapshot, FallbackSource) {
        let cached: Option<IonosphereSnapshot> = match self.storage.load(KEY_LAST_IONOSPHERE) {
            Ok(value) => value,
            Err(e) => {
                warn!("failed to read cached ionospheric snapshot: {}", e);
                None
            }
        };

        let (mut snapshot, source) = match cached {
            Some(snap) => (snap, FallbackSource::Cached),
            None => (defaults::default_ionosphere(), FallbackSource::Default),
        };
        snapshot.fallback = true;

        debug!(?source, "serving ionosphere fallback");
        *self.current_ionosphere.lock() = Some(snapshot.clone());
        (snapshot, source)
    }

    pub fn current_solar(&self) -> Option<SolarSnapshot> {
        self.current_solar.lock().clone()
    }

    pub fn current_ionosphere(&self) -> Option<IonosphereSnapshot> {
        self.current_ionosphere.lock().clone()
    }

    pub fn solar_history(&self) -> Result<Vec<SolarSnapshot>> {
        Ok(self.storage.load(KEY_SOLAR_HISTORY)?.unwrap_or_default())
    }

    pub fn ionosphere_history(&self) -> Result<Vec<IonosphereSnapshot>> {
        Ok(self
            .storage
            .load(KEY_IONOSPHERE_HISTORY)?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, SnapshotStore) {
        let dir = TempDir::new().unwrap();
        let storage = Arc::new(Storage::open(dir.path()).unwrap());
        (dir, SnapshotStore::new(storage))
    }

    fn solar(sfi: f64) -> SolarSnapshot {
        SolarSnapshot {
            sfi,
            ..defaults::default_solar()
        }
    }

    #[test]
    fn authoritative_snapshot_becomes_last_known_good() {
        let (_dir, store) = store();
        let mut snap = solar(150.0);
        snap.fallback = false;
        store.record_solar(snap.clone()).unwrap();

        let (restored, source) = store.fallback_solar();
        assert_eq!(source, FallbackSource::Cached);
        assert_eq!(restored.sfi, 150.0);
        assert!(restored.fallback);
    }

    #[test]
    fn fallback_snapshot_is_not_persisted_as_authoritative() {
        let (_dir, store) = store();
        store.record_solar(solar(199.0)).unwrap(); // fallback=true fixture

        assert_eq!(store.current_solar().unwrap().sfi, 199.0);
        let (restored, source) = store.fallback_solar();
        assert_eq!(source, FallbackSource::Default);
        assert_eq!(restored.sfi, 145.0);
        assert!(store.solar_history().unwrap().is_empty());
    }

    #[test]
    fn empty_store_serves_builtin_defaults() {
        let (_dir, store) = store();
        let (snap, source) = store.fallback_solar();
        assert_eq!(source, FallbackSource::Default);
        assert_eq!(snap.sfi, 145.0);
        assert_eq!(snap.kp, 2.1);
        assert!(snap.fallback);

        let (iono, source) = store.fallback_ionosphere();
        assert_eq!(source, FallbackSource::Default);
        assert_eq!(iono.tec, 28.5);
        assert!(iono.fallback);
    }

    #[test]
    fn out_of_range_authoritative_snapshot_is_refused() {
        let (_dir, store) = store();
        let mut snap = solar(9000.0);
        snap.fallback = false;
        assert!(store.record_solar(snap).is_err());

        // Nothing was persisted: the fallback chain still serves defaults.
        assert!(store.solar_history().unwrap().is_empty());
        let (_, source) = store.fallback_solar();
        assert_eq!(source, FallbackSource::Default);
    }

    #[test]
    fn history_is_capped_at_one_hundred_most_recent() {
        let (_dir, store) = store();
        for i in 0..105 {
            let mut snap = solar(60.0 + i as f64);
            snap.fallback = false;
            store.record_solar(snap).unwrap();
        }

        let history = store.solar_history().unwrap();
        assert_eq!(history.len(), 100);
        // Entries 0..5 were evicted; the oldest retained is the sixth insert.
        assert_eq!(history[0].sfi, 65.0);
        assert_eq!(history.last().unwrap().sfi, 164.0);
    }

    #[test]
    fn last_known_good_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let storage = Arc::new(Storage::open(dir.path()).unwrap());
            let store = SnapshotStore::new(storage);
            let mut snap = solar(171.0);
            snap.fallback = false;
            store.record_solar(snap).unwrap();
        }

        let storage = Arc::new(Storage::open(dir.path()).unwrap());
        let store = SnapshotStore::new(storage);
        let (restored, source) = store.fallback_solar();
        assert_eq!(source, FallbackSource::Cached);
        assert_eq!(restored.sfi, 171.0);
    }
}
