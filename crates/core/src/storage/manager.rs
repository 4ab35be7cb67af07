use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::dashboard::DashboardState;

use super::backend::KeyValueStore;
use super::snapshot;

/// High-level storage operations: save/load the dashboard snapshot to/from a key-value store.
pub struct StorageManager;

impl StorageManager {
    /// Serialize the state and write it under `key`, replacing the previous snapshot.
    ///
    /// Flow: DashboardState → JSON → store.set(key)
    pub fn save<S: KeyValueStore + ?Sized>(
        store: &mut S,
        key: &str,
        state: &DashboardState,
    ) -> Result<(), CoreError> {
        let json = snapshot::encode(state)?;
        store.set(key, &json)?;
        debug!("Saved dashboard to {} under '{key}' ({} bytes)", store.name(), json.len());
        Ok(())
    }

    /// Read and decode the snapshot under `key`.
    /// Returns `Ok(None)` if nothing was ever saved there.
    ///
    /// Flow: store.get(key) → JSON → merge over defaults → DashboardState
    pub fn load<S: KeyValueStore + ?Sized>(
        store: &S,
        key: &str,
    ) -> Result<Option<DashboardState>, CoreError> {
        match store.get(key)? {
            Some(json) => snapshot::decode(&json).map(Some),
            None => Ok(None),
        }
    }

    /// Load the snapshot, falling back to the default state on any failure.
    /// Failures are logged, never returned.
    pub fn load_or_default<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> DashboardState {
        match Self::load(store, key) {
            Ok(Some(state)) => state,
            Ok(None) => {
                debug!("No saved dashboard under '{key}' in {}; starting fresh", store.name());
                DashboardState::default()
            }
            Err(e) => {
                warn!("Failed to load dashboard from {}: {e}", store.name());
                DashboardState::default()
            }
        }
    }

    /// Save without propagating failures. Returns `true` if the write succeeded.
    pub fn save_best_effort<S: KeyValueStore + ?Sized>(
        store: &mut S,
        key: &str,
        state: &DashboardState,
    ) -> bool {
        match Self::save(store, key, state) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save dashboard to {}: {e}", store.name());
                false
            }
        }
    }

    /// Delete the snapshot under `key`.
    pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S, key: &str) -> Result<(), CoreError> {
        store.remove(key)
    }
}
