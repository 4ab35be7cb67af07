use crate::errors::CoreError;

use super::backend::KeyValueStore;

/// Browser `localStorage` store (wasm32 only).
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, CoreError> {
        let window = web_sys::window()
            .ok_or_else(|| CoreError::StorageUnavailable("no browser window".into()))?;
        window
            .local_storage()
            .map_err(|e| CoreError::StorageUnavailable(format!("{e:?}")))?
            .ok_or_else(|| CoreError::StorageUnavailable("localStorage is disabled".into()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn name(&self) -> &str {
        "localStorage"
    }

    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| CoreError::StorageRead {
                key: key.to_string(),
                message: format!("{e:?}"),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        // Quota errors surface here.
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| CoreError::StorageWrite {
                key: key.to_string(),
                message: format!("{e:?}"),
            })
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| CoreError::StorageWrite {
                key: key.to_string(),
                message: format!("{e:?}"),
            })
    }
}
