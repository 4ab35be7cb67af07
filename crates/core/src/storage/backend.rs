use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::errors::CoreError;

/// Durable string key-value storage the dashboard snapshot is written to.
///
/// The browser build uses `localStorage`; native builds and tests use the
/// file or in-memory stores below. Swapping stores never touches the
/// state or the snapshot format.
pub trait KeyValueStore {
    /// Human-readable name of this store (for logs).
    fn name(&self) -> &str;

    /// Read the value under `key`. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}

/// In-memory store. Clones share the same map, so a handle kept
/// outside the dashboard sees everything the dashboard writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with an existing snapshot.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.into(), value.into());
        store
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Directory-backed store: each key is a `<key>.json` file (native only).
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<std::path::PathBuf, CoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(CoreError::StorageUnavailable(format!(
                "Key '{key}' cannot be used as a file name"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::StorageRead {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write to a sibling file first so a crash never leaves half a snapshot.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)
            .and_then(|()| std::fs::rename(&tmp, &path))
            .map_err(|e| CoreError::StorageWrite {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
