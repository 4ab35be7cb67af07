use serde::{Deserialize, Serialize};

/// Storage key the dashboard snapshot is written under.
pub const DEFAULT_STORAGE_KEY: &str = "albion-hearts-dashboard";

/// Session configuration for a dashboard instance.
///
/// Not persisted with the state: it decides *where* the state goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Key of the snapshot in the key-value store
    pub storage_key: String,

    /// Write the snapshot after every committed mutation
    pub autosave: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            autosave: true,
        }
    }
}

impl DashboardConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }
}
