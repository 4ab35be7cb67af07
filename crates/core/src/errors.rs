use thiserror::Error;

/// Unified error type for the hearts-dashboard-core library.
///
/// Only the storage layer and the strict input helpers surface these.
/// State transitions and derived metrics never fail.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / Snapshot ──────────────────────────────────────────
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage write failed for key '{key}': {message}")]
    StorageWrite { key: String, message: String },

    #[error("Storage read failed for key '{key}': {message}")]
    StorageRead { key: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Input ───────────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
