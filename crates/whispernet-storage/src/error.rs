//! Storage error types

use thiserror::Error;
use whispernet_model::{ModelError, RecordKey};

/// One rejected record from a batched put
#[derive(Debug, Clone, PartialEq)]
pub struct WriteFailure {
    /// Position in the submitted batch
    pub index: usize,
    pub key: Option<RecordKey>,
    pub reason: String,
}

impl std::fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.key {
            Some(key) => write!(f, "#{} (key {}): {}", self.index, key, self.reason),
            None => write!(f, "#{}: {}", self.index, self.reason),
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Key generator exhausted for collection: {0}")]
    KeyGeneratorExhausted(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(ModelError),

    /// Writes that succeeded are kept; `written` holds their keys
    #[error(
        "Partial write failure: {} writes failed, {} succeeded",
        .failures.len(),
        .written.len()
    )]
    PartialWriteFailure {
        written: Vec<RecordKey>,
        failures: Vec<WriteFailure>,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage task failed: {0}")]
    Task(String),
}

impl From<ModelError> for StorageError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::CollectionNotFound(name) => StorageError::CollectionNotFound(name),
            other => StorageError::InvalidRecord(other),
        }
    }
}
