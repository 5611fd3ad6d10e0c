//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] whispernet_storage::StorageError),

    #[error("Feed error: {0}")]
    Feed(#[from] whispernet_feed::FeedError),

    #[error("Model error: {0}")]
    Model(#[from] whispernet_model::ModelError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Input(String),
}
