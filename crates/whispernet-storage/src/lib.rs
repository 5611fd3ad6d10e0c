//! WhisperNet Storage Layer
//!
//! SQLite-backed persistence for offline copies of every collection.
//! One connection per store handle; every write goes through a transaction.

mod database;
mod error;
mod migrations;
mod records;
mod store;

pub use error::{StorageError, WriteFailure};
pub use migrations::SCHEMA_VERSION;
pub use store::LocalStore;

pub type Result<T> = std::result::Result<T, StorageError>;
