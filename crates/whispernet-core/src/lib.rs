//! WhisperNet Core
//!
//! Owns the local store handle and the read pipeline for one session,
//! and exposes what the page needs: debounced event search, bulk sync
//! into the store and the offline post outbox.

mod app;
mod config;
mod error;
mod query;

pub use app::{SyncOutcome, Whispernet};
pub use config::Config;
pub use error::CoreError;
pub use query::EventQuery;

// Re-export the layers underneath
pub use whispernet_feed::{
    filter_and_sort, CachePolicy, Debouncer, FeedError, FeedPipeline, Listing, ListingFilter,
    Loaded, Origin, SortKey,
};
pub use whispernet_model::{
    Author, Business, Collection, Comment, Event, EventType, ModelError, Post, Record, RecordKey,
    TrendingTopic,
};
pub use whispernet_remote::{MockRemote, RemoteError, RemoteSource};
pub use whispernet_storage::{LocalStore, StorageError, WriteFailure};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
