//! Feed error types

use thiserror::Error;
use whispernet_model::Collection;
use whispernet_remote::RemoteError;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Remote unavailable for {path}: {source}")]
    RemoteUnavailable { path: String, source: RemoteError },

    #[error("Collection {0} has no remote resource")]
    NotRemote(Collection),

    #[error("Storage error: {0}")]
    Storage(#[from] whispernet_storage::StorageError),
}
