//! Remote error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Endpoint not found: {0}")]
    NotFound(String),

    #[error("Remote unreachable while requesting {0}")]
    Offline(String),
}
