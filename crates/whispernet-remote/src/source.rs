//! Remote source trait

use async_trait::async_trait;
use whispernet_model::Record;

use crate::Result;

/// Request/response access to remote collections, keyed by resource path
/// (e.g. `/events`). Failures are returned immediately; there is no retry.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Vec<Record>>;

    fn name(&self) -> &'static str;
}
