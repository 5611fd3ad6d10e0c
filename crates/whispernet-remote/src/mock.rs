//! Simulated backend
//!
//! Every request waits a fixed latency before it is answered. Paths are
//! matched by prefix (`/events?page=2` is still events), except
//! `/trending-topics` which must match exactly.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use whispernet_model::{Collection, Record};

use crate::error::RemoteError;
use crate::fixtures::fixture_records;
use crate::source::RemoteSource;
use crate::Result;

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

pub struct MockRemote {
    latency: Duration,
    /// Per-collection response bodies
    data: Arc<RwLock<HashMap<Collection, Vec<Record>>>>,
    online: Arc<AtomicBool>,
}

impl MockRemote {
    pub fn new(latency: Duration) -> Self {
        let data: HashMap<Collection, Vec<Record>> = Collection::remote_backed()
            .map(|c| (c, fixture_records(c)))
            .collect();

        Self {
            latency,
            data: Arc::new(RwLock::new(data)),
            online: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Replace what the backend returns for `collection`
    pub fn set_records(&self, collection: Collection, records: Vec<Record>) {
        self.data.write().insert(collection, records);
    }

    /// While offline every request fails with `RemoteError::Offline`
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
        tracing::info!(online, "Mock remote connectivity changed");
    }

    /// Collection a request path addresses
    pub fn resolve(path: &str) -> Option<Collection> {
        if path.starts_with("/businesses") {
            Some(Collection::Businesses)
        } else if path.starts_with("/posts") {
            Some(Collection::Posts)
        } else if path.starts_with("/events") {
            Some(Collection::Events)
        } else if path == "/trending-topics" {
            Some(Collection::TrendingTopics)
        } else {
            None
        }
    }
}

impl Default for MockRemote {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

impl Clone for MockRemote {
    fn clone(&self) -> Self {
        Self {
            latency: self.latency,
            data: Arc::clone(&self.data),
            online: Arc::clone(&self.online),
        }
    }
}

#[async_trait]
impl RemoteSource for MockRemote {
    async fn fetch(&self, path: &str) -> Result<Vec<Record>> {
        tokio::time::sleep(self.latency).await;

        if !self.online.load(Ordering::SeqCst) {
            tracing::warn!(path, "Remote offline");
            return Err(RemoteError::Offline(path.to_string()));
        }

        let collection = Self::resolve(path).ok_or_else(|| {
            tracing::error!(path, "Endpoint not found");
            RemoteError::NotFound(path.to_string())
        })?;

        let records = self
            .data
            .read()
            .get(&collection)
            .cloned()
            .unwrap_or_default();

        tracing::debug!(path, count = records.len(), "Remote responded");
        Ok(records)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
