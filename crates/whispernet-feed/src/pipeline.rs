//! Read pipeline
//!
//! Remote first. With `CachePolicy::WriteThrough` every successful load is
//! also upserted into the local store, which `load_with_fallback` reads
//! when the remote is unavailable.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use whispernet_model::{Collection, Event, Record};
use whispernet_remote::RemoteSource;
use whispernet_storage::LocalStore;

use crate::error::FeedError;
use crate::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Loads never touch the local store
    #[default]
    RemoteOnly,
    /// Successful loads are upserted into the local store
    WriteThrough,
}

/// Where a list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Remote,
    Cache,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub records: Vec<Record>,
    pub origin: Origin,
}

pub struct FeedPipeline {
    remote: Arc<dyn RemoteSource>,
    store: Option<LocalStore>,
    policy: CachePolicy,
}

impl FeedPipeline {
    pub fn new(remote: Arc<dyn RemoteSource>) -> Self {
        Self {
            remote,
            store: None,
            policy: CachePolicy::RemoteOnly,
        }
    }

    pub fn with_store(mut self, store: LocalStore, policy: CachePolicy) -> Self {
        self.store = Some(store);
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn store(&self) -> Option<&LocalStore> {
        self.store.as_ref()
    }

    /// Fetch a collection from the remote source as-is.
    pub async fn load_collection(&self, collection: Collection) -> Result<Vec<Record>> {
        let path = collection
            .resource_path()
            .ok_or(FeedError::NotRemote(collection))?;

        let records = self.remote.fetch(path).await.map_err(|source| {
            tracing::warn!(%collection, path, error = %source, "Remote load failed");
            FeedError::RemoteUnavailable {
                path: path.to_string(),
                source,
            }
        })?;

        tracing::debug!(
            %collection,
            remote = self.remote.name(),
            count = records.len(),
            "Loaded collection"
        );

        if self.policy == CachePolicy::WriteThrough {
            if let Some(store) = &self.store {
                store.put_many(collection, records.clone()).await?;
                tracing::debug!(%collection, count = records.len(), "Cached collection");
            }
        }

        Ok(records)
    }

    /// Like `load_collection`, but answers from the local store when the
    /// remote is unavailable. If the store cannot answer either, the
    /// remote error is returned.
    pub async fn load_with_fallback(&self, collection: Collection) -> Result<Loaded> {
        let remote_err = match self.load_collection(collection).await {
            Ok(records) => {
                return Ok(Loaded {
                    records,
                    origin: Origin::Remote,
                })
            }
            Err(err @ FeedError::RemoteUnavailable { .. }) => err,
            Err(err) => return Err(err),
        };

        let Some(store) = &self.store else {
            return Err(remote_err);
        };

        match store.get_all(collection).await {
            Ok(records) => {
                tracing::warn!(
                    %collection,
                    count = records.len(),
                    "Serving collection from local store"
                );
                Ok(Loaded {
                    records,
                    origin: Origin::Cache,
                })
            }
            Err(store_err) => {
                tracing::warn!(%collection, error = %store_err, "Local fallback failed");
                Err(remote_err)
            }
        }
    }

    pub async fn load_events(&self) -> Result<Vec<Event>> {
        Ok(self
            .load_collection(Collection::Events)
            .await?
            .into_iter()
            .filter_map(Record::into_event)
            .collect())
    }
}

impl Clone for FeedPipeline {
    fn clone(&self) -> Self {
        Self {
            remote: Arc::clone(&self.remote),
            store: self.store.clone(),
            policy: self.policy,
        }
    }
}
