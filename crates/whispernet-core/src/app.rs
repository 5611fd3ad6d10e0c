//! Application container
//!
//! One store handle and one pipeline per session. The handle is opened
//! here and released by `close`; nothing is process-global.

use futures_util::future::join_all;
use std::sync::Arc;

use whispernet_feed::{filter_and_sort, CachePolicy, Debouncer, FeedPipeline};
use whispernet_model::{Collection, Event, Post, Record, RecordKey};
use whispernet_remote::{MockRemote, RemoteSource};
use whispernet_storage::LocalStore;

use crate::config::Config;
use crate::error::CoreError;
use crate::query::EventQuery;
use crate::Result;

/// Result of syncing one collection into the local store
#[derive(Debug)]
pub struct SyncOutcome {
    pub collection: Collection,
    /// Number of records stored
    pub result: Result<usize>,
}

pub struct Whispernet {
    config: Config,
    store: LocalStore,
    pipeline: FeedPipeline,
    /// Collapses bursts of search input
    search: Debouncer,
}

impl Whispernet {
    /// Open the local store from `config` and wire the simulated backend.
    pub async fn open(config: Config) -> Result<Self> {
        config.validate()?;

        if let Some(parent) = config.database_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let store = LocalStore::initialize(&config.database_path).await?;
        let remote = MockRemote::new(config.remote_latency());

        tracing::info!(
            database = %config.database_path.display(),
            cache_policy = ?config.cache_policy,
            "WhisperNet opened"
        );

        Ok(Self::from_parts(config, store, Arc::new(remote)))
    }

    pub fn from_parts(config: Config, store: LocalStore, remote: Arc<dyn RemoteSource>) -> Self {
        let pipeline = FeedPipeline::new(remote).with_store(store.clone(), config.cache_policy);
        let search = Debouncer::new(config.debounce());

        Self {
            config,
            store,
            pipeline,
            search,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn pipeline(&self) -> &FeedPipeline {
        &self.pipeline
    }

    /// Initial event list, in the order the remote returns it
    pub async fn load_events(&self) -> Result<Vec<Event>> {
        Ok(self.pipeline.load_events().await?)
    }

    /// Debounced search. Returns `Ok(None)` when a newer search superseded
    /// this one before it started. Falls back to the local store when the
    /// remote is unavailable.
    pub async fn search_events(&self, query: EventQuery) -> Result<Option<Vec<Event>>> {
        let pipeline = &self.pipeline;
        let query = &query;

        self.search
            .run(move || async move {
                let loaded = pipeline.load_with_fallback(Collection::Events).await?;
                let events: Vec<Event> = loaded
                    .records
                    .into_iter()
                    .filter_map(Record::into_event)
                    .collect();

                let result = filter_and_sort(&events, &query.filter, query.sort);
                tracing::debug!(
                    origin = ?loaded.origin,
                    total = events.len(),
                    shown = result.len(),
                    "Event search"
                );
                Ok::<_, CoreError>(result)
            })
            .await
            .transpose()
    }

    /// Fetch every remote-backed collection concurrently and store a copy
    /// of each. Failures are reported per collection.
    pub async fn sync_all(&self) -> Vec<SyncOutcome> {
        let outcomes = join_all(Collection::remote_backed().map(|collection| async move {
            SyncOutcome {
                collection,
                result: self.sync_collection(collection).await,
            }
        }))
        .await;

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        if failed > 0 {
            tracing::warn!(failed, total = outcomes.len(), "Sync finished with failures");
        } else {
            tracing::info!(total = outcomes.len(), "Sync finished");
        }

        outcomes
    }

    async fn sync_collection(&self, collection: Collection) -> Result<usize> {
        let records = self.pipeline.load_collection(collection).await?;
        let count = records.len();

        // Write-through already stored them
        if self.pipeline.policy() != CachePolicy::WriteThrough {
            self.store.put_many(collection, records).await?;
        }

        Ok(count)
    }

    /// Keep a post composed offline until it can be sent
    pub async fn queue_post(&self, post: Post) -> Result<RecordKey> {
        let key = self
            .store
            .put(Collection::PendingPosts, Record::Post(post))
            .await?;
        tracing::info!(key = %key, "Queued post");
        Ok(key)
    }

    pub async fn pending_posts(&self) -> Result<Vec<Post>> {
        Ok(self
            .store
            .get_all(Collection::PendingPosts)
            .await?
            .into_iter()
            .filter_map(Record::into_post)
            .collect())
    }

    /// Release the store handle
    pub async fn close(self) -> Result<()> {
        drop(self.pipeline);
        self.store.close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use whispernet_feed::SortKey;
    use whispernet_model::Author;
    use whispernet_storage::StorageError;

    fn test_config(dir: &std::path::Path) -> Config {
        let mut config = Config::new(dir.to_path_buf());
        config.remote_latency_ms = 5;
        config
    }

    fn mock_remote() -> MockRemote {
        MockRemote::new(Duration::from_millis(5))
    }

    async fn app_with(remote: MockRemote, policy: CachePolicy) -> Whispernet {
        let mut config = Config::new(std::path::PathBuf::from("unused"));
        config.cache_policy = policy;
        let store = LocalStore::initialize_in_memory().await.unwrap();
        Whispernet::from_parts(config, store, Arc::new(remote))
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_events() {
        let app = app_with(mock_remote(), CachePolicy::RemoteOnly).await;

        let query = EventQuery::from_controls("music", "", "", "date").unwrap();
        let events = app.search_events(query).await.unwrap().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Summer Music Festival");

        let query = EventQuery::from_controls("", "", "2024-08-01", "name").unwrap();
        let events = app.search_events(query).await.unwrap().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, "2024-08-20");
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_search_returns_none() {
        let app = app_with(mock_remote(), CachePolicy::RemoteOnly).await;

        let (first, second) = tokio::join!(app.search_events(EventQuery::default()), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            app.search_events(EventQuery {
                sort: Some(SortKey::Price),
                ..EventQuery::default()
            })
            .await
        });

        assert!(first.unwrap().is_none());
        let events = second.unwrap().unwrap();
        assert_eq!(events[0].ticket_price, 25.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_all_then_search_offline() {
        let remote = mock_remote();
        let app = app_with(remote.clone(), CachePolicy::RemoteOnly).await;

        let outcomes = app.sync_all().await;
        assert_eq!(outcomes.len(), 4);
        for outcome in &outcomes {
            assert!(outcome.result.is_ok(), "{:?}", outcome);
        }
        assert_eq!(app.store().count(Collection::Events).await.unwrap(), 2);
        assert_eq!(app.store().count(Collection::Businesses).await.unwrap(), 2);
        assert_eq!(app.store().count(Collection::Posts).await.unwrap(), 1);
        assert_eq!(app.store().count(Collection::TrendingTopics).await.unwrap(), 3);

        remote.set_online(false);
        let events = app
            .search_events(EventQuery::from_controls("expo", "", "", "date").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Food & Wine Expo");
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_reports_failures() {
        let remote = mock_remote();
        remote.set_online(false);
        let app = app_with(remote, CachePolicy::WriteThrough).await;

        let outcomes = app.sync_all().await;
        assert!(outcomes.iter().all(|o| o.result.is_err()));
        assert_eq!(app.store().count(Collection::Events).await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_post_outbox() {
        let app = app_with(mock_remote(), CachePolicy::RemoteOnly).await;

        let post = Post {
            id: None,
            content: "Anyone going to the night market?".to_string(),
            author: Author {
                name: "Jane Smith".to_string(),
                avatar: "https://picsum.photos/100/100?random=3".to_string(),
            },
            timestamp: "2024-07-01T09:30:00Z".to_string(),
            likes: 0,
            dislikes: 0,
            comments: Vec::new(),
        };

        let key = app.queue_post(post.clone()).await.unwrap();
        assert_eq!(key, RecordKey::Int(1));

        let pending = app.pending_posts().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].content, post.content);
        assert_eq!(pending[0].id, Some(RecordKey::Int(1)));

        let mut invalid = post;
        invalid.timestamp = "later".to_string();
        let err = app.queue_post(invalid).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Storage(StorageError::InvalidRecord(_))
        ));
    }

    #[tokio::test]
    async fn test_open_persists_between_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir.path().join("data"));

        let app = Whispernet::open(config.clone()).await.unwrap();
        assert!(dir.path().join("data").is_dir());
        let outcomes = app.sync_all().await;
        assert!(outcomes.iter().all(|o| o.result.is_ok()));
        app.close().await.unwrap();

        let reopened = Whispernet::open(config).await.unwrap();
        assert_eq!(
            reopened.store().count(Collection::TrendingTopics).await.unwrap(),
            3
        );
    }
}
