//! Collection names
//!
//! The set of collections is fixed when the store is created.
//! Names match the object store names the web client has always used.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Events,
    Businesses,
    Posts,
    TrendingTopics,
    /// Posts composed while offline, waiting to be sent
    PendingPosts,
}

/// Shape of the records a collection holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Event,
    Business,
    Post,
    TrendingTopic,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Events,
        Collection::Businesses,
        Collection::Posts,
        Collection::TrendingTopics,
        Collection::PendingPosts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Events => "events",
            Collection::Businesses => "businesses",
            Collection::Posts => "posts",
            Collection::TrendingTopics => "trendingTopics",
            Collection::PendingPosts => "pendingPosts",
        }
    }

    pub fn record_kind(&self) -> RecordKind {
        match self {
            Collection::Events => RecordKind::Event,
            Collection::Businesses => RecordKind::Business,
            Collection::Posts | Collection::PendingPosts => RecordKind::Post,
            Collection::TrendingTopics => RecordKind::TrendingTopic,
        }
    }

    /// Path of the remote resource backing this collection, if any.
    /// Outbox collections only exist locally.
    pub fn resource_path(&self) -> Option<&'static str> {
        match self {
            Collection::Events => Some("/events"),
            Collection::Businesses => Some("/businesses"),
            Collection::Posts => Some("/posts"),
            Collection::TrendingTopics => Some("/trending-topics"),
            Collection::PendingPosts => None,
        }
    }

    /// Collections that mirror a remote resource
    pub fn remote_backed() -> impl Iterator<Item = Collection> {
        Self::ALL
            .into_iter()
            .filter(|c| c.resource_path().is_some())
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Collection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ModelError::CollectionNotFound(s.to_string()))
    }
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Event => "event",
            RecordKind::Business => "business",
            RecordKind::Post => "post",
            RecordKind::TrendingTopic => "trending topic",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        for collection in Collection::ALL {
            let parsed: Collection = collection.as_str().parse().unwrap();
            assert_eq!(parsed, collection);
        }
    }

    #[test]
    fn test_parse_unknown_name() {
        let err = "festivals".parse::<Collection>().unwrap_err();
        assert_eq!(err, ModelError::CollectionNotFound("festivals".to_string()));
    }

    #[test]
    fn test_remote_backed_excludes_outbox() {
        let backed: Vec<Collection> = Collection::remote_backed().collect();
        assert_eq!(backed.len(), 4);
        assert!(!backed.contains(&Collection::PendingPosts));
        assert_eq!(
            Collection::PendingPosts.record_kind(),
            Collection::Posts.record_kind()
        );
    }
}
