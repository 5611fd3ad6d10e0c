//! Tagged record union
//!
//! A collection only ever holds one kind of record. The store checks
//! the kind and validates every record before writing it.

use serde::{Deserialize, Serialize};

use crate::business::Business;
use crate::collection::{Collection, RecordKind};
use crate::error::ModelError;
use crate::event::Event;
use crate::key::RecordKey;
use crate::post::Post;
use crate::topic::TrendingTopic;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Record {
    Event(Event),
    Business(Business),
    Post(Post),
    TrendingTopic(TrendingTopic),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Event(_) => RecordKind::Event,
            Record::Business(_) => RecordKind::Business,
            Record::Post(_) => RecordKind::Post,
            Record::TrendingTopic(_) => RecordKind::TrendingTopic,
        }
    }

    pub fn key(&self) -> Option<&RecordKey> {
        match self {
            Record::Event(r) => r.id.as_ref(),
            Record::Business(r) => r.id.as_ref(),
            Record::Post(r) => r.id.as_ref(),
            Record::TrendingTopic(r) => r.id.as_ref(),
        }
    }

    pub fn set_key(&mut self, key: RecordKey) {
        let id = match self {
            Record::Event(r) => &mut r.id,
            Record::Business(r) => &mut r.id,
            Record::Post(r) => &mut r.id,
            Record::TrendingTopic(r) => &mut r.id,
        };
        *id = Some(key);
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Record::Event(r) => r.validate(),
            Record::Business(r) => r.validate(),
            Record::Post(r) => r.validate(),
            Record::TrendingTopic(r) => r.validate(),
        }
    }

    /// Kind check plus field validation for a write into `collection`
    pub fn validate_for(&self, collection: Collection) -> Result<()> {
        let expected = collection.record_kind();
        if self.kind() != expected {
            return Err(ModelError::KindMismatch {
                expected,
                found: self.kind(),
            });
        }
        self.validate()
    }

    /// JSON of the inner record, without the kind tag
    pub fn to_payload(&self) -> serde_json::Result<String> {
        match self {
            Record::Event(r) => serde_json::to_string(r),
            Record::Business(r) => serde_json::to_string(r),
            Record::Post(r) => serde_json::to_string(r),
            Record::TrendingTopic(r) => serde_json::to_string(r),
        }
    }

    pub fn from_payload(kind: RecordKind, payload: &str) -> serde_json::Result<Self> {
        Ok(match kind {
            RecordKind::Event => Record::Event(serde_json::from_str(payload)?),
            RecordKind::Business => Record::Business(serde_json::from_str(payload)?),
            RecordKind::Post => Record::Post(serde_json::from_str(payload)?),
            RecordKind::TrendingTopic => Record::TrendingTopic(serde_json::from_str(payload)?),
        })
    }

    pub fn as_event(&self) -> Option<&Event> {
        match self {
            Record::Event(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_event(self) -> Option<Event> {
        match self {
            Record::Event(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_post(self) -> Option<Post> {
        match self {
            Record::Post(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Event> for Record {
    fn from(value: Event) -> Self {
        Record::Event(value)
    }
}

impl From<Business> for Record {
    fn from(value: Business) -> Self {
        Record::Business(value)
    }
}

impl From<Post> for Record {
    fn from(value: Post) -> Self {
        Record::Post(value)
    }
}

impl From<TrendingTopic> for Record {
    fn from(value: TrendingTopic) -> Self {
        Record::TrendingTopic(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(name: &str) -> Record {
        Record::TrendingTopic(TrendingTopic {
            id: None,
            name: name.to_string(),
            post_count: 156,
        })
    }

    #[test]
    fn test_set_key() {
        let mut record = topic("LocalFoodScene");
        assert!(record.key().is_none());

        record.set_key(RecordKey::Int(3));
        assert_eq!(record.key(), Some(&RecordKey::Int(3)));
    }

    #[test]
    fn test_kind_mismatch() {
        let err = topic("SmallBusiness")
            .validate_for(Collection::Events)
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::KindMismatch {
                expected: RecordKind::Event,
                found: RecordKind::TrendingTopic,
            }
        );
        assert!(topic("SmallBusiness")
            .validate_for(Collection::TrendingTopics)
            .is_ok());
    }

    #[test]
    fn test_payload_has_no_tag() {
        let record = topic("CommunityEvents");
        let payload = record.to_payload().unwrap();
        assert!(!payload.contains("kind"));

        let back = Record::from_payload(RecordKind::TrendingTopic, &payload).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_tagged_serde() {
        let json = serde_json::to_value(topic("CommunityEvents")).unwrap();
        assert_eq!(json["kind"], "trendingTopic");
        assert_eq!(json["postCount"], 156);
    }
}
