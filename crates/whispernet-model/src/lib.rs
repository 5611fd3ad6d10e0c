//! WhisperNet data model
//!
//! Typed records for every collection the local store keeps:
//! events, businesses, posts and trending topics.
//! Records are validated at the store boundary before they are written.

mod business;
mod collection;
mod error;
mod event;
mod key;
mod post;
mod record;
mod topic;
mod validate;

pub use business::Business;
pub use collection::{Collection, RecordKind};
pub use error::ModelError;
pub use event::{Event, EventType, EVENT_DATE_FORMAT, EVENT_DATETIME_FORMAT, EVENT_TIME_FORMAT};
pub use key::RecordKey;
pub use post::{Author, Comment, Post};
pub use record::Record;
pub use topic::TrendingTopic;

pub type Result<T> = std::result::Result<T, ModelError>;
