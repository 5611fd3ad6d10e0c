//! Trending topics

use serde::{Deserialize, Serialize};

use crate::key::RecordKey;
use crate::validate;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingTopic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordKey>,
    /// Hashtag text without the leading `#`
    pub name: String,
    pub post_count: u32,
}

impl TrendingTopic {
    pub fn validate(&self) -> Result<()> {
        validate::non_empty("name", &self.name)
    }
}
