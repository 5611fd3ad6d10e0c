//! Posts and their comment threads

use serde::{Deserialize, Serialize};

use crate::key::RecordKey;
use crate::validate;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordKey>,
    pub content: String,
    pub author: Author,
    /// RFC 3339
    pub timestamp: String,
    #[serde(default)]
    pub likes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordKey>,
    pub content: String,
    pub author: Author,
    /// RFC 3339
    pub timestamp: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub dislikes: u32,
    /// Oldest first
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Author {
    fn validate(&self) -> Result<()> {
        validate::non_empty("author.name", &self.name)?;
        validate::uri("author.avatar", &self.avatar)
    }
}

impl Comment {
    pub fn validate(&self) -> Result<()> {
        validate::non_empty("comment.content", &self.content)?;
        validate::timestamp("comment.timestamp", &self.timestamp)?;
        self.author.validate()
    }
}

impl Post {
    pub fn validate(&self) -> Result<()> {
        validate::non_empty("content", &self.content)?;
        validate::timestamp("timestamp", &self.timestamp)?;
        self.author.validate()?;
        for comment in &self.comments {
            comment.validate()?;
        }
        Ok(())
    }
}
