//! Business listings

use serde::{Deserialize, Serialize};

use crate::key::RecordKey;
use crate::validate;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordKey>,
    pub name: String,
    pub category: String,
    pub description: String,
    pub location: String,
    /// 0 to 5 stars
    pub rating: f64,
    pub review_count: u32,
    pub image: String,
}

impl Business {
    pub fn validate(&self) -> Result<()> {
        validate::non_empty("name", &self.name)?;
        validate::in_range("rating", self.rating, 0.0, 5.0)?;
        validate::uri("image", &self.image)?;
        Ok(())
    }
}
