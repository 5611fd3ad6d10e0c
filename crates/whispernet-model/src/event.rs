//! Event records

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::key::RecordKey;
use crate::validate;
use crate::Result;

pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const EVENT_TIME_FORMAT: &str = "%H:%M";
/// `date` and `time` joined with a `T`
pub const EVENT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Urban,
    Cultural,
    Sports,
    Music,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Urban => "urban",
            EventType::Cultural => "cultural",
            EventType::Sports => "sports",
            EventType::Music => "music",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EventType {
    type Err = ModelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "urban" => Ok(EventType::Urban),
            "cultural" => Ok(EventType::Cultural),
            "sports" => Ok(EventType::Sports),
            "music" => Ok(EventType::Music),
            _ => Err(ModelError::invalid("type", format!("unknown event type {:?}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordKey>,
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub description: String,
    /// ISO date, `YYYY-MM-DD`
    pub date: String,
    /// 24h `HH:MM`
    pub time: String,
    pub location: String,
    pub ticket_price: f64,
    pub image: String,
}

impl Event {
    /// Combined start date and time, if both parts are well formed
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        let combined = format!("{}T{}", self.date, self.time);
        NaiveDateTime::parse_from_str(&combined, EVENT_DATETIME_FORMAT).ok()
    }

    pub fn validate(&self) -> Result<()> {
        validate::non_empty("name", &self.name)?;
        validate::date("date", &self.date, EVENT_DATE_FORMAT)?;
        validate::time("time", &self.time, EVENT_TIME_FORMAT)?;
        validate::in_range("ticketPrice", self.ticket_price, 0.0, f64::MAX)?;
        validate::uri("image", &self.image)?;
        Ok(())
    }
}
