//! Event search query
//!
//! Built from the raw values of the search box, type select, date picker
//! and sort select.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use whispernet_feed::{ListingFilter, SortKey};
use whispernet_model::{EventType, EVENT_DATE_FORMAT};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventQuery {
    pub filter: ListingFilter,
    /// `None` keeps the order the remote returned
    pub sort: Option<SortKey>,
}

impl EventQuery {
    /// Empty strings mean "no constraint". An unknown sort value keeps
    /// input order rather than failing.
    pub fn from_controls(
        search: &str,
        event_type: &str,
        date: &str,
        sort_by: &str,
    ) -> Result<Self> {
        let mut filter = ListingFilter::new().with_query(search);

        if !event_type.is_empty() {
            let event_type: EventType = event_type.parse()?;
            filter = filter.with_event_type(event_type);
        }

        if !date.is_empty() {
            let floor = NaiveDate::parse_from_str(date, EVENT_DATE_FORMAT)
                .map_err(|e| CoreError::Input(format!("date {:?}: {}", date, e)))?;
            filter = filter.with_date_floor(floor);
        }

        Ok(Self {
            filter,
            sort: SortKey::parse(sort_by),
        })
    }
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            filter: ListingFilter::default(),
            sort: Some(SortKey::Date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_controls() {
        let query = EventQuery::from_controls("jazz", "music", "2024-08-01", "price").unwrap();
        assert_eq!(query.filter.query, "jazz");
        assert_eq!(query.filter.kind.as_deref(), Some("music"));
        assert_eq!(
            query.filter.date_floor,
            NaiveDate::from_ymd_opt(2024, 8, 1)
        );
        assert_eq!(query.sort, Some(SortKey::Price));
    }

    #[test]
    fn test_blank_controls() {
        let query = EventQuery::from_controls("", "", "", "").unwrap();
        assert_eq!(query.filter, ListingFilter::default());
        assert_eq!(query.sort, None);
    }

    #[test]
    fn test_bad_controls() {
        assert!(matches!(
            EventQuery::from_controls("", "opera", "", "date"),
            Err(CoreError::Model(_))
        ));
        assert!(matches!(
            EventQuery::from_controls("", "", "08/01/2024", "date"),
            Err(CoreError::Input(_))
        ));
    }
}
