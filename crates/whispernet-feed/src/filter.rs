//! List filtering and sorting
//!
//! `filter_and_sort` is pure: it reads its input slice and returns a new
//! vector. Filters combine with AND; the sort is stable, so ties keep
//! their input order.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use whispernet_model::{Business, Event, EventType, Record, EVENT_DATE_FORMAT};

/// Fields the list controls look at
pub trait Listing {
    fn title(&self) -> &str;

    fn summary(&self) -> &str;

    /// Event type or business category
    fn kind_label(&self) -> Option<&str>;

    /// ISO calendar date, if the listing is dated
    fn date(&self) -> Option<&str> {
        None
    }

    fn starts_at(&self) -> Option<NaiveDateTime> {
        None
    }

    fn price(&self) -> Option<f64> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Earliest first, undated last
    Date,
    /// Cheapest first, unpriced last
    Price,
    /// Case-insensitive A to Z
    Name,
}

impl SortKey {
    /// `None` for an unrecognised key, which leaves the order untouched
    pub fn parse(value: &str) -> Option<SortKey> {
        match value {
            "date" => Some(SortKey::Date),
            "price" => Some(SortKey::Price),
            "name" => Some(SortKey::Name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    /// Substring of title or summary, any case. Empty matches everything.
    #[serde(default)]
    pub query: String,
    /// Exact type or category
    #[serde(default)]
    pub kind: Option<String>,
    /// Inclusive lower bound on the listing date
    #[serde(default)]
    pub date_floor: Option<NaiveDate>,
}

impl ListingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_event_type(self, event_type: EventType) -> Self {
        self.with_kind(event_type.as_str())
    }

    pub fn with_date_floor(mut self, floor: NaiveDate) -> Self {
        self.date_floor = Some(floor);
        self
    }

    pub fn matches<L: Listing>(&self, listing: &L) -> bool {
        self.matches_query(listing) && self.matches_kind(listing) && self.matches_date(listing)
    }

    fn matches_query<L: Listing>(&self, listing: &L) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        listing.title().to_lowercase().contains(&needle)
            || listing.summary().to_lowercase().contains(&needle)
    }

    fn matches_kind<L: Listing>(&self, listing: &L) -> bool {
        match self.kind.as_deref() {
            Some(kind) => listing.kind_label() == Some(kind),
            None => true,
        }
    }

    fn matches_date<L: Listing>(&self, listing: &L) -> bool {
        let Some(floor) = self.date_floor else {
            return true;
        };
        listing
            .date()
            .and_then(|d| NaiveDate::parse_from_str(d, EVENT_DATE_FORMAT).ok())
            .is_some_and(|date| date >= floor)
    }
}

pub fn filter_and_sort<L: Listing + Clone>(
    records: &[L],
    filter: &ListingFilter,
    sort: Option<SortKey>,
) -> Vec<L> {
    let mut selected: Vec<L> = records.iter().filter(|r| filter.matches(*r)).cloned().collect();

    if let Some(key) = sort {
        selected.sort_by(|a, b| compare(key, a, b));
    }

    selected
}

fn compare<L: Listing>(key: SortKey, a: &L, b: &L) -> Ordering {
    match key {
        SortKey::Date => missing_last(a.starts_at(), b.starts_at(), |x, y| x.cmp(y)),
        SortKey::Price => missing_last(a.price(), b.price(), |x, y| x.total_cmp(y)),
        SortKey::Name => a.title().to_lowercase().cmp(&b.title().to_lowercase()),
    }
}

fn missing_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(&x, &y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl Listing for Event {
    fn title(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> &str {
        &self.description
    }

    fn kind_label(&self) -> Option<&str> {
        Some(self.event_type.as_str())
    }

    fn date(&self) -> Option<&str> {
        Some(&self.date)
    }

    fn starts_at(&self) -> Option<NaiveDateTime> {
        Event::starts_at(self)
    }

    fn price(&self) -> Option<f64> {
        Some(self.ticket_price)
    }
}

impl Listing for Business {
    fn title(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> &str {
        &self.description
    }

    fn kind_label(&self) -> Option<&str> {
        Some(&self.category)
    }
}

impl Listing for Record {
    fn title(&self) -> &str {
        match self {
            Record::Event(e) => e.title(),
            Record::Business(b) => b.title(),
            Record::Post(p) => &p.content,
            Record::TrendingTopic(t) => &t.name,
        }
    }

    fn summary(&self) -> &str {
        match self {
            Record::Event(e) => e.summary(),
            Record::Business(b) => b.summary(),
            Record::Post(_) | Record::TrendingTopic(_) => "",
        }
    }

    fn kind_label(&self) -> Option<&str> {
        match self {
            Record::Event(e) => e.kind_label(),
            Record::Business(b) => b.kind_label(),
            Record::Post(_) | Record::TrendingTopic(_) => None,
        }
    }

    fn date(&self) -> Option<&str> {
        self.as_event().and_then(|e| e.date())
    }

    fn starts_at(&self) -> Option<NaiveDateTime> {
        self.as_event().and_then(Event::starts_at)
    }

    fn price(&self) -> Option<f64> {
        self.as_event().map(|e| e.ticket_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str, event_type: EventType, date: &str, time: &str, price: f64) -> Event {
        Event {
            id: None,
            name: name.to_string(),
            event_type,
            description: format!("{} description", name),
            date: date.to_string(),
            time: time.to_string(),
            location: "City Park".to_string(),
            ticket_price: price,
            image: "https://picsum.photos/800/600".to_string(),
        }
    }

    fn names(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.name.as_str()).collect()
    }

    fn sample() -> Vec<Event> {
        vec![
            event("Summer Music Festival", EventType::Urban, "2024-07-15", "18:00", 25.0),
            event("Food Expo", EventType::Cultural, "2024-08-20", "12:00", 40.0),
            event("City Marathon", EventType::Sports, "2024-06-01", "07:30", 25.0),
        ]
    }

    #[test]
    fn test_query_matches_name_any_case() {
        let events = vec![
            event("Summer Music Festival", EventType::Urban, "2024-07-15", "18:00", 25.0),
            event("Food Expo", EventType::Cultural, "2024-08-20", "12:00", 40.0),
        ];
        let result = filter_and_sort(&events, &ListingFilter::new().with_query("music"), None);
        assert_eq!(names(&result), vec!["Summer Music Festival"]);
    }

    #[test]
    fn test_query_matches_description() {
        let mut events = sample();
        events[1].description = "Wine TASTING all day".to_string();
        let result = filter_and_sort(&events, &ListingFilter::new().with_query("tasting"), None);
        assert_eq!(names(&result), vec!["Food Expo"]);
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let events = sample();
        let result = filter_and_sort(&events, &ListingFilter::new(), None);
        assert_eq!(result, events);
    }

    #[test]
    fn test_type_filter() {
        let filter = ListingFilter::new().with_event_type(EventType::Sports);
        let result = filter_and_sort(&sample(), &filter, None);
        assert_eq!(names(&result), vec!["City Marathon"]);
    }

    #[test]
    fn test_date_floor_is_inclusive() {
        let events = vec![
            event("July", EventType::Urban, "2024-07-15", "18:00", 10.0),
            event("August", EventType::Urban, "2024-08-20", "12:00", 10.0),
        ];
        let floor = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        let result =
            filter_and_sort(&events, &ListingFilter::new().with_date_floor(floor), None);
        assert_eq!(names(&result), vec!["August"]);

        let exact = NaiveDate::from_ymd_opt(2024, 8, 20).unwrap();
        let result =
            filter_and_sort(&events, &ListingFilter::new().with_date_floor(exact), None);
        assert_eq!(names(&result), vec!["August"]);
    }

    #[test]
    fn test_filters_combine() {
        let filter = ListingFilter::new()
            .with_query("e")
            .with_event_type(EventType::Cultural)
            .with_date_floor(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let result = filter_and_sort(&sample(), &filter, Some(SortKey::Name));
        assert_eq!(names(&result), vec!["Food Expo"]);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let events = vec![
            event("Banana Fest", EventType::Urban, "2024-07-15", "18:00", 10.0),
            event("apple Day", EventType::Urban, "2024-07-16", "18:00", 10.0),
        ];
        let result = filter_and_sort(&events, &ListingFilter::new(), Some(SortKey::Name));
        assert_eq!(names(&result), vec!["apple Day", "Banana Fest"]);
    }

    #[test]
    fn test_sort_by_date_puts_unparsable_last() {
        let events = vec![
            event("Broken", EventType::Urban, "someday", "18:00", 10.0),
            event("Later", EventType::Urban, "2024-08-20", "12:00", 10.0),
            event("Evening", EventType::Urban, "2024-07-15", "18:00", 10.0),
            event("Morning", EventType::Urban, "2024-07-15", "09:00", 10.0),
        ];
        let result = filter_and_sort(&events, &ListingFilter::new(), Some(SortKey::Date));
        assert_eq!(names(&result), vec!["Morning", "Evening", "Later", "Broken"]);
    }

    #[test]
    fn test_sort_by_price_is_stable() {
        let result = filter_and_sort(&sample(), &ListingFilter::new(), Some(SortKey::Price));
        assert_eq!(
            names(&result),
            vec!["Summer Music Festival", "City Marathon", "Food Expo"]
        );
    }

    #[test]
    fn test_unknown_sort_key_keeps_order() {
        assert_eq!(SortKey::parse("popularity"), None);
        let events = sample();
        let result =
            filter_and_sort(&events, &ListingFilter::new(), SortKey::parse("popularity"));
        assert_eq!(result, events);
    }

    #[test]
    fn test_pure_and_idempotent() {
        let events = sample();
        let before = events.clone();
        let filter = ListingFilter::new().with_query("o");

        let first = filter_and_sort(&events, &filter, Some(SortKey::Date));
        let second = filter_and_sort(&events, &filter, Some(SortKey::Date));
        assert_eq!(first, second);
        assert_eq!(events, before);

        let again = filter_and_sort(&first, &filter, Some(SortKey::Date));
        assert_eq!(again, first);
    }

    #[test]
    fn test_businesses_filter_by_category() {
        let cafe = Business {
            id: None,
            name: "Urban Cafe".to_string(),
            category: "restaurant".to_string(),
            description: "A cozy cafe".to_string(),
            location: "Downtown".to_string(),
            rating: 4.5,
            review_count: 128,
            image: "https://picsum.photos/800/600".to_string(),
        };
        let mut hub = cafe.clone();
        hub.name = "Tech Hub".to_string();
        hub.category = "service".to_string();

        let records: Vec<Record> = vec![hub.into(), cafe.into()];
        let filter = ListingFilter::new().with_kind("restaurant");
        let result = filter_and_sort(&records, &filter, Some(SortKey::Name));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title(), "Urban Cafe");

        // Undated listings never pass a date floor
        let dated =
            ListingFilter::new().with_date_floor(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert!(filter_and_sort(&records, &dated, None).is_empty());
    }
}
