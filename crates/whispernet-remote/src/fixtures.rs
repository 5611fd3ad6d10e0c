//! Canned data served by the simulated backend

use chrono::Utc;
use whispernet_model::{
    Author, Business, Collection, Comment, Event, EventType, Post, Record, RecordKey,
    TrendingTopic,
};

fn picsum(size: &str, seed: u32) -> String {
    format!("https://picsum.photos/{}?random={}", size, seed)
}

/// Records the backend returns for `collection`. Post timestamps are "now".
pub fn fixture_records(collection: Collection) -> Vec<Record> {
    match collection {
        Collection::Businesses => businesses(),
        Collection::Posts => posts(),
        Collection::Events => events(),
        Collection::TrendingTopics => trending_topics(),
        Collection::PendingPosts => Vec::new(),
    }
}

fn businesses() -> Vec<Record> {
    vec![
        Business {
            id: Some(RecordKey::from("1")),
            name: "Urban Cafe".to_string(),
            category: "restaurant".to_string(),
            description: "A cozy cafe serving artisanal coffee and pastries".to_string(),
            location: "Downtown".to_string(),
            rating: 4.5,
            review_count: 128,
            image: picsum("800/600", 1),
        }
        .into(),
        Business {
            id: Some(RecordKey::from("2")),
            name: "Tech Hub".to_string(),
            category: "service".to_string(),
            description: "Professional IT services and consulting".to_string(),
            location: "Business District".to_string(),
            rating: 4.8,
            review_count: 89,
            image: picsum("800/600", 2),
        }
        .into(),
    ]
}

fn posts() -> Vec<Record> {
    let now = Utc::now().to_rfc3339();
    vec![Post {
        id: Some(RecordKey::from("1")),
        content: "Just discovered an amazing new restaurant downtown!".to_string(),
        author: Author {
            name: "Jane Smith".to_string(),
            avatar: picsum("100/100", 3),
        },
        timestamp: now.clone(),
        likes: 42,
        dislikes: 2,
        comments: vec![Comment {
            id: Some(RecordKey::from("1")),
            content: "Thanks for sharing!".to_string(),
            author: Author {
                name: "John Doe".to_string(),
                avatar: picsum("100/100", 4),
            },
            timestamp: now,
            likes: 5,
        }],
    }
    .into()]
}

fn events() -> Vec<Record> {
    vec![
        Event {
            id: Some(RecordKey::from("1")),
            name: "Summer Music Festival".to_string(),
            event_type: EventType::Urban,
            description: "Annual music festival featuring local artists".to_string(),
            date: "2024-07-15".to_string(),
            time: "18:00".to_string(),
            location: "City Park".to_string(),
            ticket_price: 25.0,
            image: picsum("800/600", 5),
        }
        .into(),
        Event {
            id: Some(RecordKey::from("2")),
            name: "Food & Wine Expo".to_string(),
            event_type: EventType::Cultural,
            description: "Explore local cuisine and wine tasting".to_string(),
            date: "2024-08-20".to_string(),
            time: "12:00".to_string(),
            location: "Convention Center".to_string(),
            ticket_price: 40.0,
            image: picsum("800/600", 6),
        }
        .into(),
    ]
}

fn trending_topics() -> Vec<Record> {
    [("1", "LocalFoodScene", 156), ("2", "CommunityEvents", 89), ("3", "SmallBusiness", 234)]
        .into_iter()
        .map(|(id, name, post_count)| {
            TrendingTopic {
                id: Some(RecordKey::from(id)),
                name: name.to_string(),
                post_count,
            }
            .into()
        })
        .collect()
}
