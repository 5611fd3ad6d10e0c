//! WhisperNet Feed
//!
//! Loads collections from the remote source, optionally keeps the local
//! store in step, and narrows lists with the search, type, date and sort
//! controls. Bursty input is collapsed by a debouncer.

mod debounce;
mod error;
mod filter;
mod pipeline;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use error::FeedError;
pub use filter::{filter_and_sort, Listing, ListingFilter, SortKey};
pub use pipeline::{CachePolicy, FeedPipeline, Loaded, Origin};

pub type Result<T> = std::result::Result<T, FeedError>;
