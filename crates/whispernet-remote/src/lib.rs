//! WhisperNet Remote Data Source
//!
//! The seam the read pipeline fetches through, plus a simulated backend
//! that answers after a fixed delay with canned data.

mod error;
mod fixtures;
mod mock;
mod source;

pub use error::RemoteError;
pub use fixtures::fixture_records;
pub use mock::{MockRemote, DEFAULT_LATENCY};
pub use source::RemoteSource;

pub type Result<T> = std::result::Result<T, RemoteError>;
