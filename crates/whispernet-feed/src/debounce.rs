//! Input debouncing
//!
//! Each request waits out the quiet period and only runs if no newer
//! request arrived in the meantime. Superseded requests resolve to `None`;
//! nothing is queued.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

pub struct Debouncer {
    delay: Duration,
    /// Ticket of the newest request
    latest: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` after the quiet period, unless a newer request came in.
    pub async fn run<F, Fut, T>(&self, task: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;

        if self.latest.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "Debounced request superseded");
            return None;
        }

        Some(task().await)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Clone for Debouncer {
    fn clone(&self) -> Self {
        Self {
            delay: self.delay,
            latest: Arc::clone(&self.latest),
        }
    }
}
