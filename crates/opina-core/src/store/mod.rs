pub mod backend;
pub mod feed_store;
pub mod metrics_store;
pub mod signal_store;
pub mod signup_cooldown;
pub mod trend_store;
pub mod views;
pub mod vote_registry;
pub mod watcher;

pub use backend::{FileBackend, LoadOutcome, MemoryBackend, StorageBackend, StorageError};
pub use feed_store::FeedStore;
pub use metrics_store::MetricsStore;
pub use signal_store::SignalStore;
pub use signup_cooldown::SignupCooldown;
pub use trend_store::TrendStore;
pub use views::{FeedView, TrendView};
pub use vote_registry::VoteRegistry;
pub use watcher::StorageWatcher;

/// Current Unix timestamp in milliseconds.
pub(crate) fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
