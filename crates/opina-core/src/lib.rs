pub mod config;
pub mod constants;
pub mod events;
pub mod insight;
pub mod models;
pub mod store;

pub use config::CoreConfig;
pub use events::{ChangeBus, StoreEvent};
pub use store::{
    FeedStore, FeedView, FileBackend, LoadOutcome, MemoryBackend, MetricsStore, SignalStore,
    SignupCooldown, StorageBackend, StorageError, StorageWatcher, TrendStore, TrendView,
    VoteRegistry,
};
