use std::sync::mpsc::Receiver;
use std::sync::Arc;

use tracing::warn;

use crate::constants::{FEED_CAP, FEED_RECENT_LABEL, FEED_STATE_KEY};
use crate::events::{ChangeBus, StoreEvent};
use crate::models::{FeedItem, NewFeedItem};
use crate::store::backend::{LoadOutcome, StorageBackend};
use crate::store::now_ms;

/// Persisted activity feed, newest first, capped at [`FEED_CAP`] entries.
///
/// All reads are fail-soft: missing or unreadable data loads as an empty
/// feed. Writes that fail are logged and swallowed; the feed is cosmetic
/// and must never surface a persistence error to the caller.
#[derive(Clone)]
pub struct FeedStore {
    backend: Arc<dyn StorageBackend>,
    bus: Arc<ChangeBus>,
}

impl FeedStore {
    pub fn new(backend: Arc<dyn StorageBackend>, bus: Arc<ChangeBus>) -> Self {
        Self { backend, bus }
    }

    /// Subscribe to change signals for this store's bus.
    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        self.bus.subscribe()
    }

    pub fn load(&self) -> Vec<FeedItem> {
        self.load_outcome().loaded_or(Vec::new())
    }

    pub fn load_outcome(&self) -> LoadOutcome<Vec<FeedItem>> {
        let raw = match self.backend.read(FEED_STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::Empty,
            Err(err) => {
                warn!("feed store read failed: {err}");
                return LoadOutcome::Corrupt;
            }
        };

        match serde_json::from_str::<Vec<FeedItem>>(&raw) {
            // A persisted empty array means the same thing as no data.
            Ok(items) if items.is_empty() => LoadOutcome::Empty,
            Ok(items) => LoadOutcome::Loaded(items),
            Err(_) => LoadOutcome::Corrupt,
        }
    }

    /// Persist the full feed and broadcast a change signal. The signal is
    /// only fired when the persist succeeded.
    pub fn save(&self, items: &[FeedItem]) {
        let json = match serde_json::to_string(items) {
            Ok(json) => json,
            Err(err) => {
                warn!("feed store serialize failed: {err}");
                return;
            }
        };
        if let Err(err) = self.backend.write(FEED_STATE_KEY, &json) {
            warn!("feed store write failed: {err}");
            return;
        }
        self.bus.publish(StoreEvent::FeedUpdated);
    }

    /// Synthesize id and display timestamp, prepend, cap, persist.
    pub fn add_item(&self, item: NewFeedItem) -> FeedItem {
        let new_item = FeedItem {
            id: format!("f-new-{}", now_ms()),
            user: item.user,
            action: item.action,
            target: item.target,
            timestamp: FEED_RECENT_LABEL.to_string(),
            avatar: item.avatar,
        };

        let mut next = self.load();
        next.insert(0, new_item.clone());
        next.truncate(FEED_CAP);
        self.save(&next);

        new_item
    }
}
