//! Reactive read bindings over the feed and trend stores.
//!
//! A view loads its snapshot eagerly at construction and subscribes to the
//! store's change bus for its whole lifetime. `refresh()` drains pending
//! signals and reloads the snapshot when a relevant one arrived: a simple
//! one-to-many, last-write-wins publish/reload scheme with no queuing and
//! no conflict resolution. Dropping the view releases the subscription.

use std::sync::mpsc::Receiver;

use crate::constants::TOP_TRENDS_DEFAULT;
use crate::events::StoreEvent;
use crate::models::{FeedItem, Trend};
use crate::store::feed_store::FeedStore;
use crate::store::trend_store::TrendStore;

pub struct FeedView {
    store: FeedStore,
    rx: Receiver<StoreEvent>,
    items: Vec<FeedItem>,
}

impl FeedView {
    pub fn new(store: FeedStore) -> Self {
        let rx = store.subscribe();
        let items = store.load();
        Self { store, rx, items }
    }

    /// Drain pending change signals; reload the snapshot if the feed was
    /// touched. Returns whether a reload happened.
    pub fn refresh(&mut self) -> bool {
        let mut relevant = false;
        while let Ok(event) = self.rx.try_recv() {
            if event == StoreEvent::FeedUpdated {
                relevant = true;
            }
        }
        if relevant {
            self.items = self.store.load();
        }
        relevant
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }
}

pub struct TrendView {
    store: TrendStore,
    rx: Receiver<StoreEvent>,
    trends: Vec<Trend>,
    top_trends: Vec<Trend>,
}

impl TrendView {
    pub fn new(store: TrendStore) -> Self {
        let rx = store.subscribe();
        let trends = store.load();
        let top_trends = trends.iter().take(TOP_TRENDS_DEFAULT).cloned().collect();
        Self {
            store,
            rx,
            trends,
            top_trends,
        }
    }

    pub fn refresh(&mut self) -> bool {
        let mut relevant = false;
        while let Ok(event) = self.rx.try_recv() {
            if event == StoreEvent::TrendsUpdated {
                relevant = true;
            }
        }
        if relevant {
            self.trends = self.store.load();
            self.top_trends = self.trends.iter().take(TOP_TRENDS_DEFAULT).cloned().collect();
        }
        relevant
    }

    pub fn trends(&self) -> &[Trend] {
        &self.trends
    }

    /// Bounded top-N projection, kept in lockstep with the full snapshot.
    pub fn top_trends(&self) -> &[Trend] {
        &self.top_trends
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ChangeBus;
    use crate::models::NewFeedItem;
    use crate::store::backend::MemoryBackend;
    use std::sync::Arc;

    fn stores() -> (FeedStore, TrendStore, Arc<ChangeBus>) {
        let backend: Arc<MemoryBackend> = Arc::new(MemoryBackend::new());
        let bus = Arc::new(ChangeBus::new());
        (
            FeedStore::new(backend.clone(), bus.clone()),
            TrendStore::new(backend, bus.clone()),
            bus,
        )
    }

    fn feed_entry(user: &str) -> NewFeedItem {
        NewFeedItem {
            user: user.to_string(),
            action: "votó en".to_string(),
            target: "Farmacias".to_string(),
            avatar: None,
        }
    }

    fn trend(id: &str, score: f64) -> Trend {
        Trend {
            id: id.to_string(),
            label: id.to_uppercase(),
            score,
            delta_24h: 0.0,
            category: "servicios".to_string(),
        }
    }

    #[test]
    fn test_view_loads_eagerly_at_construction() {
        let (feed_store, _, _) = stores();
        feed_store.add_item(feed_entry("Ana"));

        let view = FeedView::new(feed_store);
        assert_eq!(view.items().len(), 1);
    }

    #[test]
    fn test_refresh_picks_up_mutations() {
        let (feed_store, _, _) = stores();
        let mut view = FeedView::new(feed_store.clone());
        assert!(view.items().is_empty());

        feed_store.add_item(feed_entry("Ana"));
        assert!(view.refresh());
        assert_eq!(view.items().len(), 1);

        // Nothing new: refresh reports no reload.
        assert!(!view.refresh());
    }

    #[test]
    fn test_feed_view_ignores_trend_events() {
        let (feed_store, trend_store, _) = stores();
        let mut view = FeedView::new(feed_store);

        trend_store.save(&[trend("a", 1.0)]);
        assert!(!view.refresh());
    }

    #[test]
    fn test_trend_view_tracks_top_three() {
        let (_, trend_store, _) = stores();
        let mut view = TrendView::new(trend_store.clone());

        trend_store.save(&[
            trend("a", 1.0),
            trend("b", 2.0),
            trend("c", 3.0),
            trend("d", 4.0),
        ]);
        assert!(view.refresh());

        assert_eq!(view.trends().len(), 4);
        let top: Vec<_> = view.top_trends().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(top, vec!["d", "c", "b"]);
    }

    #[test]
    fn test_trend_view_sees_bumps_from_elsewhere() {
        let (_, trend_store, _) = stores();
        trend_store.save(&[trend("a", 10.0), trend("b", 5.0)]);

        let mut view = TrendView::new(trend_store.clone());
        trend_store.bump("b", 20.0);

        assert!(view.refresh());
        assert_eq!(view.trends()[0].id, "b");
        assert_eq!(view.trends()[0].score, 25.0);
    }

    #[test]
    fn test_dropping_a_view_releases_its_subscription() {
        let (feed_store, _, bus) = stores();
        let view_a = FeedView::new(feed_store.clone());
        let view_b = FeedView::new(feed_store.clone());
        assert_eq!(bus.subscriber_count(), 2);

        drop(view_b);
        feed_store.add_item(feed_entry("Ana"));
        assert_eq!(bus.subscriber_count(), 1);
        drop(view_a);
    }
}
