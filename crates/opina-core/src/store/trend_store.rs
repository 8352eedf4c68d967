use std::sync::mpsc::Receiver;
use std::sync::Arc;

use tracing::warn;

use crate::constants::{TREND_DELTA_STEP, TREND_STATE_KEY};
use crate::events::{ChangeBus, StoreEvent};
use crate::models::Trend;
use crate::store::backend::{LoadOutcome, StorageBackend};

/// Persisted trend rankings.
///
/// Invariant: anything returned by [`TrendStore::load`] or produced by
/// [`TrendStore::bump`] is sorted by score descending, ties broken by id
/// ascending. [`TrendStore::save`] persists the caller's order as given.
#[derive(Clone)]
pub struct TrendStore {
    backend: Arc<dyn StorageBackend>,
    bus: Arc<ChangeBus>,
}

impl TrendStore {
    pub fn new(backend: Arc<dyn StorageBackend>, bus: Arc<ChangeBus>) -> Self {
        Self { backend, bus }
    }

    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        self.bus.subscribe()
    }

    pub fn load(&self) -> Vec<Trend> {
        self.load_outcome().loaded_or(Vec::new())
    }

    pub fn load_outcome(&self) -> LoadOutcome<Vec<Trend>> {
        let raw = match self.backend.read(TREND_STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::Empty,
            Err(err) => {
                warn!("trend store read failed: {err}");
                return LoadOutcome::Corrupt;
            }
        };

        match serde_json::from_str::<Vec<Trend>>(&raw) {
            Ok(trends) if trends.is_empty() => LoadOutcome::Empty,
            Ok(mut trends) => {
                Trend::sort_ranked(&mut trends);
                LoadOutcome::Loaded(trends)
            }
            Err(_) => LoadOutcome::Corrupt,
        }
    }

    /// Persist trends in the caller's order and broadcast a change signal.
    pub fn save(&self, trends: &[Trend]) {
        let json = match serde_json::to_string(trends) {
            Ok(json) => json,
            Err(err) => {
                warn!("trend store serialize failed: {err}");
                return;
            }
        };
        if let Err(err) = self.backend.write(TREND_STATE_KEY, &json) {
            warn!("trend store write failed: {err}");
            return;
        }
        self.bus.publish(StoreEvent::TrendsUpdated);
    }

    /// Add `amount` to the trend's score. The 24h delta moves by a fixed
    /// step, and only on a positive bump. Returns the updated entry, or
    /// `None` (with no side effects) when the id is unknown.
    pub fn bump(&self, trend_id: &str, amount: f64) -> Option<Trend> {
        let mut trends = self.load();
        let index = trends.iter().position(|t| t.id == trend_id)?;

        trends[index].score += amount;
        if amount > 0.0 {
            trends[index].delta_24h += TREND_DELTA_STEP;
        }
        let updated = trends[index].clone();

        Trend::sort_ranked(&mut trends);
        self.save(&trends);

        Some(updated)
    }

    /// Bounded, non-destructive read of the highest-ranked trends.
    pub fn top_trends(&self, limit: usize) -> Vec<Trend> {
        let mut trends = self.load();
        trends.truncate(limit);
        trends
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOP_TRENDS_DEFAULT;
    use crate::store::backend::MemoryBackend;

    fn store() -> TrendStore {
        TrendStore::new(Arc::new(MemoryBackend::new()), Arc::new(ChangeBus::new()))
    }

    fn trend(id: &str, score: f64) -> Trend {
        Trend {
            id: id.to_string(),
            label: id.to_uppercase(),
            score,
            delta_24h: 1.0,
            category: "consumo".to_string(),
        }
    }

    #[test]
    fn test_load_returns_sorted_by_score_descending() {
        let store = store();
        store.save(&[trend("a", 5.0), trend("b", 12.0), trend("c", 8.0)]);

        let ids: Vec<_> = store.load().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_equal_scores_order_by_id() {
        let store = store();
        store.save(&[trend("z", 3.0), trend("a", 3.0)]);

        let ids: Vec<_> = store.load().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["a", "z"]);
    }

    #[test]
    fn test_bump_reorders_collection() {
        // saveTrends([a:10, b:5]) then bump(b, 20) => [b:25, a:10]
        let store = store();
        store.save(&[trend("a", 10.0), trend("b", 5.0)]);

        let updated = store.bump("b", 20.0).expect("trend exists");
        assert_eq!(updated.score, 25.0);

        let trends = store.load();
        assert_eq!(trends[0].id, "b");
        assert_eq!(trends[0].score, 25.0);
        assert_eq!(trends[1].id, "a");
        assert_eq!(trends[1].score, 10.0);
    }

    #[test]
    fn test_positive_bump_moves_both_score_and_delta() {
        let store = store();
        store.save(&[trend("a", 10.0)]);

        let updated = store.bump("a", 2.0).unwrap();
        assert_eq!(updated.score, 12.0);
        assert!((updated.delta_24h - (1.0 + TREND_DELTA_STEP)).abs() < 1e-9);
    }

    #[test]
    fn test_negative_bump_leaves_delta_unchanged() {
        let store = store();
        store.save(&[trend("a", 10.0)]);

        let updated = store.bump("a", -3.0).unwrap();
        assert_eq!(updated.score, 7.0);
        assert_eq!(updated.delta_24h, 1.0);
    }

    #[test]
    fn test_bump_unknown_id_is_a_no_op() {
        let store = store();
        store.save(&[trend("a", 10.0)]);
        let rx = store.subscribe();

        assert!(store.bump("missing", 5.0).is_none());
        // No persist happened, so no change signal either.
        assert!(rx.try_recv().is_err());
        assert_eq!(store.load()[0].score, 10.0);
    }

    #[test]
    fn test_top_trends_is_bounded_and_non_destructive() {
        let store = store();
        store.save(&[trend("a", 1.0), trend("b", 2.0), trend("c", 3.0), trend("d", 4.0)]);

        let top = store.top_trends(TOP_TRENDS_DEFAULT);
        let ids: Vec<_> = top.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["d", "c", "b"]);

        assert_eq!(store.load().len(), 4);
    }

    #[test]
    fn test_malformed_json_loads_as_empty() {
        let backend = Arc::new(MemoryBackend::new());
        backend.write(TREND_STATE_KEY, "[[broken").unwrap();

        let store = TrendStore::new(backend, Arc::new(ChangeBus::new()));
        assert!(store.load().is_empty());
        assert_eq!(store.load_outcome(), LoadOutcome::Corrupt);
    }

    #[test]
    fn test_save_broadcasts_update() {
        let store = store();
        let rx = store.subscribe();

        store.save(&[trend("a", 1.0)]);
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::TrendsUpdated);
    }
}
