use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::warn;

use crate::constants::DEMO_METRICS_KEY;
use crate::models::Metrics;
use crate::store::backend::StorageBackend;

/// Simulated "live" platform counters backed by local storage only.
///
/// Reads are also writes: every [`MetricsStore::get`] refreshes the last
/// visit, occasionally bumps the session count, and persists the result, so
/// the numbers drift the way a live dashboard would. Corrupt or missing
/// data reseeds from the base distribution.
#[derive(Clone)]
pub struct MetricsStore {
    backend: Arc<dyn StorageBackend>,
}

impl MetricsStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    fn base(now_iso: &str) -> Metrics {
        let mut rng = rand::rng();
        Metrics {
            sessions: 1,
            votes: rng.random_range(120..200),
            last_visit: now_iso.to_string(),
        }
    }

    fn persist(&self, metrics: &Metrics) {
        match serde_json::to_string(metrics) {
            Ok(json) => {
                if let Err(err) = self.backend.write(DEMO_METRICS_KEY, &json) {
                    warn!("metrics write failed: {err}");
                }
            }
            Err(err) => warn!("metrics serialize failed: {err}"),
        }
    }

    pub fn get(&self) -> Metrics {
        self.get_at(&Utc::now().to_rfc3339())
    }

    pub fn get_at(&self, now_iso: &str) -> Metrics {
        let stored = self
            .backend
            .read(DEMO_METRICS_KEY)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str::<Metrics>(&raw).ok());

        let mut metrics = match stored {
            Some(metrics) => metrics,
            None => {
                let seeded = Self::base(now_iso);
                self.persist(&seeded);
                return seeded;
            }
        };

        if rand::rng().random_bool(0.3) {
            metrics.sessions += 1;
        }
        metrics.last_visit = now_iso.to_string();
        self.persist(&metrics);
        metrics
    }

    pub fn increment_votes(&self, n: u64) -> Metrics {
        let mut metrics = self.get();
        metrics.votes += n;
        self.persist(&metrics);
        metrics
    }
}
