use std::sync::Arc;

use tracing::warn;

use crate::constants::{LAST_REVIEW_KEY_PREFIX, VOTE_COOLDOWN_MS};
use crate::store::backend::StorageBackend;
use crate::store::now_ms;

/// Per-target vote gate: one vote per target per 12 hours.
///
/// Records are epoch-ms strings keyed by target id. There is no expiry
/// sweep; a stale record simply stops mattering once the window has passed.
#[derive(Clone)]
pub struct VoteRegistry {
    backend: Arc<dyn StorageBackend>,
}

impl VoteRegistry {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    fn key(target_id: &str) -> String {
        format!("{LAST_REVIEW_KEY_PREFIX}{target_id}")
    }

    pub fn has_voted(&self, target_id: &str) -> bool {
        self.has_voted_at(target_id, now_ms())
    }

    /// Time-explicit twin of [`VoteRegistry::has_voted`].
    pub fn has_voted_at(&self, target_id: &str, now_ms: u64) -> bool {
        let raw = match self.backend.read(&Self::key(target_id)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(err) => {
                warn!("vote registry read failed for {target_id}: {err}");
                return false;
            }
        };

        match raw.trim().parse::<u64>() {
            Ok(last_vote) => now_ms.saturating_sub(last_vote) < VOTE_COOLDOWN_MS,
            Err(_) => false,
        }
    }

    pub fn register_vote(&self, target_id: &str) {
        self.register_vote_at(target_id, now_ms());
    }

    pub fn register_vote_at(&self, target_id: &str, now_ms: u64) {
        if let Err(err) = self.backend.write(&Self::key(target_id), &now_ms.to_string()) {
            warn!("vote registry write failed for {target_id}: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::MemoryBackend;

    fn registry() -> VoteRegistry {
        VoteRegistry::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn test_never_voted_target_is_open() {
        assert!(!registry().has_voted("supermercados"));
    }

    #[test]
    fn test_register_then_check_reports_voted() {
        let registry = registry();
        registry.register_vote("supermercados");
        assert!(registry.has_voted("supermercados"));
    }

    #[test]
    fn test_window_expires_after_twelve_hours() {
        let registry = registry();
        let t0 = 1_700_000_000_000u64;
        registry.register_vote_at("farmacias", t0);

        assert!(registry.has_voted_at("farmacias", t0 + VOTE_COOLDOWN_MS - 1));
        assert!(!registry.has_voted_at("farmacias", t0 + VOTE_COOLDOWN_MS));
        assert!(!registry.has_voted_at("farmacias", t0 + VOTE_COOLDOWN_MS + 1));
    }

    #[test]
    fn test_targets_are_independent() {
        let registry = registry();
        registry.register_vote("supermercados");
        assert!(!registry.has_voted("farmacias"));
    }

    #[test]
    fn test_unparsable_record_reads_as_not_voted() {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .write("opina_last_review_bancos", "not-a-timestamp")
            .unwrap();

        let registry = VoteRegistry::new(backend);
        assert!(!registry.has_voted("bancos"));
    }
}
