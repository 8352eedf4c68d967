use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::SIGNUP_COOLDOWN_KEY;
use crate::store::backend::StorageBackend;
use crate::store::now_ms;

/// Persisted gate state: absolute expiry in epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CooldownState {
    until: u64,
}

/// Single global gate rate-limiting signup attempts from one device.
#[derive(Clone)]
pub struct SignupCooldown {
    backend: Arc<dyn StorageBackend>,
}

impl SignupCooldown {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    fn read(&self) -> Option<CooldownState> {
        let raw = self.backend.read(SIGNUP_COOLDOWN_KEY).ok()??;
        serde_json::from_str(&raw).ok()
    }

    /// Arm the gate for `seconds` from now
    /// ([`crate::constants::SIGNUP_COOLDOWN_SECS`] is the conventional
    /// duration).
    pub fn start(&self, seconds: u64) {
        self.start_at(seconds, now_ms());
    }

    pub fn start_at(&self, seconds: u64, now_ms: u64) {
        let state = CooldownState {
            until: now_ms + seconds * 1000,
        };
        match serde_json::to_string(&state) {
            Ok(json) => {
                if let Err(err) = self.backend.write(SIGNUP_COOLDOWN_KEY, &json) {
                    warn!("signup cooldown write failed: {err}");
                }
            }
            Err(err) => warn!("signup cooldown serialize failed: {err}"),
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(now_ms())
    }

    pub fn is_active_at(&self, now_ms: u64) -> bool {
        self.read().is_some_and(|st| now_ms < st.until)
    }

    /// Remaining whole seconds, rounded up; 0 once expired or cleared.
    pub fn seconds_left(&self) -> u64 {
        self.seconds_left_at(now_ms())
    }

    pub fn seconds_left_at(&self, now_ms: u64) -> u64 {
        match self.read() {
            Some(st) if st.until > now_ms => (st.until - now_ms).div_ceil(1000),
            _ => 0,
        }
    }

    pub fn clear(&self) {
        if let Err(err) = self.backend.remove(SIGNUP_COOLDOWN_KEY) {
            warn!("signup cooldown clear failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SIGNUP_COOLDOWN_SECS;
    use crate::store::backend::MemoryBackend;

    fn cooldown() -> SignupCooldown {
        SignupCooldown::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn test_inactive_before_start() {
        let cd = cooldown();
        assert!(!cd.is_active());
        assert_eq!(cd.seconds_left(), 0);
    }

    #[test]
    fn test_start_arms_the_gate() {
        let cd = cooldown();
        let t0 = 1_700_000_000_000u64;
        cd.start_at(SIGNUP_COOLDOWN_SECS, t0);

        assert!(cd.is_active_at(t0));
        let left = cd.seconds_left_at(t0);
        assert!(left > 0 && left <= SIGNUP_COOLDOWN_SECS);
    }

    #[test]
    fn test_seconds_left_rounds_up() {
        let cd = cooldown();
        let t0 = 1_700_000_000_000u64;
        cd.start_at(30, t0);

        // 29.5s remaining reads as 30 whole seconds.
        assert_eq!(cd.seconds_left_at(t0 + 500), 30);
        assert_eq!(cd.seconds_left_at(t0 + 29_000), 1);
    }

    #[test]
    fn test_expires_exactly_at_until() {
        let cd = cooldown();
        let t0 = 1_700_000_000_000u64;
        cd.start_at(30, t0);

        assert!(cd.is_active_at(t0 + 29_999));
        assert!(!cd.is_active_at(t0 + 30_000));
        assert_eq!(cd.seconds_left_at(t0 + 30_000), 0);
    }

    #[test]
    fn test_clear_disarms() {
        let cd = cooldown();
        let t0 = 1_700_000_000_000u64;
        cd.start_at(30, t0);
        cd.clear();

        assert!(!cd.is_active_at(t0));
        assert_eq!(cd.seconds_left_at(t0), 0);
    }

    #[test]
    fn test_corrupt_state_reads_as_inactive() {
        let backend = Arc::new(MemoryBackend::new());
        backend.write(SIGNUP_COOLDOWN_KEY, "garbage").unwrap();

        let cd = SignupCooldown::new(backend);
        assert!(!cd.is_active());
        assert_eq!(cd.seconds_left(), 0);
    }
}
