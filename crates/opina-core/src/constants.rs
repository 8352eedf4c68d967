//! Application-wide constants
//!
//! Centralized location for storage keys and tuning values that are used
//! across multiple modules.

// Storage keys. Versioned so a schema change can abandon old blobs in place.
pub const FEED_STATE_KEY: &str = "opina_feed_state_v1";
pub const TREND_STATE_KEY: &str = "opina_trend_state_v1";
pub const SIGNAL_STATE_KEY: &str = "opina_signal_state_v1";
pub const SIGNUP_COOLDOWN_KEY: &str = "opina_signup_cooldown_v1";
pub const DEMO_METRICS_KEY: &str = "opina_demo_metrics_v1";

/// Prefix for per-target vote records; the target id is appended.
pub const LAST_REVIEW_KEY_PREFIX: &str = "opina_last_review_";

/// Maximum number of feed entries retained (newest first).
pub const FEED_CAP: usize = 50;

/// Maximum number of signal events retained in the gamification log.
pub const SIGNAL_EVENT_CAP: usize = 50;

/// Display timestamp stamped on freshly added feed entries.
pub const FEED_RECENT_LABEL: &str = "Hace un momento";

/// Fixed 24h-delta step applied to a trend on a positive bump.
pub const TREND_DELTA_STEP: f64 = 0.1;

/// Default number of entries returned by the top-trends projection.
pub const TOP_TRENDS_DEFAULT: usize = 3;

/// A second vote on the same target is rejected inside this window.
pub const VOTE_COOLDOWN_MS: u64 = 12 * 60 * 60 * 1000;

/// Default signup cooldown length in seconds.
pub const SIGNUP_COOLDOWN_SECS: u64 = 30;

/// Daily mission goal (signals per day).
pub const DAILY_MISSION_GOAL: u32 = 3;
