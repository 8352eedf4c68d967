use serde::{Deserialize, Serialize};

/// Simulated "live" platform counters. Cosmetic only; no backend behind them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub sessions: u64,
    pub votes: u64,
    /// RFC 3339 timestamp of the most recent read.
    pub last_visit: String,
}
