use serde::{Deserialize, Serialize};

/// A ranked topic derived from signal volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub id: String,
    pub label: String,
    pub score: f64,
    #[serde(rename = "delta24h")]
    pub delta_24h: f64,
    pub category: String,
}

impl Trend {
    /// Ordering used everywhere a trend collection is ranked: score
    /// descending, then id ascending so equal scores stay deterministic.
    pub fn sort_ranked(trends: &mut [Trend]) {
        trends.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
    }
}
