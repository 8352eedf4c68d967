use serde::{Deserialize, Serialize};

/// A single human-readable activity entry shown in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: String,
    pub user: String,
    /// e.g. "votó en"
    pub action: String,
    /// e.g. "Supermercados"
    pub target: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Caller-supplied fields for a new feed entry; id and timestamp are
/// synthesized by the store.
#[derive(Debug, Clone)]
pub struct NewFeedItem {
    pub user: String,
    pub action: String,
    pub target: String,
    pub avatar: Option<String>,
}
