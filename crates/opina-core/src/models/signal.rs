use serde::{Deserialize, Serialize};

use crate::constants::DAILY_MISSION_GOAL;

/// Where a signal event came from.
///
/// `Battle` survives only so old persisted logs still deserialize; the
/// system writes `Versus` from here on. See [`normalize_signal_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalSource {
    Versus,
    Review,
    Battle,
}

/// One logged signal: a unit of user-submitted opinion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalEvent {
    pub id: String,
    /// RFC 3339 timestamp.
    pub created_at: String,
    pub source_type: SignalSource,
    /// Identifier of the content the signal targets (versus id, review id).
    pub source_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_id: Option<String>,
    // Legacy fields kept for old persisted logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

/// Caller-supplied fields for a new signal event; id and timestamp are
/// synthesized by the store.
#[derive(Debug, Clone)]
pub struct SignalEventDetail {
    pub source_type: SignalSource,
    pub source_id: String,
    pub title: String,
    pub choice_label: Option<String>,
    pub trend_id: Option<String>,
}

/// Rewrite the legacy `battle` source type to `versus`.
pub fn normalize_signal_event(mut event: SignalEvent) -> SignalEvent {
    if event.source_type == SignalSource::Battle {
        event.source_type = SignalSource::Versus;
    }
    event
}

pub fn normalize_signal_events(events: Vec<SignalEvent>) -> Vec<SignalEvent> {
    events.into_iter().map(normalize_signal_event).collect()
}

/// Per-day participation mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMission {
    /// YYYY-MM-DD day this mission belongs to.
    pub date: String,
    pub count: i64,
    pub goal: u32,
    pub completed: bool,
    pub celebrated: bool,
}

impl DailyMission {
    pub fn fresh(date: &str) -> Self {
        Self {
            date: date.to_string(),
            count: 0,
            goal: DAILY_MISSION_GOAL,
            completed: false,
            celebrated: false,
        }
    }
}

/// Persisted gamification state: running counters, streak, daily mission,
/// and the bounded signal event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalState {
    pub signals: i64,
    pub signals_today: i64,
    /// YYYY-MM-DD of the last day a signal was recorded.
    pub last_signal_date: String,
    pub streak_days: u32,
    pub onboarding_done: bool,
    pub daily_mission: DailyMission,
    #[serde(default)]
    pub signal_events: Vec<SignalEvent>,
}

impl SignalState {
    pub fn initial(today: &str) -> Self {
        Self {
            signals: 0,
            signals_today: 0,
            last_signal_date: today.to_string(),
            streak_days: 0,
            onboarding_done: false,
            daily_mission: DailyMission::fresh(today),
            signal_events: Vec::new(),
        }
    }
}
