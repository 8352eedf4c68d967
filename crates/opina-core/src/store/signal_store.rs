use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::constants::{SIGNAL_EVENT_CAP, SIGNAL_STATE_KEY};
use crate::models::{
    normalize_signal_events, DailyMission, SignalEvent, SignalEventDetail, SignalState,
};
use crate::store::backend::StorageBackend;

/// Gamified signal counters: lifetime/daily totals, day streak, the daily
/// mission, and a bounded event log.
///
/// Day-keyed rules: a new calendar day resets the daily counter and the
/// mission; activity on consecutive days grows the streak, a gap resets it
/// to 1. The lifetime total never goes below zero.
#[derive(Clone)]
pub struct SignalStore {
    backend: Arc<dyn StorageBackend>,
}

fn today_string() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

fn previous_day(day: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
    let prev = date.checked_sub_days(Days::new(1))?;
    Some(prev.format("%Y-%m-%d").to_string())
}

impl SignalStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn load(&self) -> SignalState {
        self.load_on(&today_string())
    }

    /// Date-explicit twin of [`SignalStore::load`]. Missing or unreadable
    /// state yields the initial state for `today`.
    pub fn load_on(&self, today: &str) -> SignalState {
        let stored = self
            .backend
            .read(SIGNAL_STATE_KEY)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str::<SignalState>(&raw).ok());

        match stored {
            Some(mut state) => {
                state.signal_events = normalize_signal_events(std::mem::take(&mut state.signal_events));
                state
            }
            None => SignalState::initial(today),
        }
    }

    fn persist(&self, state: &SignalState) {
        match serde_json::to_string(state) {
            Ok(json) => {
                if let Err(err) = self.backend.write(SIGNAL_STATE_KEY, &json) {
                    warn!("signal store write failed: {err}");
                }
            }
            Err(err) => warn!("signal store serialize failed: {err}"),
        }
    }

    pub fn add_signal(&self, amount: i64, detail: Option<SignalEventDetail>) -> SignalState {
        self.add_signal_on(&today_string(), &now_iso(), amount, detail)
    }

    /// Date/time-explicit twin of [`SignalStore::add_signal`].
    pub fn add_signal_on(
        &self,
        today: &str,
        now_iso: &str,
        amount: i64,
        detail: Option<SignalEventDetail>,
    ) -> SignalState {
        let mut state = self.load_on(today);

        // Day rollover.
        if state.last_signal_date != today {
            state.signals_today = 0;
            let yesterday = previous_day(today);
            state.streak_days = if yesterday.as_deref() == Some(state.last_signal_date.as_str()) {
                state.streak_days + 1
            } else {
                1
            };
            state.last_signal_date = today.to_string();
        } else if state.streak_days == 0 {
            state.streak_days = 1;
        }

        state.signals_today += amount;

        // Mission rollover and progress.
        if state.daily_mission.date != today {
            state.daily_mission = DailyMission::fresh(today);
        }
        state.daily_mission.count += amount;
        if state.daily_mission.count >= i64::from(state.daily_mission.goal)
            && !state.daily_mission.completed
        {
            state.daily_mission.completed = true;
        }

        state.signals = (state.signals + amount).max(0);

        if let Some(detail) = detail {
            let event = SignalEvent {
                id: format!("evt-{}", Uuid::new_v4()),
                created_at: now_iso.to_string(),
                source_type: detail.source_type,
                source_id: detail.source_id,
                title: detail.title,
                choice_label: detail.choice_label,
                trend_id: detail.trend_id,
                kind: None,
                amount: Some(amount),
            };
            state.signal_events.insert(0, event);
            state.signal_events.truncate(SIGNAL_EVENT_CAP);
            // The log is normalized on write as well as on read.
            state.signal_events = normalize_signal_events(std::mem::take(&mut state.signal_events));
        }

        self.persist(&state);
        state
    }

    pub fn complete_onboarding(&self) -> SignalState {
        let mut state = self.load();
        state.onboarding_done = true;
        self.persist(&state);
        state
    }

    /// Only a completed mission can be celebrated, and only once.
    pub fn mark_mission_celebrated(&self) -> SignalState {
        let mut state = self.load();
        if state.daily_mission.completed && !state.daily_mission.celebrated {
            state.daily_mission.celebrated = true;
            self.persist(&state);
        }
        state
    }
}
