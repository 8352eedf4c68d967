pub mod feed;
pub mod metrics;
pub mod profile;
pub mod signal;
pub mod trend;

pub use feed::{FeedItem, NewFeedItem};
pub use metrics::Metrics;
pub use profile::{is_profile_complete, AgeField, MinimalProfile};
pub use signal::{
    normalize_signal_event, normalize_signal_events, DailyMission, SignalEvent, SignalEventDetail,
    SignalSource, SignalState,
};
pub use trend::Trend;
