//! Cross-process change notification.
//!
//! A second deployment context for the change bus: when several processes
//! share one `FileBackend` directory, each runs a `StorageWatcher` that
//! turns foreign writes into local bus events. The watcher also sees the
//! process's own writes; the resulting extra reload is harmless under the
//! last-write-wins model.

use std::path::Path;
use std::sync::Arc;

use notify::{recommended_watcher, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use crate::constants::{FEED_STATE_KEY, TREND_STATE_KEY};
use crate::events::{ChangeBus, StoreEvent};

pub struct StorageWatcher {
    // Held for its lifetime; dropping it stops the watch.
    _watcher: RecommendedWatcher,
}

/// Map a changed file back to the store that owns it. Temp files from the
/// atomic write path have a `.tmp` suffix and never match.
fn classify(path: &Path) -> Option<StoreEvent> {
    let stem = path.file_stem()?.to_str()?;
    if path.extension()?.to_str()? != "json" {
        return None;
    }
    match stem {
        s if s == FEED_STATE_KEY => Some(StoreEvent::FeedUpdated),
        s if s == TREND_STATE_KEY => Some(StoreEvent::TrendsUpdated),
        _ => None,
    }
}

impl StorageWatcher {
    /// Watch `data_dir` and republish foreign writes onto `bus`.
    pub fn spawn(data_dir: &Path, bus: Arc<ChangeBus>) -> notify::Result<Self> {
        let mut watcher = recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                for path in &event.paths {
                    if let Some(store_event) = classify(path) {
                        debug!("storage watcher: {store_event:?} from {}", path.display());
                        bus.publish(store_event);
                    }
                }
            }
            Err(err) => warn!("storage watcher error: {err}"),
        })?;
        watcher.watch(data_dir, RecursiveMode::NonRecursive)?;
        Ok(Self { _watcher: watcher })
    }
}
