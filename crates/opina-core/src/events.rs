use std::sync::mpsc::{channel, Receiver, Sender};

use parking_lot::Mutex;

/// Change signal broadcast by store mutators. Carries no payload; receivers
/// reload the store they care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    FeedUpdated,
    TrendsUpdated,
}

/// Explicitly owned subscriber list for store change signals.
///
/// Mutators publish after a successful persist; each live subscriber gets a
/// copy of the event on its own channel. Subscribers that dropped their
/// receiver are pruned on the next publish, so dropping a view is enough to
/// release its subscription.
#[derive(Default)]
pub struct ChangeBus {
    subscribers: Mutex<Vec<Sender<StoreEvent>>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        let (tx, rx) = channel();
        self.subscribers.lock().push(tx);
        rx
    }

    pub fn publish(&self, event: StoreEvent) {
        self.subscribers
            .lock()
            .retain(|tx| tx.send(event).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}
