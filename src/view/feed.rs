//! Per-connection publish point for scroll samples.
//!
//! The live connection publishes every `scroll` frame it receives into its
//! [`ScrollFeed`]. A view that wants those samples holds a
//! [`ScrollSubscription`]; dropping the subscription unregisters it, and
//! samples published while nobody is subscribed are discarded.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam::channel::{Receiver, Sender, unbounded};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::tracker::HeadingOffset;

type Subscribers = Mutex<FxHashMap<u64, Sender<Vec<HeadingOffset>>>>;

#[derive(Debug, Default)]
pub struct ScrollFeed {
    subscribers: Arc<Subscribers>,
    next_id: AtomicU64,
}

impl ScrollFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> ScrollSubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = unbounded();
        self.subscribers.lock().insert(id, tx);
        ScrollSubscription {
            id,
            rx,
            subscribers: Arc::clone(&self.subscribers),
        }
    }

    /// Deliver a sample to every live subscription.
    ///
    /// Returns how many subscriptions received it (0 means it was discarded).
    pub fn publish(&self, sample: &[HeadingOffset]) -> usize {
        let subscribers = self.subscribers.lock();
        subscribers
            .values()
            .filter(|tx| tx.send(sample.to_vec()).is_ok())
            .count()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

/// A live registration on a [`ScrollFeed`].
#[derive(Debug)]
pub struct ScrollSubscription {
    id: u64,
    rx: Receiver<Vec<HeadingOffset>>,
    subscribers: Arc<Subscribers>,
}

impl ScrollSubscription {
    /// Most recent pending sample, discarding older ones.
    pub fn latest(&self) -> Option<Vec<HeadingOffset>> {
        self.rx.try_iter().last()
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        self.subscribers.lock().remove(&self.id);
    }
}
