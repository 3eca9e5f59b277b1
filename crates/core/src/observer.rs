//! Score observers
//!
//! Callbacks receive the new cumulative score, synchronously and in subscription order.

use std::fmt;

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type ScoreCallback = Box<dyn FnMut(u32)>;

#[derive(Default)]
pub struct ScoreObservers {
    next_id: u64,
    entries: Vec<(SubscriptionId, ScoreCallback)>,
}

impl ScoreObservers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(u32) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns false for an unknown or already removed id.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(idx) => {
                let (_, callback) = self.entries.remove(idx);
                drop(callback);
                true
            }
            None => false,
        }
    }

    pub fn notify(&mut self, score: u32) {
        for (_, callback) in self.entries.iter_mut() {
            callback(score);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ScoreObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreObservers")
            .field("subscribers", &self.entries.len())
            .finish()
    }
}
