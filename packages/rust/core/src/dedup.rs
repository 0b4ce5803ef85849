//! Bounded memory of already-handled event identifiers.
//!
//! Webhook senders retry deliveries, so the same event id can arrive more
//! than once. [`SeenEvents`] remembers the most recent ids in insertion order
//! and forgets the oldest once it holds more than its capacity.

use std::collections::{HashSet, VecDeque};

/// Insertion-ordered, capacity-bounded set of event ids.
#[derive(Debug, Clone)]
pub struct SeenEvents {
    capacity: usize,
    order: VecDeque<String>,
    members: HashSet<String>,
}

impl SeenEvents {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
        }
    }

    /// Record `id`. Returns `false` if it was already present.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.members.contains(id) {
            return false;
        }

        self.order.push_back(id.to_string());
        self.members.insert(id.to_string());

        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.members.remove(&oldest);
            }
        }
        true
    }

    /// Forget `id`, e.g. after the work it guarded failed.
    pub fn remove(&mut self, id: &str) -> bool {
        if !self.members.remove(id) {
            return false;
        }
        self.order.retain(|seen| seen != id);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
