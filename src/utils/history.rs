//! Bounded first-seen tracking of packet identifiers.
//!
//! The duplicate filter needs to remember which identifiers it has seen,
//! but an append-only set grows for the life of the process. This
//! history caps its size instead: when full, the oldest identifier is
//! evicted in FIFO order, in O(1) via an insertion-order queue.
//!
//! Eviction means a sufficiently old identifier can be reported as
//! first-seen again. That is acceptable here: duplicate suppression is
//! advisory, and redundant retransmissions of one event arrive within
//! seconds of each other, not thousands of packets apart.

use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Fixed-capacity set of seen packet identifiers with FIFO eviction.
#[derive(Debug)]
pub struct IdentifierHistory {
    seen: HashSet<u16>,
    insertion_order: VecDeque<u16>,
    capacity: usize,
}

impl IdentifierHistory {
    /// History remembering up to `capacity` identifiers. A capacity of
    /// zero is clamped to one; a filter that remembers nothing would
    /// forward every duplicate.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            seen: HashSet::with_capacity(capacity),
            insertion_order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record `identifier`, returning whether it is first-seen.
    ///
    /// Checking and recording are one step so a caller never has to hold
    /// state between a lookup and an insert.
    pub fn insert(&mut self, identifier: u16) -> bool {
        if self.seen.contains(&identifier) {
            return false;
        }

        if self.seen.len() >= self.capacity {
            if let Some(oldest) = self.insertion_order.pop_front() {
                self.seen.remove(&oldest);
                debug!(identifier = oldest, "evicted oldest identifier from history");
            }
        }

        self.seen.insert(identifier);
        self.insertion_order.push_back(identifier);
        true
    }

    /// Whether `identifier` is currently tracked.
    pub fn contains(&self, identifier: u16) -> bool {
        self.seen.contains(&identifier)
    }

    /// Number of identifiers currently tracked.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether no identifier is tracked yet.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Maximum number of identifiers tracked at once.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insert_wins() {
        let mut history = IdentifierHistory::new(16);

        assert!(history.insert(42));
        assert!(!history.insert(42));
        assert!(!history.insert(42));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn distinct_identifiers_are_independent() {
        let mut history = IdentifierHistory::new(16);

        assert!(history.insert(1));
        assert!(history.insert(2));
        assert!(!history.insert(1));
        assert!(!history.insert(2));
    }

    #[test]
    fn evicts_oldest_at_capacity() {
        let mut history = IdentifierHistory::new(3);

        for identifier in 0..3 {
            assert!(history.insert(identifier));
        }
        assert!(history.insert(3));

        assert_eq!(history.len(), 3);
        assert!(!history.contains(0));
        assert!(history.contains(1));
        assert!(history.contains(3));

        // The evicted identifier counts as first-seen again.
        assert!(history.insert(0));
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut history = IdentifierHistory::new(0);
        assert_eq!(history.capacity(), 1);
        assert!(history.insert(9));
        assert!(!history.insert(9));
    }
}
