//! Ordered Index Module
//!
//! Sorted views over arena handles. The cache keeps one ordered by priority
//! and one ordered by expiration time.

use std::collections::BTreeSet;

use crate::cache::recency::Handle;

// == Ordered Index ==
/// A set of handles sorted by a sort key, then by insertion sequence.
///
/// The sequence number makes ordering among equal sort keys deterministic:
/// the earlier inserted entry sorts first.
#[derive(Debug)]
pub struct OrderedIndex<K: Ord + Copy> {
    items: BTreeSet<(K, u64, Handle)>,
}

impl<K: Ord + Copy> Default for OrderedIndex<K> {
    fn default() -> Self {
        Self {
            items: BTreeSet::new(),
        }
    }
}

impl<K: Ord + Copy> OrderedIndex<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, seq: u64, handle: Handle) {
        self.items.insert((key, seq, handle));
    }

    /// Removes an item. Returns false if it was not present.
    pub fn remove(&mut self, key: K, seq: u64, handle: Handle) -> bool {
        self.items.remove(&(key, seq, handle))
    }

    /// Returns the smallest item.
    pub fn first(&self) -> Option<(K, Handle)> {
        self.items.first().map(|&(key, _, handle)| (key, handle))
    }

    /// Removes and returns the smallest item.
    pub fn pop_first(&mut self) -> Option<(K, Handle)> {
        self.items.pop_first().map(|(key, _, handle)| (key, handle))
    }

    /// Returns the two smallest items, smallest first.
    pub fn lowest_two(&self) -> (Option<(K, Handle)>, Option<(K, Handle)>) {
        let mut iter = self.items.iter().map(|&(key, _, handle)| (key, handle));
        (iter.next(), iter.next())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[allow(dead_code)]
    pub fn contains(&self, handle: Handle) -> bool {
        self.items.iter().any(|&(_, _, h)| h == handle)
    }
}
