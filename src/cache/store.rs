//! Cache Store Module
//!
//! Main cache engine. Entries live in an arena addressed by stable handles; a
//! key map, a recency list, a priority index and an expiration index all refer
//! to those handles and are updated together on every insert, lookup and
//! eviction.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use tracing::{debug, info, trace};

use crate::cache::ordered::OrderedIndex;
use crate::cache::recency::{Handle, RecencyList};
use crate::cache::{CacheStats, Clock, Entry, SystemClock, Timestamp};
use crate::config::CacheConfig;
use crate::error::Result;

#[derive(Debug)]
struct Slot {
    entry: Entry,
    /// Insertion sequence, orders equal keys in the sorted indexes
    seq: u64,
}

// == Eviction Cache ==
/// Bounded key/value cache with expiry, priority and LRU eviction.
///
/// When an insert finds the cache full, eviction runs in two passes:
/// 1. every entry whose expiration is strictly before the current time is
///    retired;
/// 2. of the two lowest-priority entries, the strictly lower one is retired,
///    or on a priority tie the less recently used of the two.
///
/// The second pass always runs and retires at most one entry. It only ever
/// compares the bottom two candidates, so with three or more entries tied at
/// the minimum priority the globally least recently used one may survive a
/// round.
///
/// Expired entries stay visible to `lookup` until an insert triggers eviction.
#[derive(Debug)]
pub struct EvictionCache<C: Clock = SystemClock> {
    /// Entry arena; `None` marks a free slot
    slots: Vec<Option<Slot>>,
    /// Free slots available for reuse
    free: Vec<Handle>,
    /// Key to handle lookup
    index: HashMap<String, Handle>,
    /// Access order, most recent first
    recency: RecencyList,
    /// Ascending priority
    by_priority: OrderedIndex<i64>,
    /// Ascending expiration time
    by_expiry: OrderedIndex<Timestamp>,
    stats: CacheStats,
    capacity: NonZeroUsize,
    next_seq: u64,
    clock: C,
}

impl EvictionCache<SystemClock> {
    // == Constructor ==
    /// Creates a cache that evaluates expiration against wall-clock time.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_clock(capacity, SystemClock)
    }

    /// Creates a cache from a validated configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Ok(Self::new(config.validate()?))
    }
}

impl<C: Clock> EvictionCache<C> {
    /// Creates a cache that evaluates expiration against `clock`.
    pub fn with_clock(capacity: NonZeroUsize, clock: C) -> Self {
        info!(capacity = capacity.get(), "Eviction cache created");

        Self {
            slots: Vec::with_capacity(capacity.get()),
            free: Vec::new(),
            index: HashMap::with_capacity(capacity.get()),
            recency: RecencyList::new(),
            by_priority: OrderedIndex::new(),
            by_expiry: OrderedIndex::new(),
            stats: CacheStats::new(),
            capacity,
            next_seq: 0,
            clock,
        }
    }

    // == Insert ==
    /// Stores a key/value pair with an absolute expiration time and a priority.
    ///
    /// An existing entry for the same key is retired first, so the new entry
    /// starts out as the most recently used. If the cache is then full,
    /// eviction runs before the new entry is added.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        expires_at: Timestamp,
        priority: i64,
    ) {
        let key = key.into();

        let replaced = match self.index.get(&key).copied() {
            Some(handle) => self.retire(handle).is_some(),
            None => false,
        };

        if self.index.len() >= self.capacity.get() {
            self.evict();
        }

        trace!(key = %key, expires_at, priority, replaced, "Inserting entry");
        self.register(Entry::new(key, value, expires_at, priority));

        self.stats.record_insert(replaced);
        self.stats.set_total_entries(self.index.len());
    }

    // == Lookup ==
    /// Returns a copy of the value for `key`, promoting it to most recently used.
    ///
    /// A missing key returns `None` and leaves every view untouched.
    pub fn lookup(&mut self, key: &str) -> Option<String> {
        let Some(handle) = self.index.get(key).copied() else {
            trace!(key, "Lookup miss");
            self.stats.record_miss();
            return None;
        };

        let value = self.slot(handle).map(|slot| slot.entry.value.clone());
        if value.is_some() {
            self.recency.touch(handle);
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        value
    }

    // == Introspection ==
    /// Returns a copy of the entry for `key` without changing its recency.
    pub fn peek(&self, key: &str) -> Option<Entry> {
        self.index
            .get(key)
            .and_then(|&handle| self.slot(handle))
            .map(|slot| slot.entry.clone())
    }

    /// Returns true if `key` has a live entry. Does not change recency.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns copies of all live entries, most recently used first.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.recency
            .iter()
            .filter_map(|handle| self.slot(handle))
            .map(|slot| slot.entry.clone())
            .collect()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the current number of live entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Evict ==
    /// Frees space ahead of an insert into a full cache.
    fn evict(&mut self) {
        let now = self.clock.now_ms();

        // Expiry pass: no limit on how many go at once
        while matches!(self.by_expiry.first(), Some((expires_at, _)) if expires_at < now) {
            let Some((_, handle)) = self.by_expiry.pop_first() else {
                break;
            };
            if let Some(entry) = self.retire(handle) {
                debug!(
                    key = %entry.key,
                    expires_at = entry.expires_at,
                    now,
                    "Evicted expired entry"
                );
                self.stats.record_expired_eviction();
            }
        }

        // Priority pass: bottom two candidates only, recency breaks ties
        let victim = match self.by_priority.lowest_two() {
            (Some((lowest, first)), Some((next, second))) if lowest == next => {
                self.recency.older_of(first, second)
            }
            (Some((_, first)), _) => Some(first),
            (None, _) => None,
        };

        if let Some(entry) = victim.and_then(|handle| self.retire(handle)) {
            debug!(
                key = %entry.key,
                priority = entry.priority,
                "Evicted lowest priority entry"
            );
            self.stats.record_priority_eviction();
        }
    }

    // == Register ==
    /// Adds a new entry to the arena and to every view.
    fn register(&mut self, entry: Entry) -> Handle {
        let seq = self.next_seq;
        self.next_seq += 1;

        let handle = match self.free.pop() {
            Some(handle) => handle,
            None => {
                self.slots.push(None);
                self.slots.len() - 1
            }
        };

        self.index.insert(entry.key.clone(), handle);
        self.recency.touch(handle);
        self.by_priority.insert(entry.priority, seq, handle);
        self.by_expiry.insert(entry.expires_at, seq, handle);
        self.slots[handle] = Some(Slot { entry, seq });

        handle
    }

    // == Retire ==
    /// Removes an entry from the arena and from every view.
    ///
    /// Safe to call on a handle that is already free, or that some view no
    /// longer holds; missing pieces are skipped. Returns the retired entry,
    /// or `None` if the handle was not live.
    fn retire(&mut self, handle: Handle) -> Option<Entry> {
        let slot = self.slots.get_mut(handle).and_then(Option::take)?;

        if self.index.get(&slot.entry.key) == Some(&handle) {
            self.index.remove(&slot.entry.key);
        }
        self.recency.remove(handle);
        self.by_priority.remove(slot.entry.priority, slot.seq, handle);
        self.by_expiry.remove(slot.entry.expires_at, slot.seq, handle);
        self.free.push(handle);

        Some(slot.entry)
    }

    fn slot(&self, handle: Handle) -> Option<&Slot> {
        self.slots.get(handle).and_then(Option::as_ref)
    }

    /// Asserts that all views agree on the set of live entries.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let live: Vec<Handle> = (0..self.slots.len())
            .filter(|&handle| self.slot(handle).is_some())
            .collect();

        assert!(self.len() <= self.capacity(), "capacity exceeded");
        assert_eq!(self.index.len(), live.len(), "index size");
        assert_eq!(self.recency.len(), live.len(), "recency size");
        assert_eq!(self.by_priority.len(), live.len(), "priority size");
        assert_eq!(self.by_expiry.len(), live.len(), "expiry size");
        assert_eq!(self.free.len() + live.len(), self.slots.len(), "free list");

        for (handle, slot) in self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(handle, slot)| slot.as_ref().map(|slot| (handle, slot)))
        {
            let key = &slot.entry.key;
            assert_eq!(self.index.get(key), Some(&handle), "index for {key}");
            assert!(self.recency.contains(handle), "recency for {key}");
            assert!(self.by_priority.contains(handle), "priority for {key}");
            assert!(self.by_expiry.contains(handle), "expiry for {key}");
        }
    }
}
