//! Cache Statistics Module
//!
//! Tracks cache activity: lookups, inserts, and evictions by cause.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache activity counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of lookups that found a live entry
    pub hits: u64,
    /// Number of lookups that found nothing
    pub misses: u64,
    /// Number of inserts (fresh keys and replacements)
    pub inserts: u64,
    /// Number of inserts that retired an existing entry for the same key
    pub replacements: u64,
    /// Number of entries retired because they had expired
    pub expired_evictions: u64,
    /// Number of entries retired by the priority/recency pass
    pub priority_evictions: u64,
    /// Current number of live entries
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total entries evicted for any reason.
    pub fn evictions(&self) -> u64 {
        self.expired_evictions + self.priority_evictions
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Records an insert; `replaced` marks a key collision.
    pub fn record_insert(&mut self, replaced: bool) {
        self.inserts += 1;
        if replaced {
            self.replacements += 1;
        }
    }

    pub fn record_expired_eviction(&mut self) {
        self.expired_evictions += 1;
    }

    pub fn record_priority_eviction(&mut self) {
        self.priority_evictions += 1;
    }

    // == Update Entry Count ==
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
