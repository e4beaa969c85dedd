//! Cache Entry Module
//!
//! Defines the record stored for each key: its value plus the expiration and
//! priority metadata that drive eviction.

use serde::Serialize;

/// Absolute point in time, in milliseconds since the Unix epoch.
pub type Timestamp = i64;

// == Cache Entry ==
/// A single cached record.
///
/// Entries are never edited in place. Overwriting a key retires the old entry
/// and stores a freshly built one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Unique key
    pub key: String,
    /// The stored value
    pub value: String,
    /// Absolute expiration time (Unix milliseconds)
    pub expires_at: Timestamp,
    /// Lower priorities are evicted sooner
    pub priority: i64,
}

impl Entry {
    // == Constructor ==
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        expires_at: Timestamp,
        priority: i64,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            expires_at,
            priority,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired only when its expiration time is
    /// strictly before `now`. An entry expiring exactly at `now` is still live.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at < now
    }
}
