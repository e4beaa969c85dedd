//! Eviction Cache - A bounded in-memory key/value cache
//!
//! Entries carry an absolute expiration time and an integer priority. When the
//! cache is full, expired entries go first, then the lowest priority entry,
//! with ties broken by least recent use.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStats, Clock, Entry, EvictionCache, ManualClock, SystemClock, Timestamp};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
