//! Cache Module
//!
//! Provides a bounded in-memory cache with expiry, priority and LRU eviction.

mod clock;
mod entry;
mod ordered;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use clock::{expires_in, Clock, ManualClock, SystemClock};
pub use entry::{Entry, Timestamp};
pub use stats::CacheStats;
pub use store::EvictionCache;
