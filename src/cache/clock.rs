//! Clock Module
//!
//! Time sources the cache reads when it decides which entries have expired.
//! The cache never runs timers; it asks its clock for the current time at
//! eviction time.

use std::fmt::Debug;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::cache::Timestamp;

// == Clock Trait ==
/// Source of the current time in Unix milliseconds.
pub trait Clock: Debug {
    fn now_ms(&self) -> Timestamp;
}

// == System Clock ==
/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> Timestamp {
        Utc::now().timestamp_millis()
    }
}

// == Manual Clock ==
/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can hand one clone to the
/// cache and keep another to advance it.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start)),
        }
    }

    /// Jumps to an absolute time.
    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(duration_ms(by), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}

// == Utility Functions ==
/// Returns the absolute timestamp `ttl` from now on `clock`.
pub fn expires_in<C: Clock + ?Sized>(clock: &C, ttl: Duration) -> Timestamp {
    clock.now_ms().saturating_add(duration_ms(ttl))
}

fn duration_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
