//! Cache Store Module
//!
//! Bounded TTL cache: HashMap storage, insertion-order eviction and
//! read-time expiry against an injected clock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, Clock, InsertionOrder, SystemClock};

// == Cache Store ==
/// Lookup result cache with a fixed capacity and time-to-live.
///
/// Operations never fail. Callers share one instance behind an
/// `Arc<RwLock<_>>`; concurrent misses on the same key may both `put`, and
/// the later write wins.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Eviction order
    order: InsertionOrder,
    stats: CacheStats,
    /// Maximum number of entries kept after a `put`
    max_entries: usize,
    ttl_ms: u64,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a store backed by the wall clock.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self::with_clock(max_entries, ttl, Arc::new(SystemClock))
    }

    /// Creates a store reading time from `clock`.
    pub fn with_clock(max_entries: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl_ms: u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
            clock,
        }
    }

    // == Put ==
    /// Stores a value, replacing any previous value and resetting its age.
    ///
    /// A replaced key keeps its original eviction position. If the store now
    /// holds more than `max_entries` keys, the earliest inserted one is
    /// evicted, regardless of how often it was read.
    pub fn put(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let now = self.clock.now_ms();

        self.order.record(&key);
        self.entries.insert(key, CacheEntry::new(value, now));

        if self.entries.len() > self.max_entries {
            if let Some(oldest) = self.order.pop_oldest() {
                self.entries.remove(&oldest);
                self.stats.record_eviction();
            }
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the value if present and younger than the TTL.
    ///
    /// A stale entry is reported as absent but left in place; the sweep task
    /// or a later `put` reclaims it.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(now, self.ttl_ms) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            Some(_) => {
                self.stats.record_expired();
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Purge Expired ==
    /// Removes all stale entries and returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let ttl_ms = self.ttl_ms;

        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_fresh(now, ttl_ms))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.order.remove(key);
        }

        self.stats.set_total_entries(self.entries.len());
        expired_keys.len()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Whether `key` is held, fresh or not.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }
}
