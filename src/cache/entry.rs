//! Cache Entry Module
//!
//! A stored lookup result together with the moment it was stored.

// == Cache Entry ==
/// Represents a single cache entry with its insertion timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion timestamp (Unix milliseconds)
    pub stored_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    pub fn new(value: V, stored_at: u64) -> Self {
        Self { value, stored_at }
    }

    // == Age ==
    /// Milliseconds since the entry was stored. A clock that moved backwards
    /// yields zero.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.stored_at)
    }

    // == Is Fresh ==
    /// Checks whether the entry may still be served.
    ///
    /// Boundary condition: an entry whose age equals the TTL is already stale,
    /// so a read exactly `ttl` after the write misses.
    pub fn is_fresh(&self, now_ms: u64, ttl_ms: u64) -> bool {
        self.age_ms(now_ms) < ttl_ms
    }
}
