//! Insertion Order Module
//!
//! Remembers the order in which keys entered the cache so the oldest one can
//! be evicted. Reads never reorder keys.

use std::collections::VecDeque;

// == Insertion Order ==
/// Tracks key insertion order for FIFO eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Earliest inserted
/// - Back = Most recently inserted
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: VecDeque<String>,
}

impl InsertionOrder {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record ==
    /// Appends a newly inserted key.
    ///
    /// Keys already tracked keep their position, so overwriting a value does
    /// not make it younger.
    pub fn record(&mut self, key: &str) {
        if !self.contains(key) {
            self.order.push_back(key.to_string());
        }
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Pop Oldest ==
    /// Returns and removes the earliest inserted key.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_new() {
        let order = InsertionOrder::new();
        assert!(order.is_empty());
        assert_eq!(order.len(), 0);
    }

    #[test]
    fn test_record_keeps_insertion_order() {
        let mut order = InsertionOrder::new();

        order.record("key1");
        order.record("key2");
        order.record("key3");

        assert_eq!(order.len(), 3);
        assert_eq!(order.pop_oldest(), Some("key1".to_string()));
    }

    #[test]
    fn test_record_existing_key_keeps_position() {
        let mut order = InsertionOrder::new();

        order.record("key1");
        order.record("key2");
        order.record("key1");

        assert_eq!(order.len(), 2);
        assert_eq!(order.pop_oldest(), Some("key1".to_string()));
        assert_eq!(order.pop_oldest(), Some("key2".to_string()));
    }

    #[test]
    fn test_pop_oldest_empty() {
        let mut order = InsertionOrder::new();
        assert_eq!(order.pop_oldest(), None);
    }

    #[test]
    fn test_remove() {
        let mut order = InsertionOrder::new();

        order.record("a");
        order.record("b");
        order.record("c");
        order.remove("b");
        order.remove("missing");

        assert_eq!(order.len(), 2);
        assert!(!order.contains("b"));
        assert_eq!(order.pop_oldest(), Some("a".to_string()));
        assert_eq!(order.pop_oldest(), Some("c".to_string()));
    }

    #[test]
    fn test_removed_key_reinserted_goes_to_back() {
        let mut order = InsertionOrder::new();

        order.record("a");
        order.record("b");
        order.remove("a");
        order.record("a");

        assert_eq!(order.pop_oldest(), Some("b".to_string()));
        assert_eq!(order.pop_oldest(), Some("a".to_string()));
    }
}
