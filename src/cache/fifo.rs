//! Insertion Order Module
//!
//! Tracks the order keys were inserted for FIFO eviction.

use std::collections::VecDeque;

// == Insertion Order ==
/// Keys in insertion order.
///
/// - Front = oldest insertion
/// - Back = newest insertion
///
/// Reads do not reorder keys; only a fresh insert moves a key to the back.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: VecDeque<String>,
}

impl InsertionOrder {
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    /// Records `key` as the newest insertion.
    pub fn push(&mut self, key: &str) {
        self.remove(key);
        self.order.push_back(key.to_string());
    }

    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    /// Removes and returns the oldest key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_in_insertion_order() {
        let mut order = InsertionOrder::new();
        order.push("count-1");
        order.push("count-2");
        order.push("count-3");

        assert_eq!(order.evict_oldest(), Some("count-1".to_string()));
        assert_eq!(order.evict_oldest(), Some("count-2".to_string()));
        assert_eq!(order.evict_oldest(), Some("count-3".to_string()));
        assert_eq!(order.evict_oldest(), None);
    }

    #[test]
    fn test_reinsert_moves_key_to_back() {
        let mut order = InsertionOrder::new();
        order.push("a");
        order.push("b");
        order.push("a");

        assert_eq!(order.evict_oldest(), Some("b".to_string()));
        assert_eq!(order.evict_oldest(), Some("a".to_string()));
        assert_eq!(order.evict_oldest(), None);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut order = InsertionOrder::new();
        order.push("a");
        order.push("b");

        order.remove("a");
        order.remove("missing");
        order.push("c");
        order.clear();
        assert_eq!(order.evict_oldest(), None);

        order.push("d");
        order.push("e");
        order.remove("d");
        assert_eq!(order.evict_oldest(), Some("e".to_string()));
    }
}
