//! Insertion-ordered queue with removal by handle.
//!
//! `push_back` hands out a [`QueueHandle`] that can later remove that exact
//! element in O(1), wherever it sits. Removing a handle whose element is
//! already gone (popped, or removed before) returns `None` and leaves the
//! queue untouched.

use std::collections::{HashMap, VecDeque};

/// Names one element pushed into a [`HandleQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueueHandle(u64);

#[derive(Debug)]
pub struct HandleQueue<T> {
    /// Sequence numbers in insertion order. May hold numbers whose entry has
    /// already been removed; `pop_front` skips those.
    order: VecDeque<u64>,
    entries: HashMap<u64, T>,
    next_seq: u64,
}

impl<T> Default for HandleQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HandleQueue<T> {
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
            entries: HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn push_back(&mut self, value: T) -> QueueHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.push_back(seq);
        self.entries.insert(seq, value);
        QueueHandle(seq)
    }

    /// Removes and returns the oldest live element.
    pub fn pop_front(&mut self) -> Option<T> {
        while let Some(seq) = self.order.pop_front() {
            if let Some(value) = self.entries.remove(&seq) {
                return Some(value);
            }
        }
        None
    }

    /// Removes the element behind `handle`, if it is still queued.
    pub fn remove(&mut self, handle: QueueHandle) -> Option<T> {
        let removed = self.entries.remove(&handle.0);
        if removed.is_some() {
            self.compact();
        }
        removed
    }

    #[cfg(test)]
    pub fn contains(&self, handle: QueueHandle) -> bool {
        self.entries.contains_key(&handle.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }

    // Drop stale sequence numbers once they outnumber live entries.
    fn compact(&mut self) {
        if self.order.len() > 2 * self.entries.len() + 32 {
            let entries = &self.entries;
            self.order.retain(|seq| entries.contains_key(seq));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_insertion_order() {
        let mut queue = HandleQueue::new();
        for value in ["a", "b", "c"] {
            queue.push_back(value);
        }
        assert_eq!(queue.pop_front(), Some("a"));
        assert_eq!(queue.pop_front(), Some("b"));
        assert_eq!(queue.pop_front(), Some("c"));
        assert_eq!(queue.pop_front(), None);
    }

    #[test]
    fn removes_from_the_middle() {
        let mut queue = HandleQueue::new();
        queue.push_back(1);
        let middle = queue.push_back(2);
        queue.push_back(3);

        assert_eq!(queue.remove(middle), Some(2));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop_front(), Some(1));
        assert_eq!(queue.pop_front(), Some(3));
    }

    #[test]
    fn removing_a_popped_handle_is_a_no_op() {
        let mut queue = HandleQueue::new();
        let first = queue.push_back("first");
        let second = queue.push_back("second");

        assert_eq!(queue.pop_front(), Some("first"));
        assert_eq!(queue.remove(first), None);
        assert!(queue.contains(second));
        assert_eq!(queue.len(), 1);

        let third = queue.push_back("third");
        assert_eq!(queue.pop_front(), Some("second"));
        assert_eq!(queue.pop_front(), Some("third"));
        assert_eq!(queue.remove(third), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn removing_twice_is_a_no_op() {
        let mut queue = HandleQueue::new();
        let handle = queue.push_back(10);
        queue.push_back(20);

        assert_eq!(queue.remove(handle), Some(10));
        assert_eq!(queue.remove(handle), None);
        assert_eq!(queue.pop_front(), Some(20));
        assert!(queue.is_empty());
    }

    #[test]
    fn stale_sequence_numbers_are_compacted() {
        let mut queue = HandleQueue::new();
        let keep = queue.push_back(usize::MAX);
        for value in 0..1_000 {
            let handle = queue.push_back(value);
            queue.remove(handle);
        }
        assert!(queue.order.len() <= 2 * queue.entries.len() + 33);
        assert!(queue.contains(keep));
        assert_eq!(queue.pop_front(), Some(usize::MAX));
    }

    #[test]
    fn handles_from_before_clear_stay_dead() {
        let mut queue = HandleQueue::new();
        let old = queue.push_back('x');
        queue.clear();
        queue.push_back('y');
        assert_eq!(queue.remove(old), None);
        assert_eq!(queue.pop_front(), Some('y'));
    }
}
