//! Recently accepted completions.

use std::collections::VecDeque;

/// Bounded list of accepted labels, most recent first. Owned by the caller
/// and passed to each completion request; the engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecencyTracker {
    capacity: usize,
    entries: VecDeque<String>,
}

impl RecencyTracker {
    pub fn new(capacity: usize) -> Self {
        RecencyTracker {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Record an accepted label. An existing entry moves to the front; the
    /// oldest entry is dropped when full.
    pub fn record(&mut self, label: &str) {
        if self.capacity == 0 || label.is_empty() {
            return;
        }
        if let Some(index) = self.entries.iter().position(|entry| entry == label) {
            self.entries.remove(index);
        }
        self.entries.push_front(label.to_string());
        self.entries.truncate(self.capacity);
    }

    /// 0 for the most recent label, `None` for labels never recorded.
    pub fn rank(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "tests/recency_tests.rs"]
mod recency_tests;
