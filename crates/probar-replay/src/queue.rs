//! Ordered queue of pending expectations.

use crate::expectation::Expectation;
use std::collections::VecDeque;

/// Expectations still waiting for their call, consumed front to back.
#[derive(Debug, Clone, Default)]
pub struct ExpectationQueue {
    remaining: VecDeque<Expectation>,
}

impl ExpectationQueue {
    /// Create an empty queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is left with a fresh copy of `expectations`
    pub fn reset(&mut self, expectations: &[Expectation]) {
        self.remaining = expectations.iter().cloned().collect();
    }

    /// Remove and return the front expectation
    pub fn pop_next(&mut self) -> Option<Expectation> {
        self.remaining.pop_front()
    }

    /// Front expectation without consuming it
    #[must_use]
    pub fn peek(&self) -> Option<&Expectation> {
        self.remaining.front()
    }

    /// Number of expectations left
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.remaining.len()
    }

    /// Check if nothing is left
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Iterate over what is left, in call order
    pub fn remaining(&self) -> impl Iterator<Item = &Expectation> {
        self.remaining.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script() -> Vec<Expectation> {
        vec![
            Expectation::new("navigate"),
            Expectation::new("find_element"),
            Expectation::new("click"),
        ]
    }

    #[test]
    fn test_new_queue_is_empty() {
        let mut queue = ExpectationQueue::new();
        assert!(queue.is_empty());
        assert!(queue.pop_next().is_none());
    }

    #[test]
    fn test_pops_in_order() {
        let mut queue = ExpectationQueue::new();
        queue.reset(&script());
        assert_eq!(queue.remaining_count(), 3);

        let ops: Vec<String> = std::iter::from_fn(|| queue.pop_next())
            .map(|e| e.operation().to_string())
            .collect();
        assert_eq!(ops, ["navigate", "find_element", "click"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_reset_discards_leftovers() {
        let mut queue = ExpectationQueue::new();
        queue.reset(&script());
        queue.pop_next();
        queue.reset(&[Expectation::new("screenshot")]);
        assert_eq!(queue.remaining_count(), 1);
        assert_eq!(queue.peek().map(Expectation::operation), Some("screenshot"));
    }

    #[test]
    fn test_reset_copies_source() {
        let source = script();
        let mut queue = ExpectationQueue::new();
        queue.reset(&source);
        queue.pop_next();
        queue.reset(&source);
        assert_eq!(queue.remaining_count(), source.len());
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut queue = ExpectationQueue::new();
        queue.reset(&script());
        assert_eq!(queue.peek().map(Expectation::operation), Some("navigate"));
        assert_eq!(queue.remaining_count(), 3);
        assert_eq!(queue.remaining().count(), 3);
    }
}
