//! Replay buffer
//!
//! Items produced since the active mark, followed by any items still
//! waiting to be replayed after a reset. Storage is a `VecDeque` so both
//! tail appends and head trims are O(1); the replay cursor is a plain
//! index into it.
//!
//! ```text
//!   head                      cursor                 tail
//!    |  visited (replayed)     |  pending replay      |
//!    [ a  b  c                 | d  e  f              ]
//! ```
//!
//! Trimming drops everything left of the cursor and moves the cursor back
//! to zero.

use std::collections::VecDeque;

/// Buffered history with an owned replay cursor
#[derive(Debug, Clone)]
pub struct ReplayBuffer<T> {
    items: VecDeque<T>,

    /// Index of the next item to replay (`cursor <= items.len()`)
    cursor: usize,

    /// Capacity kept after the buffer drains
    retained_capacity: usize,
}

impl<T> ReplayBuffer<T> {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Create an empty buffer reserving `initial` slots and keeping at most
    /// `retained` slots allocated once it drains
    pub fn with_capacity(initial: usize, retained: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(initial),
            cursor: 0,
            retained_capacity: retained,
        }
    }

    /// Number of items held (visited and pending)
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no item is held
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Allocated slots
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Position of the replay cursor
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Items not yet replayed
    pub fn pending(&self) -> usize {
        self.items.len() - self.cursor
    }

    /// True while a replay is in progress
    pub fn has_pending(&self) -> bool {
        self.cursor < self.items.len()
    }

    /// Append a freshly produced item; it counts as visited.
    pub fn push(&mut self, item: T) {
        debug_assert!(!self.has_pending(), "push while a replay is pending");
        self.items.push_back(item);
        self.cursor = self.items.len();
    }

    /// Next pending item, without consuming it
    pub fn peek_pending(&self) -> Option<&T> {
        self.items.get(self.cursor)
    }

    /// Replay the next pending item, keeping it in the buffer
    pub fn replay_next(&mut self) -> Option<T>
    where
        T: Clone,
    {
        let item = self.items.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(item)
    }

    /// Replay the next pending item and release it, along with anything
    /// visited before it
    pub fn pop_pending(&mut self) -> Option<T> {
        if !self.has_pending() {
            return None;
        }
        self.trim_visited();
        let item = self.items.pop_front();
        self.release_if_drained();
        item
    }

    /// Drop the visited prefix, returning how many items were released
    pub fn trim_visited(&mut self) -> usize {
        let trimmed = self.cursor;
        self.items.drain(..trimmed);
        self.cursor = 0;
        self.release_if_drained();
        trimmed
    }

    /// Move the cursor back to the head so every held item replays again
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.items.clear();
        self.cursor = 0;
        self.release_if_drained();
    }

    fn release_if_drained(&mut self) {
        if self.items.is_empty() && self.items.capacity() > self.retained_capacity {
            self.items.shrink_to(self.retained_capacity);
        }
    }
}

impl<T> Default for ReplayBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(items: &[char]) -> ReplayBuffer<char> {
        let mut buffer = ReplayBuffer::new();
        for &item in items {
            buffer.push(item);
        }
        buffer
    }

    #[test]
    fn test_push_marks_items_visited() {
        let buffer = filled(&['A', 'B', 'C']);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.cursor(), 3);
        assert_eq!(buffer.pending(), 0);
        assert!(!buffer.has_pending());
    }

    #[test]
    fn test_rewind_then_replay_keeps_items() {
        let mut buffer = filled(&['A', 'B']);
        buffer.rewind();
        assert_eq!(buffer.peek_pending(), Some(&'A'));
        assert_eq!(buffer.replay_next(), Some('A'));
        assert_eq!(buffer.replay_next(), Some('B'));
        assert_eq!(buffer.replay_next(), None);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_pop_pending_releases_items() {
        let mut buffer = filled(&['A', 'B', 'C']);
        buffer.rewind();
        assert_eq!(buffer.replay_next(), Some('A'));
        // 'A' was visited, popping 'B' releases both
        assert_eq!(buffer.pop_pending(), Some('B'));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.pop_pending(), Some('C'));
        assert!(buffer.is_empty());
        assert_eq!(buffer.pop_pending(), None);
    }

    #[test]
    fn test_trim_visited_keeps_pending() {
        let mut buffer = filled(&['A', 'B', 'C', 'D']);
        buffer.rewind();
        buffer.replay_next();
        buffer.replay_next();
        assert_eq!(buffer.trim_visited(), 2);
        assert_eq!(buffer.cursor(), 0);
        assert_eq!(buffer.pending(), 2);
        assert_eq!(buffer.peek_pending(), Some(&'C'));
    }

    #[test]
    fn test_drained_buffer_releases_capacity() {
        let mut buffer = ReplayBuffer::with_capacity(0, 4);
        for i in 0..1_000 {
            buffer.push(i);
        }
        assert!(buffer.capacity() >= 1_000);
        buffer.trim_visited();
        assert!(buffer.is_empty());
        assert!(buffer.capacity() < 1_000);
    }

    #[test]
    fn test_clear() {
        let mut buffer = filled(&['A', 'B']);
        buffer.rewind();
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor(), 0);
        assert!(!buffer.has_pending());
    }
}
