//! Mark/reset iterator
//!
//! Wraps a forward-only source and hands its items out in order, while
//! allowing the caller to place a mark, rewind to it, or drop it.
//!
//! Memory: the buffer holds the items between the active mark and the
//! furthest item pulled from the source. With no mark active, replayed
//! items are released as soon as they are handed out.

use std::fmt;
use std::iter::Peekable;

use tracing::{debug, trace};

use crate::buffer::ReplayBuffer;
use crate::config::MarkResetConfig;
use crate::space::{BufferProfile, SpaceTracker};
use crate::{MarkResetError, Result};

/// Forward iterator with mark, reset and clear-mark support
///
/// # Example
///
/// ```
/// use markreset::MarkReset;
///
/// let mut it = MarkReset::new(1..=5);
/// assert_eq!(it.next(), Some(1));
/// it.mark();
/// assert_eq!(it.next(), Some(2));
/// assert_eq!(it.next(), Some(3));
/// it.reset().unwrap();
/// assert_eq!(it.collect::<Vec<_>>(), vec![2, 3, 4, 5]);
/// ```
pub struct MarkReset<I: Iterator> {
    source: Peekable<I>,

    /// Created on the first mark, dropped once drained with no mark active
    buffer: Option<ReplayBuffer<I::Item>>,

    marked: bool,

    config: MarkResetConfig,
    tracker: SpaceTracker,
}

impl<I> MarkReset<I>
where
    I: Iterator,
    I::Item: Clone,
{
    /// Wrap `source` with the default configuration
    pub fn new(source: I) -> Self {
        Self::with_config(source, MarkResetConfig::default())
    }

    /// Wrap `source` with an explicit configuration
    pub fn with_config(source: I, config: MarkResetConfig) -> Self {
        let tracker = SpaceTracker::new(config.profile);
        Self {
            source: source.peekable(),
            buffer: None,
            marked: false,
            config,
            tracker,
        }
    }

    /// True if a replay is pending or the source has more items
    ///
    /// Pulls at most one item from the source, which is held until the
    /// next call to [`next_item`](Self::next_item).
    pub fn has_next(&mut self) -> bool {
        self.pending() > 0 || self.source.peek().is_some()
    }

    /// Return the next item, or [`MarkResetError::Exhausted`]
    pub fn next_item(&mut self) -> Result<I::Item> {
        let marked = self.marked;
        let replayed = match self.buffer.as_mut() {
            Some(buffer) if buffer.has_pending() => {
                if marked {
                    buffer.replay_next().map(|item| (item, 0))
                } else {
                    // Not re-captured: release it right away
                    buffer.pop_pending().map(|item| (item, 1))
                }
            }
            _ => None,
        };

        if let Some((item, released)) = replayed {
            let buffered = self.buffered_len();
            self.tracker.record_replay(released, buffered);
            if !marked {
                self.drop_drained_buffer();
            }
            return Ok(item);
        }

        let item = self.source.next().ok_or(MarkResetError::Exhausted)?;
        if marked {
            let buffer = self.buffer.get_or_insert_with(|| {
                ReplayBuffer::with_capacity(
                    self.config.initial_capacity,
                    self.config.retained_capacity,
                )
            });
            buffer.push(item.clone());
            self.tracker.record_buffered(buffer.len());
        }
        Ok(item)
    }

    /// Start recording so a later [`reset`](Self::reset) can rewind here
    ///
    /// Marking while already marked moves the mark to the current
    /// position. Items still waiting to be replayed are kept.
    pub fn mark(&mut self) {
        let config = &self.config;
        let buffer = self.buffer.get_or_insert_with(|| {
            ReplayBuffer::with_capacity(config.initial_capacity, config.retained_capacity)
        });
        let trimmed = buffer.trim_visited();
        let buffered = buffer.len();

        if trimmed > 0 {
            trace!(trimmed, buffered, "mark: trimmed visited prefix");
        }
        debug!(
            remarked = self.marked,
            pending = buffered,
            "mark placed"
        );

        self.marked = true;
        self.tracker.record_mark(trimmed, buffered);
    }

    /// Rewind to the most recent mark
    ///
    /// The mark is consumed; call [`mark`](Self::mark) again to capture the
    /// same span a second time.
    ///
    /// # Errors
    ///
    /// [`MarkResetError::InvalidState`] if no mark is active. Nothing is
    /// changed in that case.
    pub fn reset(&mut self) -> Result<()> {
        if !self.marked {
            return Err(MarkResetError::InvalidState {
                op: "reset",
                reason: "no active mark",
            });
        }

        self.marked = false;
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.rewind();
        }

        let buffered = self.buffered_len();
        debug!(replay = buffered, "reset to mark");
        self.tracker.record_reset(buffered);
        self.drop_drained_buffer();
        Ok(())
    }

    /// Drop the active mark without rewinding
    ///
    /// Items recorded since the mark are released. If the mark was placed
    /// during an earlier replay, the rest of that replay still comes out
    /// before the source resumes.
    ///
    /// # Errors
    ///
    /// [`MarkResetError::InvalidState`] if no mark is active. Nothing is
    /// changed in that case.
    pub fn clear_mark(&mut self) -> Result<()> {
        if !self.marked {
            return Err(MarkResetError::InvalidState {
                op: "clear_mark",
                reason: "no active mark",
            });
        }

        self.marked = false;
        let trimmed = self
            .buffer
            .as_mut()
            .map_or(0, ReplayBuffer::trim_visited);

        let buffered = self.buffered_len();
        debug!(trimmed, pending = buffered, "mark cleared");
        self.tracker.record_clear(trimmed, buffered);
        self.drop_drained_buffer();
        Ok(())
    }

    /// Removing items from the underlying sequence is never supported
    ///
    /// # Errors
    ///
    /// Always [`MarkResetError::UnsupportedOperation`].
    pub fn remove(&mut self) -> Result<()> {
        Err(MarkResetError::UnsupportedOperation { op: "remove" })
    }

    /// Look at the next item without consuming it
    ///
    /// Neither the mark nor the buffer is touched.
    pub fn peek(&mut self) -> Option<&I::Item> {
        if let Some(item) = self.buffer.as_ref().and_then(ReplayBuffer::peek_pending) {
            return Some(item);
        }
        self.source.peek()
    }

    /// Consume and return the next item only if `pred` accepts it
    pub fn next_if(&mut self, pred: impl FnOnce(&I::Item) -> bool) -> Option<I::Item> {
        if self.peek().map_or(false, pred) {
            self.next_item().ok()
        } else {
            None
        }
    }

    /// True between a `mark` and the next `reset` or `clear_mark`
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// True while buffered items are still waiting to be replayed
    pub fn is_replaying(&self) -> bool {
        self.pending() > 0
    }

    /// Items currently held by the buffer
    pub fn buffered_len(&self) -> usize {
        self.buffer.as_ref().map_or(0, ReplayBuffer::len)
    }

    /// Slots currently allocated by the buffer
    pub fn buffer_capacity(&self) -> usize {
        self.buffer.as_ref().map_or(0, ReplayBuffer::capacity)
    }

    /// Occupancy statistics
    pub fn space(&self) -> &SpaceTracker {
        &self.tracker
    }

    /// Buffer profile, if enabled in the configuration
    pub fn profile(&self) -> Option<&BufferProfile> {
        self.tracker.profile()
    }

    /// Take the buffer profile out of the iterator
    pub fn take_profile(&mut self) -> Option<BufferProfile> {
        self.tracker.take_profile()
    }

    fn pending(&self) -> usize {
        self.buffer.as_ref().map_or(0, ReplayBuffer::pending)
    }

    fn drop_drained_buffer(&mut self) {
        if !self.marked && self.buffered_len() == 0 && self.buffer.take().is_some() {
            trace!("replay buffer drained and dropped");
        }
    }
}

impl<I> Iterator for MarkReset<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_item().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.pending();
        let (lower, upper) = self.source.size_hint();
        (
            lower.saturating_add(pending),
            upper.and_then(|n| n.checked_add(pending)),
        )
    }
}

impl<I> fmt::Debug for MarkReset<I>
where
    I: Iterator,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkReset")
            .field("marked", &self.marked)
            .field("buffer", &self.buffer)
            .field("config", &self.config)
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}

/// Extension trait adding [`markable`](Markable::markable) to every iterator
pub trait Markable: Iterator + Sized
where
    Self::Item: Clone,
{
    /// Wrap this iterator in a [`MarkReset`]
    fn markable(self) -> MarkReset<Self> {
        MarkReset::new(self)
    }

    /// Wrap this iterator in a [`MarkReset`] with an explicit configuration
    fn markable_with(self, config: MarkResetConfig) -> MarkReset<Self> {
        MarkReset::with_config(self, config)
    }
}

impl<I> Markable for I
where
    I: Iterator,
    I::Item: Clone,
{
}
