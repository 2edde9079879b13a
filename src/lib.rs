//! # Mark/Reset Iteration with Bounded Replay
//!
//! This library wraps any forward-only iterator and adds checkpoint
//! ("mark"), rewind ("reset") and checkpoint-discard ("clear mark")
//! operations on top of it.
//!
//! ## Core Algorithm
//!
//! 1. **Mark**: start recording every item handed out into a replay buffer
//! 2. **Reset**: rewind to the mark; buffered items are replayed in order
//! 3. **Eager trim**: replayed items that no mark covers are dropped at once
//! 4. **Re-mark**: a fresh mark re-bases the buffer, keeping only pending items
//!
//! Result: the buffer never holds more than the span between the active mark
//! and the furthest item pulled from the source.
//!
//! ## Usage Example
//!
//! ```
//! use markreset::{Markable, MarkResetError};
//!
//! let mut it = vec!['A', 'B', 'C'].into_iter().markable();
//! it.mark();
//! assert_eq!(it.next_item()?, 'A');
//! assert_eq!(it.next_item()?, 'B');
//! it.reset()?;
//! assert_eq!(it.collect::<String>(), "ABC");
//! # Ok::<(), MarkResetError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod buffer;  // Replay buffer with owned cursor
pub mod config;  // Buffer capacity knobs
pub mod group;   // Consecutive-key run grouping
pub mod iter;    // The mark/reset iterator
pub mod scan;    // Line-stream scans used by the CLI
pub mod space;   // Buffer occupancy accounting

// Re-exports for convenience
pub use buffer::ReplayBuffer;
pub use config::MarkResetConfig;
pub use group::{group_runs, group_runs_with, KeyedRuns};
pub use iter::{MarkReset, Markable};
pub use scan::{group_lines, window_lines, GroupOptions};
pub use space::{BufferProfile, SpaceTracker};

use thiserror::Error;

/// Errors raised by mark/reset iteration.
///
/// All of them are contract violations detected at the call site. None
/// mutates the iterator, which stays usable afterwards.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkResetError {
    /// Operation requires an active mark (or no pending replay)
    #[error("invalid state for {op}: {reason}")]
    InvalidState {
        /// Operation that was attempted
        op: &'static str,
        /// What the iterator state lacked
        reason: &'static str,
    },

    /// `next` was called with no item left
    #[error("no more elements")]
    Exhausted,

    /// Operation is never supported by this iterator
    #[error("unsupported operation: {op}")]
    UnsupportedOperation {
        /// Operation that was attempted
        op: &'static str,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = MarkResetError> = std::result::Result<T, E>;
