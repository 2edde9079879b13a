//! Consecutive-key run grouping
//!
//! Splits a key-sorted stream into runs of equal keys. Each run is read
//! ahead one item at a time: mark, read, and if the item belongs to the
//! next run, reset so it is read again as that run's first item.

use std::fmt;

use crate::config::MarkResetConfig;
use crate::iter::MarkReset;

/// Iterator over runs of consecutive items sharing a key
///
/// # Example
///
/// ```
/// use markreset::group_runs;
///
/// let events = vec![(1, "a"), (1, "b"), (2, "c"), (1, "d")];
/// let runs: Vec<Vec<_>> = group_runs(events, |e| e.0).collect();
/// assert_eq!(runs.len(), 3);
/// assert_eq!(runs[0], vec![(1, "a"), (1, "b")]);
/// ```
pub struct KeyedRuns<I: Iterator, F> {
    inner: MarkReset<I>,
    key: F,
}

impl<I, K, F> KeyedRuns<I, F>
where
    I: Iterator,
    I::Item: Clone,
    F: FnMut(&I::Item) -> K,
    K: PartialEq,
{
    /// Group the items of an existing mark/reset iterator
    pub fn new(inner: MarkReset<I>, key: F) -> Self {
        Self { inner, key }
    }

    /// Borrow the underlying iterator (e.g. for its space statistics)
    pub fn get_ref(&self) -> &MarkReset<I> {
        &self.inner
    }

    /// Unwrap the underlying iterator
    pub fn into_inner(self) -> MarkReset<I> {
        self.inner
    }
}

impl<I, K, F> Iterator for KeyedRuns<I, F>
where
    I: Iterator,
    I::Item: Clone,
    F: FnMut(&I::Item) -> K,
    K: PartialEq,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.inner.next_item().ok()?;
        let run_key = (self.key)(&first);
        let mut run = vec![first];

        while self.inner.has_next() {
            self.inner.mark();
            let Ok(item) = self.inner.next_item() else {
                break;
            };

            if (self.key)(&item) == run_key {
                run.push(item);
            } else {
                // First item of the next run; the mark above is still active
                let rewound = self.inner.reset();
                debug_assert!(rewound.is_ok(), "reset right after mark failed");
                break;
            }
        }

        if self.inner.is_marked() {
            let cleared = self.inner.clear_mark();
            debug_assert!(cleared.is_ok(), "clear_mark with active mark failed");
        }
        Some(run)
    }
}

impl<I, F> fmt::Debug for KeyedRuns<I, F>
where
    I: Iterator,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedRuns")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Group consecutive items of `items` that map to equal keys
pub fn group_runs<T, K, F>(items: T, key: F) -> KeyedRuns<T::IntoIter, F>
where
    T: IntoIterator,
    T::Item: Clone,
    F: FnMut(&T::Item) -> K,
    K: PartialEq,
{
    group_runs_with(items, key, MarkResetConfig::default())
}

/// [`group_runs`] with an explicit buffer configuration
pub fn group_runs_with<T, K, F>(items: T, key: F, config: MarkResetConfig) -> KeyedRuns<T::IntoIter, F>
where
    T: IntoIterator,
    T::Item: Clone,
    F: FnMut(&T::Item) -> K,
    K: PartialEq,
{
    KeyedRuns::new(MarkReset::with_config(items.into_iter(), config), key)
}
