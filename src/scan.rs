//! Line-stream scans behind the `markreset` binary
//!
//! Both scans stream lines straight from the reader; only the items the
//! mark/reset buffer needs are held in memory. Blank lines are skipped.

use std::io::{self, BufRead, Write};

use anyhow::{ensure, Context, Result};
use tracing::{debug, info};

use crate::config::MarkResetConfig;
use crate::group::group_runs_with;
use crate::iter::MarkReset;
use crate::space::SpaceTracker;

/// Options for [`group_lines`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOptions {
    /// Zero-based index of the key column
    pub key_column: usize,
    /// Column delimiter
    pub delimiter: char,
    /// Drop the first non-blank line
    pub skip_header: bool,
}

impl Default for GroupOptions {
    fn default() -> Self {
        Self {
            key_column: 0,
            delimiter: '\t',
            skip_header: false,
        }
    }
}

/// Group consecutive rows with equal key columns, writing
/// `<key>\t<row-count>` per run
///
/// Rows without the key column share an empty key, so consecutive ones
/// form a single run.
///
/// # Errors
///
/// Fails if a line cannot be read (including invalid UTF-8) or the
/// output cannot be written.
pub fn group_lines<R, W>(
    reader: R,
    out: &mut W,
    options: &GroupOptions,
    config: MarkResetConfig,
) -> Result<SpaceTracker>
where
    R: BufRead,
    W: Write,
{
    let GroupOptions {
        key_column,
        delimiter,
        skip_header,
    } = *options;
    let mut failure = None;

    let (space, run_count) = {
        let rows = nonblank_lines(reader, &mut failure).skip(usize::from(skip_header));
        let mut runs = group_runs_with(
            rows,
            |line: &String| line.split(delimiter).nth(key_column).map(str::to_owned),
            config,
        );

        let mut count = 0usize;
        for run in runs.by_ref() {
            let key = run
                .first()
                .and_then(|line| line.split(delimiter).nth(key_column))
                .unwrap_or("");
            writeln!(out, "{}\t{}", key, run.len()).context("failed to write run")?;
            count += 1;
        }
        (runs.into_inner().space().clone(), count)
    };

    check_read(failure)?;
    info!(runs = run_count, key_column, "grouping done");
    Ok(space)
}

/// Write every full window of `size` consecutive lines as
/// `<first-line-number>\t<line> | <line> | ...`
///
/// A trailing window shorter than `size` is skipped.
///
/// # Errors
///
/// Fails if `size` is zero, a line cannot be read, or the output cannot
/// be written.
pub fn window_lines<R, W>(
    reader: R,
    out: &mut W,
    size: usize,
    config: MarkResetConfig,
) -> Result<SpaceTracker>
where
    R: BufRead,
    W: Write,
{
    ensure!(size > 0, "window size must be at least 1");
    let mut failure = None;

    let space = {
        let mut it = MarkReset::with_config(nonblank_lines(reader, &mut failure), config);
        let mut start = 0usize;

        while it.has_next() {
            it.mark();
            let window: Vec<String> = it.by_ref().take(size).collect();
            if window.len() < size {
                debug!(start, len = window.len(), "trailing partial window skipped");
                break;
            }
            writeln!(out, "{}\t{}", start + 1, window.join(" | "))
                .context("failed to write window")?;

            it.reset()
                .with_context(|| format!("failed to rewind after window {}", start + 1))?;
            it.next_item()
                .with_context(|| format!("failed to advance past line {}", start + 1))?;
            start += 1;
        }
        it.space().clone()
    };

    check_read(failure)?;
    Ok(space)
}

/// Non-blank lines of `reader`; the first read error ends the stream and
/// is parked in `failure` with its line number
fn nonblank_lines<'a, R>(
    reader: R,
    failure: &'a mut Option<(usize, io::Error)>,
) -> impl Iterator<Item = String> + 'a
where
    R: BufRead + 'a,
{
    reader
        .lines()
        .enumerate()
        .scan(failure, |failure, (idx, line)| match line {
            Ok(line) => Some(line),
            Err(err) => {
                **failure = Some((idx + 1, err));
                None
            }
        })
        .filter(|line| !line.trim().is_empty())
}

fn check_read(failure: Option<(usize, io::Error)>) -> Result<()> {
    match failure {
        Some((line_no, err)) => {
            Err(err).with_context(|| format!("failed to read line {}", line_no))
        }
        None => Ok(()),
    }
}
