//! Occupancy tracking for the replay buffer

use super::BufferProfile;

/// Tracks buffer occupancy during iteration
#[derive(Debug, Clone)]
pub struct SpaceTracker {
    /// Items currently buffered
    current: usize,

    /// Maximum seen
    max: usize,

    /// Profile data (if enabled)
    profile: Option<BufferProfile>,
}

impl SpaceTracker {
    /// Create new tracker
    pub fn new(profile_enabled: bool) -> Self {
        Self {
            current: 0,
            max: 0,
            profile: profile_enabled.then(BufferProfile::default),
        }
    }

    /// A fresh item was pulled from the source and buffered
    pub fn record_buffered(&mut self, buffered: usize) {
        self.observe(buffered);
    }

    /// An item was served from the buffer; `released` if it left the buffer
    pub fn record_replay(&mut self, released: usize, buffered: usize) {
        if let Some(ref mut p) = self.profile {
            p.replayed += 1;
            p.trimmed += released;
        }
        self.observe(buffered);
    }

    /// Mark placed; `trimmed` visited items were dropped to re-base it
    pub fn record_mark(&mut self, trimmed: usize, buffered: usize) {
        if let Some(ref mut p) = self.profile {
            p.marks += 1;
            p.trimmed += trimmed;
        }
        self.observe(buffered);
    }

    /// Mark consumed by a rewind
    pub fn record_reset(&mut self, buffered: usize) {
        if let Some(ref mut p) = self.profile {
            p.resets += 1;
            p.timeline.push((p.resets, buffered));
        }
        self.observe(buffered);
    }

    /// Mark dropped without rewinding
    pub fn record_clear(&mut self, trimmed: usize, buffered: usize) {
        if let Some(ref mut p) = self.profile {
            p.cleared_marks += 1;
            p.trimmed += trimmed;
        }
        self.observe(buffered);
    }

    fn observe(&mut self, buffered: usize) {
        self.current = buffered;
        self.max = self.max.max(buffered);

        if let Some(ref mut p) = self.profile {
            p.max_buffered = self.max;
        }
    }

    /// Items buffered after the last recorded operation
    pub fn current_buffered(&self) -> usize {
        self.current
    }

    /// Get maximum number of items buffered at once
    pub fn max_buffered(&self) -> usize {
        self.max
    }

    /// Borrow the profile, if profiling is enabled
    pub fn profile(&self) -> Option<&BufferProfile> {
        self.profile.as_ref()
    }

    /// Take profile (profiling stops afterwards)
    pub fn take_profile(&mut self) -> Option<BufferProfile> {
        self.profile.take()
    }
}
