//! Configuration for mark/reset iteration

/// Configuration parameters for a [`MarkReset`](crate::MarkReset) iterator
///
/// None of these change which items are returned; they only control how
/// the replay buffer allocates and whether occupancy is profiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkResetConfig {
    /// Slots reserved when the buffer is first created
    pub initial_capacity: usize,

    /// Capacity kept once the buffer drains; anything above is released
    pub retained_capacity: usize,

    /// Record a [`BufferProfile`](crate::BufferProfile) while iterating
    pub profile: bool,
}

impl Default for MarkResetConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            retained_capacity: 64,
            profile: false,
        }
    }
}

impl MarkResetConfig {
    /// Configuration sized for marks spanning roughly `window` items
    pub fn for_window(window: usize) -> Self {
        Self {
            initial_capacity: window,
            retained_capacity: window.max(Self::default().retained_capacity),
            ..Self::default()
        }
    }

    /// Set the initial buffer capacity
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the capacity retained after the buffer drains
    pub fn with_retained_capacity(mut self, capacity: usize) -> Self {
        self.retained_capacity = capacity;
        self
    }

    /// Enable or disable occupancy profiling
    pub fn with_profile(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }
}
