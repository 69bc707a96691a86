//! Bounded sliding window of recent samples.
//!
//! This module provides the fixed-capacity FIFO buffer that backs the live
//! waveform display. Key properties:
//!
//! - **Bounded capacity**: Never exceeds configured size; a push at capacity
//!   evicts exactly the oldest sample first
//! - **O(1) push**: Eviction and append are constant time (amortized)
//! - **Snapshot reads**: Renderers receive owned copies, never live references
//!
//! # Example
//!
//! ```rust
//! use temblor::SlidingWindow;
//!
//! let mut window = SlidingWindow::new(200);
//! for i in 0..500 {
//!     window.push(f64::from(i) * 0.01);
//! }
//! assert_eq!(window.len(), 200); // Bounded
//! assert_eq!(window.latest(), Some(&4.99)); // Most recent push
//! ```

use std::collections::VecDeque;

/// A fixed-capacity FIFO window over the most recent samples.
///
/// Positions inside the window are ephemeral: once the window is full, every
/// push shifts all prior samples one slot toward the front. Stable event
/// identity lives in the ledger, not here.
#[derive(Debug, Clone)]
pub struct SlidingWindow<T> {
    /// Backing storage; VecDeque gives O(1) at both ends.
    samples: VecDeque<T>,
    /// Maximum number of retained samples (never exceeded).
    capacity: usize,
}

impl<T> SlidingWindow<T> {
    /// Default capacity, sized for one screen of waveform history.
    pub const DEFAULT_CAPACITY: usize = 200;

    /// Creates an empty window with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0; a zero-width window cannot hold a trace.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Sliding window capacity must be greater than 0");
        Self { samples: VecDeque::with_capacity(capacity), capacity }
    }

    /// Pushes one sample, evicting the oldest if the window is full.
    ///
    /// Always succeeds for any value of `T`; overflow is the normal steady
    /// state of a live trace, not an error.
    pub fn push(&mut self, sample: T) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Returns the most recently pushed sample, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&T> {
        self.samples.back()
    }

    /// Returns the oldest retained sample, if any.
    #[must_use]
    pub fn oldest(&self) -> Option<&T> {
        self.samples.front()
    }

    /// Returns the number of samples currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if no samples are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns true if the next push will evict.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.samples.len() >= self.capacity
    }

    /// Returns the fixed capacity chosen at construction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over retained samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.samples.iter()
    }

    /// Drops all retained samples; capacity is unchanged.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl<T: Clone> SlidingWindow<T> {
    /// Returns an owned copy of the current contents, oldest first.
    ///
    /// This is the read side of the snapshot-then-render contract: the
    /// caller gets a stable view that no later tick can mutate.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.samples.iter().cloned().collect()
    }
}

impl<T> Default for SlidingWindow<T> {
    /// Creates a window with [`Self::DEFAULT_CAPACITY`].
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

// ============================================================================
// Tests
// ============================================================================


// ============================================================================
// Property-based tests with proptest
// ============================================================================
