//! Bounded ring buffer with running statistics.
//!
//! This module provides a fixed-capacity circular buffer of samples that keeps
//! its sum and sum of squares up to date on every push and eviction. Key
//! properties:
//!
//! - **Bounded capacity**: Never holds more than the configured number of samples
//! - **O(1) statistics**: `len`, `avg`, `variance` and `std_dev` never scan
//! - **Drop accounting**: Non-finite samples are counted, never stored
//!
//! # Example
//!
//! ```rust
//! use trueno_plot::ring_buffer::StatsRingBuffer;
//!
//! let mut buffer = StatsRingBuffer::new(3)?;
//! for value in [1.0, 2.0, 3.0, 4.0] {
//!     buffer.enqueue(value);
//! }
//! buffer.enqueue(f64::NAN);
//!
//! assert_eq!(buffer.len(), 3); // Bounded
//! assert_eq!(buffer.avg()?, 3.0); // 2, 3, 4
//! assert_eq!(buffer.dropped_count(), 1);
//! # Ok::<(), trueno_plot::Error>(())
//! ```

use crate::error::{Error, Result};

/// A fixed-capacity ring buffer of `f64` samples with incremental statistics.
///
/// Slots are `Option<f64>`; `None` is a tombstone. The live region runs from
/// `front` for `len` slots (mod capacity).
#[derive(Debug, Clone)]
pub struct StatsRingBuffer {
    slots: Vec<Option<f64>>,
    front: usize,
    back: usize,
    len: usize,
    sum: f64,
    sum_sq: f64,
    dropped: u64,
}

/// Snapshot of the statistics of a non-empty buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of live samples.
    pub len: usize,
    /// Smallest live sample.
    pub min: f64,
    /// Largest live sample.
    pub max: f64,
    /// Arithmetic mean.
    pub avg: f64,
    /// Sample standard deviation, `None` with fewer than two samples.
    pub std_dev: Option<f64>,
    /// Number of dropped (non-finite) samples seen so far.
    pub dropped: u64,
}

impl StatsRingBuffer {
    /// Creates an empty buffer holding at most `capacity` samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        Ok(Self {
            slots: vec![None; capacity],
            front: 0,
            back: 0,
            len: 0,
            sum: 0.0,
            sum_sq: 0.0,
            dropped: 0,
        })
    }

    /// Pushes a sample into the buffer.
    ///
    /// A non-finite sample (the NaN "no data" sentinel, or an infinity) only
    /// increments [`dropped_count`](Self::dropped_count); the write cursor does
    /// not move. A finite sample evicts the oldest one when the buffer is full.
    pub fn enqueue(&mut self, value: f64) {
        if !value.is_finite() {
            self.dropped += 1;
            return;
        }

        if self.slots[self.back].is_some() {
            // Full: back has caught up with front.
            self.evict_front();
        }

        self.slots[self.back] = Some(value);
        self.back = self.advance(self.back);
        self.len += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    /// Removes and returns the oldest live sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBuffer`] if no samples are live.
    pub fn dequeue(&mut self) -> Result<f64> {
        self.evict_front().ok_or(Error::EmptyBuffer)
    }

    fn evict_front(&mut self) -> Option<f64> {
        let value = self.slots[self.front].take()?;
        self.front = self.advance(self.front);
        self.len -= 1;

        if self.len == 0 {
            // Reset instead of subtracting so rounding error cannot accumulate.
            self.sum = 0.0;
            self.sum_sq = 0.0;
        } else {
            self.sum -= value;
            self.sum_sq -= value * value;
        }

        Some(value)
    }

    fn advance(&self, index: usize) -> usize {
        (index + 1) % self.slots.len()
    }

    /// Returns the number of live samples. O(1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no samples are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the next finite push will evict.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Returns the maximum number of live samples.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of non-finite samples pushed so far.
    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }

    /// Returns the running sum of live samples.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Returns the most recent live sample, if any.
    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        if self.len == 0 {
            return None;
        }
        let cap = self.slots.len();
        self.slots[(self.back + cap - 1) % cap]
    }

    /// Returns the smallest live sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBuffer`] if no samples are live.
    pub fn min(&self) -> Result<f64> {
        self.iter().reduce(f64::min).ok_or(Error::EmptyBuffer)
    }

    /// Returns the largest live sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBuffer`] if no samples are live.
    pub fn max(&self) -> Result<f64> {
        self.iter().reduce(f64::max).ok_or(Error::EmptyBuffer)
    }

    /// Returns the arithmetic mean of live samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBuffer`] if no samples are live.
    pub fn avg(&self) -> Result<f64> {
        if self.len == 0 {
            return Err(Error::EmptyBuffer);
        }
        Ok(self.sum / self.len as f64)
    }

    /// Returns the sample variance (n - 1 denominator) of live samples.
    ///
    /// Uses the computational formula over the running accumulators. Tiny
    /// negative results caused by rounding are clamped to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientSamples`] with fewer than two live samples.
    pub fn variance(&self) -> Result<f64> {
        if self.len < 2 {
            return Err(Error::InsufficientSamples { required: 2, actual: self.len });
        }
        let n = self.len as f64;
        let variance = (self.sum_sq - self.sum * self.sum / n) / (n - 1.0);
        Ok(variance.max(0.0))
    }

    /// Returns the sample standard deviation of live samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientSamples`] with fewer than two live samples.
    pub fn std_dev(&self) -> Result<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Returns a snapshot of all statistics, or `None` if the buffer is empty.
    #[must_use]
    pub fn stats(&self) -> Option<Summary> {
        let min = self.min().ok()?;
        let max = self.max().ok()?;
        let avg = self.avg().ok()?;

        Some(Summary {
            len: self.len,
            min,
            max,
            avg,
            std_dev: self.std_dev().ok(),
            dropped: self.dropped,
        })
    }

    /// Returns an iterator over live samples from oldest to newest.
    ///
    /// The iterator borrows the buffer, so it can be created again at any
    /// time to restart from the oldest sample.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let cap = self.slots.len();
        (0..self.len).filter_map(move |i| self.slots[(self.front + i) % cap])
    }

    /// Returns the live samples as a vector, oldest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Removes all live samples. Capacity and the dropped counter are kept.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.front = 0;
        self.back = 0;
        self.len = 0;
        self.sum = 0.0;
        self.sum_sq = 0.0;
    }
}

// ============================================================================
// Tests
// ============================================================================


// ============================================================================
// Property-based tests with proptest
// ============================================================================
