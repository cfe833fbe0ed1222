//! Fixed-capacity time-domain history of normalised `f32` samples.
//!
//! When the buffer is full, new samples **overwrite** the oldest data so the
//! most recent `capacity` samples are always available — the analyser cares
//! about the tail of the signal, not the head. Storage is allocated once at
//! construction and never grows.
//!
//! # Example
//!
//! ```rust
//! use audio_analyser::analyser::SampleHistory;
//!
//! let mut history = SampleHistory::new(4);
//! history.append(&[1.0, 2.0, 3.0, 4.0, 5.0]); // 5 items → capacity 4 → oldest dropped
//! assert_eq!(history.snapshot(4), vec![2.0, 3.0, 4.0, 5.0]);
//! assert_eq!(history.snapshot(2), vec![4.0, 5.0]);
//! ```

// ---------------------------------------------------------------------------
// SampleHistory
// ---------------------------------------------------------------------------

/// Bounded, ordered buffer of one channel's recent samples.
///
/// ## Invariant
///
/// After every [`append`](Self::append),
/// `len == min(capacity, previous len + appended len)`; eviction is strictly
/// oldest-first. Appending never fails. A capacity of 0 is tolerated — the
/// history simply stays empty.
#[derive(Debug)]
pub struct SampleHistory {
    buf: Vec<f32>,
    capacity: usize,
    /// Index of the *next* write position (wraps around `capacity`).
    write_pos: usize,
    /// Number of valid samples currently stored (≤ `capacity`).
    len: usize,
}

impl SampleHistory {
    /// Create a history with room for `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0.0; capacity],
            capacity,
            write_pos: 0,
            len: 0,
        }
    }

    /// Append `samples` in order, evicting the oldest samples once the
    /// buffer exceeds its capacity.
    pub fn append(&mut self, samples: &[f32]) {
        if self.capacity == 0 {
            return;
        }
        for &sample in samples {
            self.buf[self.write_pos] = sample;
            self.write_pos = (self.write_pos + 1) % self.capacity;
            if self.len < self.capacity {
                self.len += 1;
            }
        }
    }

    /// Copy of the last `min(n, len)` samples in chronological order.
    ///
    /// Returns fewer than `n` samples when the history is shorter than
    /// requested — no padding, no error.
    pub fn snapshot(&self, n: usize) -> Vec<f32> {
        let take = n.min(self.len);
        if take == 0 {
            return Vec::new();
        }

        // Oldest sample sits at 0 until the first wrap, at `write_pos` after.
        let first = if self.len < self.capacity {
            0
        } else {
            self.write_pos
        };
        let skip = self.len - take;

        (0..take)
            .map(|i| self.buf[(first + skip + i) % self.capacity])
            .collect()
    }

    /// Number of samples currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no samples are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of samples the history can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
