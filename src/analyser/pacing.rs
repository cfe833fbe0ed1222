//! Completion pacing — cooperative-yield throttling of the chunk loop.
//!
//! High-throughput input could otherwise drive a tight, purely synchronous
//! processing loop that monopolises the host scheduler. The controller
//! tracks how many samples have been processed since the last deferral;
//! once that count represents more wall-clock signal time than
//! `throttle_ms`, the chunk's completion signal is deferred to the next
//! scheduling tick instead of being raised inline. Advisory pacing only —
//! not flow control tied to buffer occupancy.

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// How a processed chunk's completion should be signalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Signal completion synchronously, within the consume call.
    Sync,
    /// Defer the completion signal to the next scheduling tick
    /// (a single cooperative yield).
    Deferred,
}

impl Completion {
    /// Returns `true` for [`Completion::Deferred`].
    pub fn is_deferred(self) -> bool {
        self == Completion::Deferred
    }
}

// ---------------------------------------------------------------------------
// PacingController
// ---------------------------------------------------------------------------

/// Decides synchronous vs. deferred completion per processed batch.
#[derive(Debug)]
pub struct PacingController {
    throttle_ms: u64,
    sample_rate: u32,
    /// Samples processed since the counter was last stepped down.
    pending_samples: u64,
}

impl PacingController {
    /// `throttle_ms == 0` disables pacing; `sample_rate` must be positive
    /// (enforced at analyser construction).
    pub fn new(throttle_ms: u64, sample_rate: u32) -> Self {
        Self {
            throttle_ms,
            sample_rate,
            pending_samples: 0,
        }
    }

    /// Account for a processed batch and decide how to signal completion.
    ///
    /// On deferral the counter is stepped down by
    /// `floor(sample_rate / throttle_ms)` rather than reset, so sustained
    /// throughput keeps yielding at a steady cadence.
    pub fn account(&mut self, new_samples: usize) -> Completion {
        self.pending_samples += new_samples as u64;

        if self.throttle_ms == 0 {
            return Completion::Sync;
        }

        let elapsed = self.pending_samples as f64 / self.sample_rate as f64;
        if elapsed > self.throttle_ms as f64 / 1000.0 {
            let step = u64::from(self.sample_rate) / self.throttle_ms;
            self.pending_samples = self.pending_samples.saturating_sub(step);
            log::debug!(
                "pacing: deferring completion ({} samples pending)",
                self.pending_samples
            );
            Completion::Deferred
        } else {
            Completion::Sync
        }
    }

    /// Samples currently counted towards the next pacing decision.
    pub fn pending_samples(&self) -> u64 {
        self.pending_samples
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_throttle_is_always_sync() {
        let mut pacing = PacingController::new(0, 44_100);
        for _ in 0..50 {
            assert_eq!(pacing.account(1_000_000), Completion::Sync);
        }
    }

    #[test]
    fn below_threshold_is_sync() {
        // 50 ms at 44.1 kHz = 2205 samples; the comparison is strict.
        let mut pacing = PacingController::new(50, 44_100);
        assert_eq!(pacing.account(2_205), Completion::Sync);
    }

    #[test]
    fn crossing_threshold_defers() {
        let mut pacing = PacingController::new(50, 44_100);
        assert_eq!(pacing.account(2_205), Completion::Sync);
        assert_eq!(pacing.account(1), Completion::Deferred);
    }

    #[test]
    fn deferral_steps_counter_down() {
        let mut pacing = PacingController::new(50, 44_100);
        pacing.account(2_206);
        // Step = floor(44100 / 50) = 882 → 2206 - 882 = 1324.
        assert_eq!(pacing.pending_samples(), 1_324);
    }

    #[test]
    fn counter_accumulates_across_batches() {
        let mut pacing = PacingController::new(50, 44_100);
        assert_eq!(pacing.account(1_000), Completion::Sync);
        assert_eq!(pacing.account(1_000), Completion::Sync);
        assert_eq!(pacing.account(1_000), Completion::Deferred);
    }

    #[test]
    fn sustained_throughput_keeps_deferring() {
        let mut pacing = PacingController::new(50, 44_100);
        let mut deferred = 0;
        for _ in 0..100 {
            if pacing.account(4_410).is_deferred() {
                deferred += 1;
            }
        }
        // 4410 samples per chunk is well past the 2205-sample threshold and
        // the 882-sample step-down, so nearly every chunk defers.
        assert!(deferred >= 95, "only {deferred} deferrals");
    }

    #[test]
    fn empty_batch_never_underflows() {
        let mut pacing = PacingController::new(50, 44_100);
        assert_eq!(pacing.account(0), Completion::Sync);
        assert_eq!(pacing.pending_samples(), 0);
    }
}
