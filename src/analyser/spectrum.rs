//! Windowed spectral updates with exponential smoothing.
//!
//! The engine accumulates a count of newly appended samples; once a full
//! analysis window's worth (`fft_size`) has arrived it takes the most recent
//! `fft_size` samples from the history, applies the window function, runs the
//! forward transform in place, and folds the resulting magnitudes into the
//! smoothed spectrum. Between updates the spectrum is left untouched, so
//! accessors always see the last completed update.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::windows::WindowFn;

use super::history::SampleHistory;

// ---------------------------------------------------------------------------
// SpectrumEngine
// ---------------------------------------------------------------------------

/// Maintains a smoothed magnitude spectrum of the recent signal.
///
/// Magnitude per bin is `|re[i]| / fft_size` — the imaginary component of
/// the transform output is discarded rather than combined via the Euclidean
/// norm. This is an approximation, kept so the produced values match the
/// platform analyser output this crate mirrors.
pub struct SpectrumEngine {
    fft: Arc<dyn Fft<f32>>,
    fft_size: usize,
    window: WindowFn,
    smoothing_time_constant: f32,
    /// Smoothed magnitude per bin; all zeros until the first update.
    magnitudes: Vec<f32>,
    /// Samples appended since the last spectral update.
    pending_samples: usize,
    /// Number of spectral updates performed so far.
    updates: u64,
    /// Reused complex frame buffer.
    frame: Vec<Complex<f32>>,
}

impl SpectrumEngine {
    /// Plan the forward transform and allocate the spectrum state.
    ///
    /// `fft_size` must already be validated as a power of two by the caller.
    pub fn new(fft_size: usize, window: WindowFn, smoothing_time_constant: f32) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(fft_size);
        Self {
            fft,
            fft_size,
            window,
            smoothing_time_constant,
            magnitudes: vec![0.0; fft_size],
            pending_samples: 0,
            updates: 0,
            frame: Vec::with_capacity(fft_size),
        }
    }

    /// Account for `new_samples` freshly appended samples and recompute the
    /// spectrum once a full window has accumulated.
    ///
    /// When fewer than `fft_size` new samples have arrived the spectrum
    /// state is left unchanged.
    pub fn accumulate(&mut self, new_samples: usize, history: &SampleHistory) {
        self.pending_samples += new_samples;
        if self.pending_samples < self.fft_size {
            return;
        }
        self.pending_samples = 0;
        self.update(history);
    }

    fn update(&mut self, history: &SampleHistory) {
        let tail = history.snapshot(self.fft_size);
        // Histories shorter than one window read as leading silence.
        let pad = self.fft_size - tail.len();
        let window = self.window;
        let n = self.fft_size;

        self.frame.clear();
        self.frame
            .extend(std::iter::repeat(Complex::new(0.0f32, 0.0)).take(pad));
        self.frame.extend(
            tail.iter()
                .enumerate()
                .map(|(i, &s)| Complex::new(s * window(pad + i, n), 0.0)),
        );

        self.fft.process(&mut self.frame);

        let k = self.smoothing_time_constant.clamp(0.0, 1.0);
        let norm = self.fft_size as f32;
        for (bin, out) in self.magnitudes.iter_mut().zip(self.frame.iter()) {
            let raw = out.re.abs() / norm;
            *bin = k * *bin + (1.0 - k) * raw;
        }

        self.updates += 1;
        log::debug!(
            "spectrum update #{}: window={} smoothing={:.2}",
            self.updates,
            self.fft_size,
            k
        );
    }

    /// The current smoothed magnitudes, one non-negative value per bin.
    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }

    /// Samples accumulated towards the next update.
    pub fn pending_samples(&self) -> usize {
        self.pending_samples
    }

    /// Number of spectral updates performed since construction.
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
