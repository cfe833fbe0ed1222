//! Incremental analysis engine — history, spectrum, scaling and pacing.
//!
//! # Components
//!
//! ```text
//! consume(chunk) → extract channel → SampleHistory (append, bounded)
//!                                  → SpectrumEngine (update every fft_size
//!                                    new samples, smoothed magnitudes)
//!                                  → PacingController (Sync | Deferred)
//! accessors      → scaling (decibel / byte conversions, read-only)
//! ```
//!
//! The [`Analyser`] is the single mutator of all of this state; processing
//! is strictly in arrival order and accessors always reflect the most
//! recently consumed chunk.

pub mod history;
pub mod pacing;
pub mod scaling;
pub mod spectrum;

pub use history::SampleHistory;
pub use pacing::{Completion, PacingController};
pub use spectrum::SpectrumEngine;

use crate::config::{AnalyserConfig, ConfigError};
use crate::format::{self, PcmFormat};

// ---------------------------------------------------------------------------
// Analyser
// ---------------------------------------------------------------------------

/// Inline pass-through audio analyser.
///
/// Construct with an immutable [`AnalyserConfig`] and the stream's
/// [`PcmFormat`], feed it chunks via [`consume`](Self::consume) (raw PCM
/// bytes) or [`consume_frames`](Self::consume_frames) (interleaved `f32`
/// frames), and pull time/frequency views through the accessors at any time.
///
/// # Example
///
/// ```rust
/// use audio_analyser::{Analyser, AnalyserConfig, Completion, PcmFormat, SampleFormat};
///
/// let config = AnalyserConfig {
///     fft_size: 64,
///     throttle_ms: 0,
///     ..Default::default()
/// };
/// let format = PcmFormat {
///     sample_rate: 44_100,
///     channels: 1,
///     sample_format: SampleFormat::F32,
/// };
/// let mut analyser = Analyser::new(config, format).unwrap();
///
/// let completion = analyser.consume_frames(&[0.5; 64]);
/// assert_eq!(completion, Completion::Sync); // throttle_ms = 0 never defers
/// assert_eq!(analyser.time_data(None).len(), 64);
/// ```
pub struct Analyser {
    config: AnalyserConfig,
    pcm: PcmFormat,
    history: SampleHistory,
    spectrum: SpectrumEngine,
    pacing: PacingController,
}

impl Analyser {
    /// Create an analyser, validating the configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::FftSizeNotPowerOfTwo`] when `fft_size` is not a power
    /// of two, [`ConfigError::ZeroSampleRate`] when the format carries a
    /// zero sample rate.
    pub fn new(config: AnalyserConfig, pcm: PcmFormat) -> Result<Self, ConfigError> {
        config.validate()?;
        if pcm.sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }

        log::debug!(
            "analyser: fft_size={} buffer_size={} channel={} rate={} Hz",
            config.fft_size,
            config.buffer_size,
            config.channel,
            pcm.sample_rate
        );

        Ok(Self {
            history: SampleHistory::new(config.buffer_size),
            spectrum: SpectrumEngine::new(
                config.fft_size,
                config.window,
                config.smoothing_time_constant,
            ),
            pacing: PacingController::new(config.throttle_ms, pcm.sample_rate),
            config,
            pcm,
        })
    }

    // -----------------------------------------------------------------------
    // Chunk consumption
    // -----------------------------------------------------------------------

    /// Process one chunk of raw interleaved PCM (per the construction-time
    /// [`PcmFormat`]): extract the configured channel, append it to the
    /// history, update the spectrum when due, and return the pacing
    /// decision. The chunk itself is untouched — forwarding is the caller's
    /// (or the [`crate::stage`] loop's) job.
    pub fn consume(&mut self, chunk: &[u8]) -> Completion {
        let samples = format::extract_channel(chunk, &self.pcm, self.config.channel);
        self.ingest(&samples)
    }

    /// Process one chunk of interleaved `f32` frames — the form audio
    /// callbacks usually deliver — selecting the configured channel.
    pub fn consume_frames(&mut self, frames: &[f32]) -> Completion {
        let samples = format::select_channel(frames, self.pcm.channels, self.config.channel);
        self.ingest(&samples)
    }

    fn ingest(&mut self, samples: &[f32]) -> Completion {
        self.history.append(samples);
        self.spectrum.accumulate(samples.len(), &self.history);
        self.pacing.account(samples.len())
    }

    // -----------------------------------------------------------------------
    // Frequency-domain accessors
    // -----------------------------------------------------------------------

    /// Fill `out` with decibel magnitudes, one per frequency bin.
    ///
    /// Writes `min(out.len(), frequency_bin_count)` values, each clamped
    /// from below to `min_decibels`; the rest of `out` is left untouched.
    /// Returns the number of values written.
    pub fn float_frequency_data(&self, out: &mut [f32]) -> usize {
        let n = out.len().min(self.frequency_bin_count());
        let mags = self.spectrum.magnitudes();
        for (slot, &mag) in out[..n].iter_mut().zip(mags) {
            *slot = scaling::to_decibels(mag, self.config.min_decibels);
        }
        n
    }

    /// Fill `out` with byte-quantised decibel magnitudes
    /// (`min_decibels` → 0, `max_decibels` → 255, saturating above).
    /// Returns the number of values written.
    pub fn byte_frequency_data(&self, out: &mut [u8]) -> usize {
        let n = out.len().min(self.frequency_bin_count());
        let min_db = self.config.min_decibels;
        let scale = scaling::range_scale_factor(min_db, self.config.max_decibels);
        let mags = self.spectrum.magnitudes();
        for (slot, &mag) in out[..n].iter_mut().zip(mags) {
            *slot = scaling::byte_scale(scaling::to_decibels(mag, min_db), min_db, scale);
        }
        n
    }

    /// Freshly allocated decibel magnitudes.
    ///
    /// `size` defaults to [`frequency_bin_count`](Self::frequency_bin_count);
    /// the result length is `min(size, fft_size)`.
    pub fn frequency_data(&self, size: Option<usize>) -> Vec<f32> {
        let size = size
            .unwrap_or_else(|| self.frequency_bin_count())
            .min(self.config.fft_size);
        self.spectrum.magnitudes()[..size]
            .iter()
            .map(|&mag| scaling::to_decibels(mag, self.config.min_decibels))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Time-domain accessors
    // -----------------------------------------------------------------------

    /// Fill `out` with the most recent raw samples, in chronological order.
    ///
    /// Writes up to `min(out.len(), fft_size)` samples — fewer when the
    /// history is shorter. Returns the number of samples written.
    pub fn float_time_domain_data(&self, out: &mut [f32]) -> usize {
        let n = out.len().min(self.config.fft_size);
        let tail = self.history.snapshot(n);
        out[..tail.len()].copy_from_slice(&tail);
        tail.len()
    }

    /// Fill `out` with the most recent samples as unsigned bytes
    /// (silence = 128). Returns the number of samples written.
    pub fn byte_time_domain_data(&self, out: &mut [u8]) -> usize {
        let n = out.len().min(self.config.fft_size);
        let tail = self.history.snapshot(n);
        for (slot, &sample) in out.iter_mut().zip(&tail) {
            *slot = format::sample_to_u8(sample);
        }
        tail.len()
    }

    /// Freshly allocated copy of the most recent raw samples.
    ///
    /// `size` defaults to `fft_size`; the result length is
    /// `min(size, history length)`.
    pub fn time_data(&self, size: Option<usize>) -> Vec<f32> {
        let size = size.unwrap_or(self.config.fft_size);
        self.history.snapshot(size)
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// Number of frequency bins exposed by the default accessors
    /// (`fft_size / 2`).
    pub fn frequency_bin_count(&self) -> usize {
        self.config.frequency_bin_count()
    }

    /// The configuration this analyser was constructed with.
    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    /// The stream format this analyser was constructed with.
    pub fn pcm_format(&self) -> &PcmFormat {
        &self.pcm
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
