//! Analyser configuration — defaults, validation and TOML persistence.
//!
//! [`AnalyserConfig`] is resolved once at construction and never mutated
//! afterwards; every component of the analyser reads from the same immutable
//! value. The scalar fields round-trip through TOML so host applications can
//! keep analyser settings in their settings file; the window function is not
//! serialised and falls back to [`crate::windows::blackman`] on load.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::windows::{self, WindowFn};

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Reason an analyser could not be constructed.
///
/// These are configuration errors, reported at construction time and fatal
/// to instance creation — steady-state operation raises no errors at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The transform primitive requires a power-of-two window length.
    #[error("fft_size must be a power of two, got {got}")]
    FftSizeNotPowerOfTwo { got: usize },

    /// A zero sample rate would poison the pacing arithmetic.
    #[error("sample_rate must be positive")]
    ZeroSampleRate,
}

// ---------------------------------------------------------------------------
// AnalyserConfig
// ---------------------------------------------------------------------------

/// Immutable analyser configuration.
///
/// | Field | Effect | Default |
/// |-------|--------|---------|
/// | `fft_size` | samples per spectral update (power of two) | 1024 |
/// | `buffer_size` | history capacity in samples | 44 100 |
/// | `smoothing_time_constant` | spectral smoothing factor, clamped to [0, 1] at use | 0.2 |
/// | `min_decibels` / `max_decibels` | floor / scale bounds for decibel and byte output | -100 / 0 |
/// | `throttle_ms` | pacing threshold in milliseconds; 0 disables pacing | 50 |
/// | `channel` | which interleaved channel to analyse | 0 |
/// | `window` | analysis window function | [`windows::blackman`] |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyserConfig {
    /// Analysis window length in samples. Must be a power of two.
    pub fft_size: usize,

    /// Capacity of the time-domain history buffer in samples.
    pub buffer_size: usize,

    /// Exponential-moving-average weight for successive spectra.
    ///
    /// 0.0 → the spectrum always equals the latest raw magnitudes;
    /// 1.0 → the spectrum never changes from its initial zero state.
    /// Values outside [0, 1] are clamped when the spectrum is updated.
    pub smoothing_time_constant: f32,

    /// Decibel floor for frequency-domain output. Non-finite decibel values
    /// (from zero magnitude) are clamped here, never surfaced.
    pub min_decibels: f32,

    /// Upper bound of the decibel range used when scaling to bytes.
    pub max_decibels: f32,

    /// Pacing threshold in milliseconds. When throughput exceeds roughly one
    /// chunk-completion per `throttle_ms`, completion is deferred to the next
    /// scheduling tick. 0 disables pacing entirely.
    pub throttle_ms: u64,

    /// Index of the interleaved channel to analyse.
    pub channel: u16,

    /// Window function applied to each analysis frame.
    ///
    /// Not serialised; restored to the Blackman default when a config is
    /// loaded from TOML.
    #[serde(skip, default = "default_window")]
    pub window: WindowFn,
}

fn default_window() -> WindowFn {
    windows::blackman
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 1024,
            buffer_size: 44_100,
            smoothing_time_constant: 0.2,
            min_decibels: -100.0,
            max_decibels: 0.0,
            throttle_ms: 50,
            channel: 0,
            window: windows::blackman,
        }
    }
}

impl AnalyserConfig {
    /// Check the construction precondition: `fft_size` must be a power of
    /// two (this also rejects 0).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fft_size.is_power_of_two() {
            return Err(ConfigError::FftSizeNotPowerOfTwo {
                got: self.fft_size,
            });
        }
        Ok(())
    }

    /// Number of frequency bins exposed by the default accessors:
    /// `fft_size / 2`.
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// The smoothing factor as actually applied: clamped to `[0, 1]`.
    pub fn smoothing(&self) -> f32 {
        self.smoothing_time_constant.clamp(0.0, 1.0)
    }

    /// Load a config from a TOML file (useful for host-app settings files).
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save this config to a TOML file, creating parent directories as
    /// needed. The window function is not persisted.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
