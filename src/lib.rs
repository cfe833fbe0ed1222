//! Pass-through audio analysis stage.
//!
//! An [`Analyser`] sits inline in an audio pipeline: chunks flow through it
//! unmodified while it incrementally maintains time-domain and
//! frequency-domain views of the most recent signal history — the role a
//! platform analyser node plays in visualisation tooling (spectrum and
//! waveform displays, VU meters).
//!
//! # Pipeline
//!
//! ```text
//! upstream chunk → extract_channel → SampleHistory
//!               → SpectrumEngine (every fft_size new samples)
//!               → pacing decision → chunk forwarded downstream
//! ```
//!
//! Output is pull-based: call the accessors ([`Analyser::frequency_data`],
//! [`Analyser::time_data`], and the buffer-filling variants) at any time;
//! they always reflect the most recently processed chunk.
//!
//! # Quick Start
//!
//! ```rust
//! use audio_analyser::{Analyser, AnalyserConfig, PcmFormat, SampleFormat};
//!
//! let format = PcmFormat {
//!     sample_rate: 44_100,
//!     channels: 1,
//!     sample_format: SampleFormat::F32,
//! };
//! let config = AnalyserConfig {
//!     fft_size: 64,
//!     ..Default::default()
//! };
//! let mut analyser = Analyser::new(config, format).unwrap();
//!
//! // Feed one full analysis window of normalised samples.
//! let samples: Vec<f32> = (0..64).map(|i| (i as f32 * 0.1).sin()).collect();
//! analyser.consume_frames(&samples);
//!
//! // fft_size / 2 decibel bins, clamped to min_decibels at the bottom.
//! let spectrum = analyser.frequency_data(None);
//! assert_eq!(spectrum.len(), 32);
//! ```
//!
//! For streaming use, wrap the analyser in an [`AnalyserStage`] and run it
//! over `tokio` mpsc channels — see the [`stage`] module.

pub mod analyser;
pub mod config;
pub mod format;
pub mod stage;
pub mod windows;

pub use analyser::{Analyser, Completion};
pub use config::{AnalyserConfig, ConfigError};
pub use format::{PcmFormat, SampleFormat};
pub use stage::{AnalyserStage, SharedAnalyser};
