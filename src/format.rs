//! PCM format descriptor and boundary sample conversions.
//!
//! Everything inside the analyser is normalised `f32`; conversions happen at
//! exactly two boundaries — input extraction ([`extract_channel`],
//! [`select_channel`]) and byte-domain output ([`sample_to_u8`]).
//!
//! Chunks carry raw interleaved little-endian PCM described by a
//! [`PcmFormat`] attached to the analyser at construction, not renegotiated
//! per chunk.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SampleFormat
// ---------------------------------------------------------------------------

/// On-the-wire encoding of a single sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleFormat {
    /// Unsigned 8-bit, 128 = silence.
    U8,
    /// Signed 16-bit little-endian.
    I16,
    /// 32-bit float little-endian, already in `[-1.0, 1.0]`.
    F32,
}

impl SampleFormat {
    /// Width of one encoded sample in bytes.
    pub fn bytes_per_sample(self) -> usize {
        match self {
            SampleFormat::U8 => 1,
            SampleFormat::I16 => 2,
            SampleFormat::F32 => 4,
        }
    }
}

// ---------------------------------------------------------------------------
// PcmFormat
// ---------------------------------------------------------------------------

/// Stream format descriptor: sample rate, channel count and sample encoding.
///
/// The default matches the common CD-style wire format: 44.1 kHz, stereo,
/// signed 16-bit little-endian, interleaved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PcmFormat {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of interleaved channels (1 = mono, 2 = stereo, …).
    pub channels: u16,
    /// Encoding of each sample.
    pub sample_format: SampleFormat,
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 2,
            sample_format: SampleFormat::I16,
        }
    }
}

// ---------------------------------------------------------------------------
// Channel extraction
// ---------------------------------------------------------------------------

/// Decode one channel of raw interleaved PCM into normalised `f32` samples.
///
/// A trailing partial frame is ignored. A channel index outside the format's
/// channel count yields an empty vector (logged at `warn`), never an error.
///
/// # Example
///
/// ```rust
/// use audio_analyser::format::{extract_channel, PcmFormat, SampleFormat};
///
/// let format = PcmFormat {
///     sample_rate: 44_100,
///     channels: 2,
///     sample_format: SampleFormat::I16,
/// };
/// // One stereo frame: left = i16::MAX, right = 0.
/// let data = [0xff, 0x7f, 0x00, 0x00];
/// let left = extract_channel(&data, &format, 0);
/// assert!((left[0] - 1.0).abs() < 1e-3);
/// ```
pub fn extract_channel(data: &[u8], format: &PcmFormat, channel: u16) -> Vec<f32> {
    if format.channels == 0 || channel >= format.channels {
        log::warn!(
            "extract_channel: channel {} out of range for {}-channel format",
            channel,
            format.channels
        );
        return Vec::new();
    }

    let bps = format.sample_format.bytes_per_sample();
    let stride = format.channels as usize * bps;
    let offset = channel as usize * bps;

    data.chunks_exact(stride)
        .map(|frame| decode_sample(&frame[offset..offset + bps], format.sample_format))
        .collect()
}

/// Select one channel from interleaved `f32` frames (the form audio
/// callbacks usually deliver). Mono input is returned as-is.
pub fn select_channel(frames: &[f32], channels: u16, channel: u16) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 if channel == 0 => frames.to_vec(),
        n if channel < n => frames
            .chunks_exact(n as usize)
            .map(|frame| frame[channel as usize])
            .collect(),
        n => {
            log::warn!("select_channel: channel {channel} out of range for {n}-channel frames");
            Vec::new()
        }
    }
}

fn decode_sample(bytes: &[u8], format: SampleFormat) -> f32 {
    match format {
        SampleFormat::U8 => (bytes[0] as f32 - 128.0) / 128.0,
        SampleFormat::I16 => i16::from_le_bytes([bytes[0], bytes[1]]) as f32 / 32_768.0,
        SampleFormat::F32 => f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
    }
}

// ---------------------------------------------------------------------------
// Sample conversion
// ---------------------------------------------------------------------------

/// Convert a normalised `f32` sample to its unsigned 8-bit representation
/// (used by the byte-domain time accessor). Silence (0.0) maps to 128.
pub fn sample_to_u8(sample: f32) -> u8 {
    ((sample.clamp(-1.0, 1.0) + 1.0) * 0.5 * 255.0).round() as u8
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
