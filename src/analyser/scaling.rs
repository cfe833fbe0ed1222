//! Magnitude-to-decibel conversion and byte quantisation.
//!
//! Pure functions over the internal float representations; no state. The
//! byte scaling formula maps `min_decibels` → 0 and `max_decibels` → 255,
//! with values above the top of the range railing at 255 through the
//! saturating cast.

// ---------------------------------------------------------------------------
// Decibel conversion
// ---------------------------------------------------------------------------

/// Amplitude-to-decibel conversion, `20·log10(x)`, clamped from below to
/// `min_decibels`.
///
/// Zero magnitude converts to negative infinity; the clamp guarantees the
/// result is always finite and ≥ `min_decibels`.
pub fn to_decibels(magnitude: f32, min_decibels: f32) -> f32 {
    let db = 20.0 * magnitude.log10();
    if db.is_finite() {
        db.max(min_decibels)
    } else {
        min_decibels
    }
}

// ---------------------------------------------------------------------------
// Byte quantisation
// ---------------------------------------------------------------------------

/// Reciprocal of the decibel range, with a fallback factor of 1 when the
/// range is empty (`max == min`) so the scaling never divides by zero.
pub fn range_scale_factor(min_decibels: f32, max_decibels: f32) -> f32 {
    if max_decibels == min_decibels {
        1.0
    } else {
        1.0 / (max_decibels - min_decibels)
    }
}

/// Quantise a clamped decibel value into the 0–255 range.
///
/// `db` is expected to be ≥ `min_decibels` (the output of [`to_decibels`]),
/// so the scaled value is non-negative; values above the top of the decibel
/// range saturate at 255.
pub fn byte_scale(db: f32, min_decibels: f32, range_scale: f32) -> u8 {
    (255.0 * (db - min_decibels) * range_scale) as u8
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
