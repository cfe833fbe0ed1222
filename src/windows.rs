//! Analysis window functions.
//!
//! A window is any `fn(index, length) -> weight` curve applied to an
//! analysis frame before the forward transform to reduce spectral leakage.
//! [`blackman`] is the default used by [`crate::AnalyserConfig`]; the
//! coefficients below are fixed so the curve is reproducible bit-for-bit
//! across builds.

/// Weighting curve applied to an analysis frame: `(index, length) → weight`.
pub type WindowFn = fn(usize, usize) -> f32;

// ---------------------------------------------------------------------------
// Window functions
// ---------------------------------------------------------------------------

/// Blackman window: `0.42 - 0.5·cos(2πi/(N-1)) + 0.08·cos(4πi/(N-1))`.
///
/// The default analysis window. Endpoints are (numerically) zero; the peak
/// weight at the frame centre is 1.0.
pub fn blackman(i: usize, n: usize) -> f32 {
    if n <= 1 {
        return 1.0;
    }
    let x = i as f32 / (n - 1) as f32;
    let tau = std::f32::consts::TAU;
    0.42 - 0.5 * (tau * x).cos() + 0.08 * (2.0 * tau * x).cos()
}

/// Hann window: `0.5·(1 - cos(2πi/(N-1)))`.
pub fn hann(i: usize, n: usize) -> f32 {
    if n <= 1 {
        return 1.0;
    }
    let x = i as f32 / (n - 1) as f32;
    0.5 * (1.0 - (std::f32::consts::TAU * x).cos())
}

/// Hamming window: `0.54 - 0.46·cos(2πi/(N-1))`.
pub fn hamming(i: usize, n: usize) -> f32 {
    if n <= 1 {
        return 1.0;
    }
    let x = i as f32 / (n - 1) as f32;
    0.54 - 0.46 * (std::f32::consts::TAU * x).cos()
}

/// Rectangular window: weight 1.0 everywhere (no windowing).
pub fn rectangular(_i: usize, _n: usize) -> f32 {
    1.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
