//! One-pole lowpass filter for feedback-path damping.
//!
//! A single-pole IIR lowpass with the difference equation:
//!
//! ```text
//! y[n] = y[n-1] + alpha * (x[n] - y[n-1])
//! ```
//!
//! This is the simplest possible lowpass — 6 dB/octave rolloff, zero
//! latency, one multiply per sample. Used for high-frequency damping inside
//! resonant feedback loops, where the coefficient is derived directly from
//! a normalized damping control rather than from a cutoff in Hz.

use crate::flush_denormal;

/// One-pole (6 dB/oct) lowpass filter with a direct-coefficient API.
///
/// # Parameters
///
/// - `alpha`: Blend factor toward the input per sample, in (0, 1].
///   1.0 passes the input through unchanged; small values smooth heavily.
///
/// # Invariants
///
/// - `alpha` is always in [0, 1] for stable operation
/// - `state` is flushed to zero when below 1e-20 (denormal protection)
#[derive(Debug, Clone)]
pub struct OnePole {
    state: f32,
    alpha: f32,
}

impl OnePole {
    /// Create a new one-pole lowpass with the given blend coefficient.
    pub fn new(alpha: f32) -> Self {
        Self {
            state: 0.0,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Set the blend coefficient (0.0 to 1.0).
    ///
    /// Higher values track the input faster (less smoothing).
    #[inline]
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Get the current blend coefficient.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Process one sample through the lowpass filter.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state = flush_denormal(self.state + self.alpha * (input - self.state));
        self.state
    }

    /// Reset filter state to zero.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    /// Reset filter state to an arbitrary starting value.
    ///
    /// Useful when the settled value is known up front and sweeping in
    /// from zero would be audible.
    pub fn reset_to(&mut self, state: f32) {
        self.state = state;
    }
}
