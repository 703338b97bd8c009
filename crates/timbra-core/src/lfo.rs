//! Drift oscillator: periodic low-frequency modulation.
//!
//! Two sine phases at incommensurate rates, summed. The beat between them
//! produces a slowly wandering modulation signal that never exactly
//! repeats at audible timescales — a deterministic, periodic stand-in for
//! chaotic modulation where predictability is preferred.

use core::f32::consts::TAU;
use libm::sinf;

/// Ratio of the secondary phase rate to the primary. Chosen away from any
/// small-integer ratio so the combined pattern repeats very slowly.
const SECONDARY_RATE_RATIO: f32 = 0.41421356; // sqrt(2) - 1

/// Low-frequency drift oscillator producing a smooth value in [-1, 1].
///
/// # Example
///
/// ```rust
/// use timbra_core::DriftLfo;
///
/// let mut lfo = DriftLfo::new(48000.0, 1.5);
/// let value = lfo.advance();
/// assert!((-1.0..=1.0).contains(&value));
/// ```
#[derive(Debug, Clone)]
pub struct DriftLfo {
    /// Primary phase position [0.0, 1.0)
    phase_a: f32,
    /// Secondary phase position [0.0, 1.0)
    phase_b: f32,
    /// Primary phase increment per sample
    inc_a: f32,
    /// Secondary phase increment per sample
    inc_b: f32,
    sample_rate: f32,
}

impl DriftLfo {
    /// Create a new drift oscillator.
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz
    /// * `rate_hz` - Primary oscillation rate in Hz (typical 0.1 to 8)
    pub fn new(sample_rate: f32, rate_hz: f32) -> Self {
        Self {
            phase_a: 0.0,
            phase_b: 0.0,
            inc_a: rate_hz / sample_rate,
            inc_b: rate_hz * SECONDARY_RATE_RATIO / sample_rate,
            sample_rate,
        }
    }

    /// Set the primary rate in Hz; the secondary follows at a fixed ratio.
    pub fn set_rate(&mut self, rate_hz: f32) {
        self.inc_a = rate_hz / self.sample_rate;
        self.inc_b = rate_hz * SECONDARY_RATE_RATIO / self.sample_rate;
    }

    /// Get the primary rate in Hz.
    pub fn rate(&self) -> f32 {
        self.inc_a * self.sample_rate
    }

    /// Reset both phases to zero.
    pub fn reset(&mut self) {
        self.phase_a = 0.0;
        self.phase_b = 0.0;
    }

    /// Advance one sample and return the drift value in [-1, 1].
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.phase_a += self.inc_a;
        if self.phase_a >= 1.0 {
            self.phase_a -= 1.0;
        }
        self.phase_b += self.inc_b;
        if self.phase_b >= 1.0 {
            self.phase_b -= 1.0;
        }

        // Weights sum to 1.0, keeping the combined signal inside [-1, 1]
        0.6 * sinf(self.phase_a * TAU) + 0.4 * sinf(self.phase_b * TAU)
    }
}
