//! Two-operator FM voice with modulator feedback and sine folding.

use core::f32::consts::{PI, TAU};
use libm::sinf;
use timbra_core::{exp_map, soft_clip, wet_dry_mix};

use crate::tuning::{MAX_FREQ, MIN_FREQ};

/// Modulation index range, mapped exponentially from the normalized control.
const MIN_INDEX: f32 = 0.15;
const MAX_INDEX: f32 = 8.0;

/// Two-operator FM voice.
///
/// A single modulator operator phase-modulates a single carrier. The
/// modulator feeds back into its own phase through the previous sample's
/// output, scaled to at most 0.9 so the loop cannot run away. A sine
/// folder after the carrier adds further harmonics at high `fold`.
///
/// # Controls (all normalized 0..1, clamped internally)
///
/// - `index`: modulation depth, exponential 0.15..8.0
/// - `ratio`: modulator/carrier frequency ratio, linear 0.25x..6x
/// - `feedback`: modulator self-feedback, 0..0.9
/// - `fold`: post-FM sine folding depth
#[derive(Debug, Clone)]
pub struct FmVoice {
    sample_rate: f32,
    base_freq: f32,
    carrier_phase: f32,
    mod_phase: f32,
    /// Previous modulator output, for single-sample feedback.
    last_mod: f32,
}

impl FmVoice {
    /// Create a new FM voice at the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            base_freq: 220.0,
            carrier_phase: 0.0,
            mod_phase: 0.0,
            last_mod: 0.0,
        }
    }

    /// Set the carrier frequency in Hz, clamped to the playable range.
    pub fn set_frequency(&mut self, freq: f32) {
        self.base_freq = freq.clamp(MIN_FREQ, MAX_FREQ);
    }

    /// Current carrier frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.base_freq
    }

    /// Reset both operator phases and the feedback state.
    pub fn reset(&mut self) {
        self.carrier_phase = 0.0;
        self.mod_phase = 0.0;
        self.last_mod = 0.0;
    }

    /// Restart from zero phase for a clean, deterministic attack.
    pub fn trigger(&mut self) {
        self.reset();
    }

    /// Generate one sample.
    ///
    /// # Arguments
    /// * `index`, `ratio`, `feedback`, `fold` - normalized 0..1 controls
    /// * `envelope` - amplitude multiplier in 0..1
    #[inline]
    pub fn process(
        &mut self,
        index: f32,
        ratio: f32,
        feedback: f32,
        fold: f32,
        envelope: f32,
    ) -> f32 {
        let ratio_val = 0.25 + ratio.clamp(0.0, 1.0) * 5.75;
        let index_val = exp_map(index, MIN_INDEX, MAX_INDEX);
        let feedback_val = feedback.clamp(0.0, 1.0) * 0.9;

        self.mod_phase += (self.base_freq * ratio_val) / self.sample_rate;
        if self.mod_phase >= 1.0 {
            self.mod_phase -= 1.0;
        }

        let mod_input = self.mod_phase + self.last_mod * feedback_val;
        let mod_signal = sinf(mod_input * TAU);
        self.last_mod = mod_signal;

        self.carrier_phase += self.base_freq / self.sample_rate;
        if self.carrier_phase >= 1.0 {
            self.carrier_phase -= 1.0;
        }

        let phase = self.carrier_phase + mod_signal * index_val * 0.2;
        let mut output = sinf(phase * TAU);

        if fold > 0.01 {
            let drive = 1.0 + fold * 4.0;
            let folded = sinf(output * drive * PI);
            output = wet_dry_mix(output, folded, fold);
        }

        soft_clip(output * envelope)
    }
}
