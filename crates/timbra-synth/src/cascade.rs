//! Additive harmonic-cascade voice.
//!
//! Up to eight harmonically related sine partials with controls for
//! harmonic count (spread), amplitude rolloff (cascade), post-synthesis
//! wave-folding, and chaos-driven amplitude movement weighted toward the
//! upper partials.

use core::f32::consts::TAU;
use libm::sinf;
use timbra_core::{LorenzAttractor, ModulationSource, lerp, soft_clip, triangle_fold, wet_dry_mix};

use crate::tuning::{MAX_FREQ, MAX_HARMONICS, MIN_FREQ};

/// Floor on the chaos amplitude multiplier. Keeps deep chaos settings from
/// silencing or inverting a partial outright.
const CHAOS_FLOOR: f32 = 0.15;

/// Additive voice with a pluggable modulation source.
///
/// The modulation source defaults to a [`LorenzAttractor`]; any
/// [`ModulationSource`] (e.g. [`DriftLfo`](timbra_core::DriftLfo)) can be
/// substituted without changing the voice's behavior contract.
///
/// # Controls (all normalized 0..1, clamped internally)
///
/// - `spread`: active harmonic count, 1 at 0.0 up to all 8 at 1.0
/// - `cascade`: amplitude rolloff, equal amplitudes at 0.0 to 1/n at 1.0
/// - `wavefold`: post-synthesis triangle folding depth
/// - `chaos`: modulation depth on the upper partials; 0.0 is exactly a no-op
///
/// # Example
///
/// ```rust
/// use timbra_synth::CascadeVoice;
///
/// let mut voice = CascadeVoice::new(44100.0);
/// voice.set_frequency(220.0);
/// voice.trigger();
///
/// let sample = voice.process(1.0, 0.5, 0.0, 0.0, 1.0);
/// assert!(sample.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct CascadeVoice<M = LorenzAttractor> {
    sample_rate: f32,
    base_freq: f32,
    /// Per-partial phase accumulators in [0, 1).
    phases: [f32; MAX_HARMONICS],
    modulation: M,
}

impl CascadeVoice<LorenzAttractor> {
    /// Create a new cascade voice with the default chaotic modulation source.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_modulation(sample_rate, LorenzAttractor::new(sample_rate))
    }
}

impl<M: ModulationSource> CascadeVoice<M> {
    /// Create a cascade voice driven by the given modulation source.
    pub fn with_modulation(sample_rate: f32, modulation: M) -> Self {
        Self {
            sample_rate,
            base_freq: 220.0,
            phases: [0.0; MAX_HARMONICS],
            modulation,
        }
    }

    /// Set the fundamental frequency in Hz, clamped to the playable range.
    pub fn set_frequency(&mut self, freq: f32) {
        self.base_freq = freq.clamp(MIN_FREQ, MAX_FREQ);
    }

    /// Current fundamental frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.base_freq
    }

    /// Reset partial phases for a clean attack.
    pub fn trigger(&mut self) {
        self.phases = [0.0; MAX_HARMONICS];
    }

    /// Full reset: partial phases and the modulation source.
    pub fn reset(&mut self) {
        self.phases = [0.0; MAX_HARMONICS];
        self.modulation.reset();
    }

    /// Number of active partials for a given spread control:
    /// `1 + floor(spread * (MAX_HARMONICS - 1))`, monotonic in spread.
    pub fn harmonic_count(spread: f32) -> usize {
        1 + (spread.clamp(0.0, 1.0) * (MAX_HARMONICS - 1) as f32) as usize
    }

    /// Generate one sample.
    ///
    /// # Arguments
    /// * `spread`, `cascade`, `wavefold`, `chaos` - normalized 0..1 controls
    /// * `envelope` - amplitude multiplier in 0..1
    #[inline]
    pub fn process(
        &mut self,
        spread: f32,
        cascade: f32,
        wavefold: f32,
        chaos: f32,
        envelope: f32,
    ) -> f32 {
        let chaos = chaos.clamp(0.0, 1.0);
        let cascade = cascade.clamp(0.0, 1.0);
        let wavefold = wavefold.clamp(0.0, 1.0);

        // The modulation source advances every sample regardless of depth
        // so engaging the chaos control picks up mid-trajectory motion.
        let chaos_norm = 0.5 + 0.5 * self.modulation.advance();

        let num_harmonics = Self::harmonic_count(spread);

        let mut output = 0.0;
        let mut total_amp = 0.0;

        for i in 0..num_harmonics {
            let harmonic = (i + 1) as f32;

            // Interpolate between equal amplitude and 1/n rolloff
            let mut amp = lerp(1.0, 1.0 / harmonic, cascade);

            // Chaos leans on the upper partials; the fundamental stays put
            // when more than one partial is active
            let chaos_weight = if num_harmonics > 1 {
                i as f32 / (num_harmonics - 1) as f32
            } else {
                1.0
            };
            let chaos_mod = 1.0 + chaos * chaos_weight * (chaos_norm - 0.5) * 1.8;
            amp *= chaos_mod.max(CHAOS_FLOOR);

            let freq = self.base_freq * harmonic;

            // Anti-aliasing: partials near Nyquist are skipped entirely
            if freq > self.sample_rate * 0.45 {
                continue;
            }

            self.phases[i] += freq / self.sample_rate;
            if self.phases[i] >= 1.0 {
                self.phases[i] -= 1.0;
            }

            output += sinf(self.phases[i] * TAU) * amp;
            total_amp += amp;
        }

        // Normalize so stacking partials cannot push past unity
        if total_amp > 1.0 {
            output /= total_amp;
        }

        if wavefold > 0.01 {
            let drive = 1.0 + wavefold * 4.0;
            let folded = triangle_fold(output * drive);
            output = wet_dry_mix(output, folded, wavefold);
        }

        soft_clip(output * envelope)
    }
}
