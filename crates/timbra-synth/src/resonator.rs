//! Pitched comb/allpass resonator voice.
//!
//! Four feedback combs tuned to harmonic ratios of the base frequency feed
//! a pair of allpass diffusers. The voice is excited by an impulse plus a
//! short decaying burst on trigger; there is no continuous oscillator.

use timbra_core::{Diffuser, TunedComb, soft_clip, wet_dry_mix};

use crate::tuning::{MAX_FREQ, MIN_FREQ};

const COMB_COUNT: usize = 4;
const ALLPASS_COUNT: usize = 2;

/// Comb lengths relative to the base period. 1, 4/3, 3/2 and 2 give the
/// fundamental plus fourth, fifth and octave-down partials.
const COMB_RATIOS: [f32; COMB_COUNT] = [1.0, 1.3333, 1.5, 2.0];
const ALLPASS_RATIOS: [f32; ALLPASS_COUNT] = [0.5, 0.75];

/// Retune threshold in Hz. Pitch wobble below this (ADC noise on a CV
/// input) must not clear filter state and click.
const RETUNE_HYSTERESIS: f32 = 2.0;

/// Excitation burst decay per sample (roughly 10 ms to silence at 44.1 kHz).
const BURST_DECAY: f32 = 0.93;

/// Tuned resonator voice.
///
/// # Controls (all normalized 0..1, clamped internally)
///
/// - `feedback`: loop gain, 0.5 (fast decay) to 0.92 (long sustain)
/// - `damp`: high-frequency damping inside the comb feedback loops
/// - `mix`: 0 = raw comb sum (metallic), 1 = fully diffused (reverb-like)
///
/// The excitation level is a held parameter ([`set_excite`](Self::set_excite))
/// rather than a per-sample control, matching hardware where the knob is
/// read at trigger time.
#[derive(Debug, Clone)]
pub struct ResonatorVoice {
    sample_rate: f32,
    base_freq: f32,
    combs: [TunedComb; COMB_COUNT],
    diffusers: [Diffuser; ALLPASS_COUNT],
    excite_level: f32,
    /// Remaining burst energy, decays toward zero after each trigger.
    burst: f32,
    impulse_pending: bool,
}

impl ResonatorVoice {
    /// Create a new resonator at the given sample rate, tuned to 220 Hz.
    pub fn new(sample_rate: f32) -> Self {
        let mut voice = Self {
            sample_rate,
            base_freq: 220.0,
            combs: [
                TunedComb::new(TunedComb::MIN_LENGTH),
                TunedComb::new(TunedComb::MIN_LENGTH),
                TunedComb::new(TunedComb::MIN_LENGTH),
                TunedComb::new(TunedComb::MIN_LENGTH),
            ],
            diffusers: [
                Diffuser::new(Diffuser::MIN_LENGTH),
                Diffuser::new(Diffuser::MIN_LENGTH),
            ],
            excite_level: 0.6,
            burst: 0.0,
            impulse_pending: false,
        };
        voice.retune();
        voice
    }

    /// Set the resonant frequency in Hz, clamped to the playable range.
    ///
    /// Delay lengths only change when the frequency moves by more than
    /// 2 Hz, so ADC jitter on a pitch CV cannot cause per-sample retunes.
    pub fn set_frequency(&mut self, freq: f32) {
        let new_freq = freq.clamp(MIN_FREQ, MAX_FREQ);
        if (new_freq - self.base_freq).abs() > RETUNE_HYSTERESIS {
            self.base_freq = new_freq;
            self.retune();
        }
    }

    /// Current resonant frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.base_freq
    }

    /// Set the excitation burst level used by the next trigger.
    pub fn set_excite(&mut self, normalized: f32) {
        self.excite_level = normalized.clamp(0.0, 1.0);
    }

    /// Queue an impulse and restart the excitation burst.
    pub fn trigger(&mut self) {
        self.burst = self.excite_level;
        self.impulse_pending = true;
    }

    /// Clear all delay lines, filter state and pending excitation.
    pub fn reset(&mut self) {
        for comb in &mut self.combs {
            comb.clear();
        }
        for diffuser in &mut self.diffusers {
            diffuser.clear();
        }
        self.burst = 0.0;
        self.impulse_pending = false;
    }

    /// Generate one sample.
    ///
    /// # Arguments
    /// * `feedback`, `damp`, `mix` - normalized 0..1 controls
    /// * `envelope` - amplitude multiplier in 0..1
    #[inline]
    pub fn process(&mut self, feedback: f32, damp: f32, mix: f32, envelope: f32) -> f32 {
        let fb = 0.5 + feedback.clamp(0.0, 1.0) * 0.42;
        let damp = damp.clamp(0.0, 1.0);
        // More damping closes the lowpass down; alpha 0.95 at damp=0 is
        // nearly open, 0.3 at damp=1 rolls the loop off hard
        let damp_alpha = 0.3 + (1.0 - damp) * 0.65;

        let mut input = 0.0;
        if self.impulse_pending {
            input += 1.0 + self.excite_level * 0.5;
            self.impulse_pending = false;
        }
        if self.burst > 0.0001 {
            input += self.burst * (0.8 + self.excite_level * 0.4);
            self.burst *= BURST_DECAY;
        }

        let mut comb_sum = 0.0;
        for comb in &mut self.combs {
            comb.set_feedback(fb);
            comb.set_damping_alpha(damp_alpha);
            comb_sum += comb.process(input);
        }
        let comb_out = comb_sum / COMB_COUNT as f32;

        let mut diffused = comb_out;
        for diffuser in &mut self.diffusers {
            diffused = diffuser.process(diffused);
        }

        let output = wet_dry_mix(comb_out, diffused, mix.clamp(0.0, 1.0));

        // Comb averaging leaves the ring quiet; make up the gain before
        // the final saturation stage
        soft_clip(output * envelope * 10.0)
    }

    /// Current comb delay lengths in samples, for diagnostics and tests.
    pub fn comb_lengths(&self) -> [usize; COMB_COUNT] {
        [
            self.combs[0].length(),
            self.combs[1].length(),
            self.combs[2].length(),
            self.combs[3].length(),
        ]
    }

    /// Current allpass delay lengths in samples, for diagnostics and tests.
    pub fn allpass_lengths(&self) -> [usize; ALLPASS_COUNT] {
        [self.diffusers[0].length(), self.diffusers[1].length()]
    }

    fn retune(&mut self) {
        let period = self.sample_rate / self.base_freq;
        let base_delay = (period + 0.5) as usize;
        let base_delay = base_delay.clamp(16, TunedComb::CAPACITY - 1);

        for (comb, ratio) in self.combs.iter_mut().zip(COMB_RATIOS) {
            comb.retune((base_delay as f32 * ratio) as usize);
        }
        for (diffuser, ratio) in self.diffusers.iter_mut().zip(ALLPASS_RATIOS) {
            diffuser.retune((base_delay as f32 * ratio) as usize);
        }
    }
}
