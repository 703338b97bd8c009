//! Control conditioning: CV + knob combination, smoothing, pitch mapping.
//!
//! Raw panel readings are noisy and stepped; applying them straight to the
//! engine produces zipper noise and pitch jitter. The control path combines
//! each knob with its centered CV input, smooths the result with a one-pole
//! filter at control rate, and maps the pitch channel exponentially onto
//! the playable range.

use libm::powf;
use timbra_core::OnePole;
use timbra_synth::Engine;
use timbra_synth::tuning::{MAX_FREQ, MIN_FREQ};

use crate::ParamFrame;

/// Bipolar CV modulation depth around the knob position.
pub const CV_MOD_AMOUNT: f32 = 0.5;
/// Smoothing coefficient for the pitch channel. Heavier than the timbre
/// channels so stepped CV quantizers still glide cleanly.
pub const PITCH_SMOOTH_ALPHA: f32 = 0.3;
/// Smoothing coefficient for the timbre channels.
pub const PARAM_SMOOTH_ALPHA: f32 = 0.1;

/// Combine a knob position with its centered CV input.
///
/// CV at 0.5 contributes nothing; full-scale CV swings the combined value
/// by `±CV_MOD_AMOUNT` around the knob. The result is clamped to 0..1.
pub fn combine(knob: f32, cv: f32) -> f32 {
    (knob + (cv - 0.5) * CV_MOD_AMOUNT * 2.0).clamp(0.0, 1.0)
}

/// Map a normalized pitch value exponentially onto the playable range,
/// one octave per equal step of the control.
pub fn pitch_to_freq(normalized: f32) -> f32 {
    MIN_FREQ * powf(MAX_FREQ / MIN_FREQ, normalized.clamp(0.0, 1.0))
}

/// Conditions raw [`ParamFrame`]s and drives an [`Engine`].
///
/// Called once per control tick with the latest frame; holds the smoothing
/// state between ticks. The smoothed channels start at 0.5 (panel center)
/// so power-on does not sweep from silence.
#[derive(Debug, Clone)]
pub struct ControlPath {
    pitch: OnePole,
    spread: OnePole,
    cascade: OnePole,
}

impl Default for ControlPath {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlPath {
    /// Create a control path with all channels settled at panel center.
    pub fn new() -> Self {
        let mut pitch = OnePole::new(PITCH_SMOOTH_ALPHA);
        let mut spread = OnePole::new(PARAM_SMOOTH_ALPHA);
        let mut cascade = OnePole::new(PARAM_SMOOTH_ALPHA);
        for channel in [&mut pitch, &mut spread, &mut cascade] {
            channel.reset_to(0.5);
        }
        Self {
            pitch,
            spread,
            cascade,
        }
    }

    /// Condition one frame and push every resulting value into the engine.
    ///
    /// The gate is applied last so a frame that both changes parameters and
    /// fires a note triggers with the new settings in place.
    pub fn apply(&mut self, engine: &mut Engine, frame: &ParamFrame) {
        engine.set_voice(frame.voice);

        engine.set_attack(frame.attack);
        engine.set_decay(frame.decay);
        engine.set_wavefold(frame.wavefold);
        engine.set_chaos(frame.chaos);
        engine.set_fm_feedback(frame.fm_feedback);
        engine.set_fm_fold(frame.fm_fold);
        engine.set_verb_mix(frame.verb_mix);
        engine.set_verb_excite(frame.verb_excite);

        let pitch = self.pitch.process(combine(frame.knob[2], frame.cv[2]));
        engine.set_frequency(pitch_to_freq(pitch));

        let spread = self.spread.process(combine(frame.knob[0], frame.cv[0]));
        engine.set_harmonic_spread(spread);
        engine.set_fm_index(spread);
        engine.set_verb_feedback(spread);

        let cascade = self.cascade.process(combine(frame.knob[1], frame.cv[1]));
        engine.set_cascade_amount(cascade);
        engine.set_fm_ratio(cascade);
        engine.set_verb_damp(cascade);

        engine.gate(frame.gate);
    }
}
