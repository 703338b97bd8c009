//! Top-level synthesis engine: voice selection, envelope, output guard
//! and level metering.

use crate::cascade::CascadeVoice;
use crate::envelope::AdEnvelope;
use crate::fm::FmVoice;
use crate::resonator::ResonatorVoice;
use crate::tuning::{MASTER_GAIN, MAX_FREQ, MIN_FREQ, SAMPLE_GUARD};

/// Selectable synthesis algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Voice {
    /// Additive harmonic cascade with chaotic modulation.
    #[default]
    Cascade,
    /// Two-operator FM with feedback and folding.
    Fm,
    /// Pitched comb/allpass resonator.
    Resonator,
}

/// Single-voice synthesizer engine.
///
/// Owns all three voices plus the shared envelope. Every voice keeps
/// running state even while deselected, so switching algorithms mid-note
/// lands on a voice that is ready to sound rather than one that must be
/// retriggered.
///
/// The output path applies master gain, replaces non-finite samples with
/// silence, hard-limits the result, and feeds a slow envelope follower
/// for metering.
///
/// # Example
///
/// ```rust
/// use timbra_synth::{Engine, Voice};
///
/// let mut engine = Engine::new(44100.0);
/// engine.set_voice(Voice::Fm);
/// engine.note_on(220.0);
///
/// for _ in 0..64 {
///     let sample = engine.process();
///     assert!(sample.is_finite());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    voice: Voice,
    cascade: CascadeVoice,
    fm: FmVoice,
    resonator: ResonatorVoice,
    envelope: AdEnvelope,

    frequency: f32,
    harmonic_spread: f32,
    cascade_amount: f32,
    wavefold: f32,
    chaos: f32,
    fm_index: f32,
    fm_ratio: f32,
    fm_feedback: f32,
    fm_fold: f32,
    verb_feedback: f32,
    verb_damp: f32,
    verb_mix: f32,

    gate_held: bool,
    /// Slow envelope follower driving the output meter.
    meter: f32,
}

impl Engine {
    /// Create a new engine at the given sample rate, all voices idle.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            voice: Voice::Cascade,
            cascade: CascadeVoice::new(sample_rate),
            fm: FmVoice::new(sample_rate),
            resonator: ResonatorVoice::new(sample_rate),
            envelope: AdEnvelope::new(sample_rate),
            frequency: 220.0,
            harmonic_spread: 0.5,
            cascade_amount: 0.5,
            wavefold: 0.0,
            chaos: 0.0,
            fm_index: 0.5,
            fm_ratio: 0.5,
            fm_feedback: 0.0,
            fm_fold: 0.0,
            verb_feedback: 0.5,
            verb_damp: 0.5,
            verb_mix: 0.5,
            gate_held: false,
            meter: 0.0,
        }
    }

    /// Select the active voice.
    ///
    /// Reselecting the current voice is a no-op. Switching into the
    /// resonator while the gate is held fires its excitation so the
    /// switched-to voice actually sounds; the other voices are free-running
    /// oscillators and need no kick.
    pub fn set_voice(&mut self, voice: Voice) {
        if voice == self.voice {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(from = ?self.voice, to = ?voice, "voice switch");
        self.voice = voice;
        if voice == Voice::Resonator && self.gate_held {
            self.resonator.trigger();
        }
    }

    /// Currently selected voice.
    pub fn voice(&self) -> Voice {
        self.voice
    }

    /// Set the pitch of all voices in Hz, clamped to the playable range.
    pub fn set_frequency(&mut self, freq: f32) {
        self.frequency = freq.clamp(MIN_FREQ, MAX_FREQ);
        self.cascade.set_frequency(self.frequency);
        self.fm.set_frequency(self.frequency);
        self.resonator.set_frequency(self.frequency);
    }

    /// Current pitch in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Envelope attack time from a normalized 0..1 control.
    pub fn set_attack(&mut self, normalized: f32) {
        self.envelope.set_attack(normalized);
    }

    /// Envelope decay time from a normalized 0..1 control.
    pub fn set_decay(&mut self, normalized: f32) {
        self.envelope.set_decay(normalized);
    }

    /// Cascade voice: active harmonic count.
    pub fn set_harmonic_spread(&mut self, normalized: f32) {
        self.harmonic_spread = normalized.clamp(0.0, 1.0);
    }

    /// Cascade voice: harmonic amplitude rolloff.
    pub fn set_cascade_amount(&mut self, normalized: f32) {
        self.cascade_amount = normalized.clamp(0.0, 1.0);
    }

    /// Cascade voice: wave-folding depth.
    pub fn set_wavefold(&mut self, normalized: f32) {
        self.wavefold = normalized.clamp(0.0, 1.0);
    }

    /// Cascade voice: chaotic modulation depth.
    pub fn set_chaos(&mut self, normalized: f32) {
        self.chaos = normalized.clamp(0.0, 1.0);
    }

    /// FM voice: modulation index.
    pub fn set_fm_index(&mut self, normalized: f32) {
        self.fm_index = normalized.clamp(0.0, 1.0);
    }

    /// FM voice: modulator frequency ratio.
    pub fn set_fm_ratio(&mut self, normalized: f32) {
        self.fm_ratio = normalized.clamp(0.0, 1.0);
    }

    /// FM voice: modulator self-feedback.
    pub fn set_fm_feedback(&mut self, normalized: f32) {
        self.fm_feedback = normalized.clamp(0.0, 1.0);
    }

    /// FM voice: post-FM folding depth.
    pub fn set_fm_fold(&mut self, normalized: f32) {
        self.fm_fold = normalized.clamp(0.0, 1.0);
    }

    /// Resonator voice: loop gain (sustain length).
    pub fn set_verb_feedback(&mut self, normalized: f32) {
        self.verb_feedback = normalized.clamp(0.0, 1.0);
    }

    /// Resonator voice: high-frequency damping.
    pub fn set_verb_damp(&mut self, normalized: f32) {
        self.verb_damp = normalized.clamp(0.0, 1.0);
    }

    /// Resonator voice: comb/diffusion blend.
    pub fn set_verb_mix(&mut self, normalized: f32) {
        self.verb_mix = normalized.clamp(0.0, 1.0);
    }

    /// Resonator excitation burst level for the next trigger.
    pub fn set_verb_excite(&mut self, normalized: f32) {
        self.resonator.set_excite(normalized);
    }

    /// Drive the gate input. Rising edges trigger every voice and the
    /// envelope; falling edges release the envelope only, so the decay
    /// tail keeps sounding.
    pub fn gate(&mut self, on: bool) {
        if on && !self.gate_held {
            self.cascade.trigger();
            self.fm.trigger();
            self.resonator.trigger();
            self.envelope.trigger();
        } else if !on && self.gate_held {
            self.envelope.release();
        }
        self.gate_held = on;
    }

    /// Whether the gate input is currently held high.
    pub fn gate_held(&self) -> bool {
        self.gate_held
    }

    /// Start a note: set pitch, fully reset every voice, then trigger.
    /// Unlike [`gate`](Self::gate), this always restarts even if a note
    /// is already held.
    pub fn note_on(&mut self, freq: f32) {
        self.set_frequency(freq);
        self.cascade.reset();
        self.fm.reset();
        self.resonator.reset();
        self.cascade.trigger();
        self.fm.trigger();
        self.resonator.trigger();
        self.envelope.trigger();
        self.gate_held = true;
    }

    /// Release the current note into its decay stage.
    pub fn note_off(&mut self) {
        self.envelope.release();
        self.gate_held = false;
    }

    /// Generate one output sample.
    #[inline]
    pub fn process(&mut self) -> f32 {
        let env = self.envelope.advance();

        let mut sample = match self.voice {
            Voice::Cascade => self.cascade.process(
                self.harmonic_spread,
                self.cascade_amount,
                self.wavefold,
                self.chaos,
                env,
            ),
            Voice::Fm => self
                .fm
                .process(self.fm_index, self.fm_ratio, self.fm_feedback, self.fm_fold, env),
            Voice::Resonator => self
                .resonator
                .process(self.verb_feedback, self.verb_damp, self.verb_mix, env),
        };

        sample *= MASTER_GAIN;

        // A NaN or infinity must never reach the DAC
        if !sample.is_finite() {
            sample = 0.0;
        }
        sample = sample.clamp(-SAMPLE_GUARD, SAMPLE_GUARD);

        self.meter = self.meter * 0.999 + sample.abs() * 0.001;

        sample
    }

    /// Fill a buffer with consecutive output samples.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for slot in buffer {
            *slot = self.process();
        }
    }

    /// Whether the envelope is producing a non-zero level.
    pub fn is_playing(&self) -> bool {
        self.envelope.is_active()
    }

    /// Smoothed output level for metering, scaled into 0..1.
    pub fn output_level(&self) -> f32 {
        (self.meter * 2.0).min(1.0)
    }

    /// Current envelope stage (diagnostic).
    pub fn envelope_stage(&self) -> crate::envelope::EnvelopeStage {
        self.envelope.stage()
    }

    /// Current envelope level (diagnostic).
    pub fn envelope_level(&self) -> f32 {
        self.envelope.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 44100.0;

    #[test]
    fn test_silent_by_default() {
        let mut engine = Engine::new(SR);
        for _ in 0..1000 {
            assert_eq!(engine.process(), 0.0);
        }
        assert!(!engine.is_playing());
        assert_eq!(engine.output_level(), 0.0);
    }

    #[test]
    fn test_note_on_produces_audio() {
        for voice in [Voice::Cascade, Voice::Fm, Voice::Resonator] {
            let mut engine = Engine::new(SR);
            engine.set_voice(voice);
            engine.note_on(220.0);

            let mut peak = 0.0f32;
            for _ in 0..4410 {
                peak = peak.max(engine.process().abs());
            }
            assert!(peak > 0.01, "{:?} stayed silent: peak {}", voice, peak);
            assert!(engine.is_playing());
        }
    }

    #[test]
    fn test_output_within_guard_rails() {
        let mut engine = Engine::new(SR);
        engine.set_voice(Voice::Resonator);
        engine.set_verb_feedback(1.0);
        engine.set_verb_damp(0.0);
        engine.note_on(MIN_FREQ);

        for _ in 0..44_100 {
            let s = engine.process();
            assert!(s.is_finite());
            assert!(s.abs() <= SAMPLE_GUARD);
        }
    }

    #[test]
    fn test_set_voice_is_idempotent() {
        let mut engine = Engine::new(SR);
        engine.note_on(220.0);
        engine.set_voice(Voice::Fm);

        let mut a = engine.clone();
        a.set_voice(Voice::Fm);
        for _ in 0..1000 {
            assert_eq!(engine.process(), a.process());
        }
    }

    #[test]
    fn test_switch_to_resonator_mid_note_rings() {
        let mut engine = Engine::new(SR);
        engine.set_voice(Voice::Cascade);
        engine.note_on(220.0);
        // Let the resonator's initial trigger ring out completely
        for _ in 0..88_200 {
            engine.process();
        }

        engine.set_voice(Voice::Resonator);
        let mut energy = 0.0f32;
        for _ in 0..4410 {
            energy += engine.process().abs();
        }
        assert!(energy > 0.1, "Resonator should ring on mid-note switch");
    }

    #[test]
    fn test_switch_to_resonator_without_gate_stays_quiet() {
        let mut engine = Engine::new(SR);
        // Drain the constructor-fresh state without ever gating
        for _ in 0..1000 {
            engine.process();
        }
        engine.set_voice(Voice::Resonator);
        for _ in 0..1000 {
            assert_eq!(engine.process(), 0.0);
        }
    }

    #[test]
    fn test_gate_falling_edge_keeps_decay_tail() {
        let mut engine = Engine::new(SR);
        engine.set_attack(0.0);
        engine.set_decay(0.5);
        engine.gate(true);
        for _ in 0..4410 {
            engine.process();
        }
        engine.gate(false);

        assert!(engine.is_playing(), "Decay tail should outlive the gate");
        let mut energy = 0.0f32;
        for _ in 0..4410 {
            energy += engine.process().abs();
        }
        assert!(energy > 0.0);
    }

    #[test]
    fn test_meter_tracks_output() {
        let mut engine = Engine::new(SR);
        engine.note_on(220.0);
        for _ in 0..44_100 {
            engine.process();
        }
        let level = engine.output_level();
        assert!(level > 0.0 && level <= 1.0, "Meter out of range: {}", level);
    }

    #[test]
    fn test_render_matches_process() {
        let mut a = Engine::new(SR);
        let mut b = Engine::new(SR);
        a.note_on(330.0);
        b.note_on(330.0);

        let mut block = [0.0f32; 256];
        a.render(&mut block);
        for (i, &s) in block.iter().enumerate() {
            assert_eq!(s, b.process(), "Mismatch at sample {}", i);
        }
    }

    #[test]
    fn test_frequency_clamped() {
        let mut engine = Engine::new(SR);
        engine.set_frequency(5.0);
        assert_eq!(engine.frequency(), MIN_FREQ);
        engine.set_frequency(5000.0);
        assert_eq!(engine.frequency(), MAX_FREQ);
    }
}
