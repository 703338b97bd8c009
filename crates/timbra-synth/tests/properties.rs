//! Property-based tests for the timbra-synth engine and voices.
//!
//! Tests output safety across the whole control space, delay tuning laws,
//! and envelope range invariants using proptest for randomized input
//! generation.

use proptest::prelude::*;
use timbra_synth::{
    AdEnvelope, Engine, FmVoice, ResonatorVoice, Voice,
    tuning::{MAX_FREQ, MIN_FREQ, SAMPLE_GUARD},
};

const SR: f32 = 44100.0;

fn voice_from_index(index: usize) -> Voice {
    match index % 3 {
        0 => Voice::Cascade,
        1 => Voice::Fm,
        _ => Voice::Resonator,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// For any point in the normalized control space, any voice and any
    /// playable pitch, the engine output stays finite and inside the
    /// output guard for a quarter second of audio.
    #[test]
    fn engine_output_always_guarded(
        voice_index in 0usize..3,
        freq in 27.5f32..880.0f32,
        controls in prop::array::uniform12(0.0f32..=1.0f32),
    ) {
        let mut engine = Engine::new(SR);
        engine.set_voice(voice_from_index(voice_index));
        engine.set_attack(controls[0]);
        engine.set_decay(controls[1]);
        engine.set_harmonic_spread(controls[2]);
        engine.set_cascade_amount(controls[3]);
        engine.set_wavefold(controls[4]);
        engine.set_chaos(controls[5]);
        engine.set_fm_index(controls[6]);
        engine.set_fm_ratio(controls[7]);
        engine.set_fm_feedback(controls[8]);
        engine.set_fm_fold(controls[9]);
        engine.set_verb_feedback(controls[10]);
        engine.set_verb_damp(controls[11]);
        engine.note_on(freq);

        for _ in 0..11_025 {
            let s = engine.process();
            prop_assert!(s.is_finite(), "non-finite sample at freq {}", freq);
            prop_assert!(s.abs() <= SAMPLE_GUARD, "sample {} escaped the guard", s);
        }
    }

    /// Resonator comb lengths scale inversely with pitch and always hold
    /// their harmonic ordering.
    #[test]
    fn resonator_lengths_follow_pitch(freq in 27.5f32..880.0f32) {
        let mut voice = ResonatorVoice::new(SR);
        // Jump well outside the hysteresis band first so the retune fires
        voice.set_frequency(if freq > 400.0 { MIN_FREQ } else { MAX_FREQ });
        voice.set_frequency(freq);

        let lengths = voice.comb_lengths();
        let base = (SR / voice.frequency() + 0.5) as usize;
        prop_assert_eq!(lengths[0], base.clamp(16, 4095));
        for pair in lengths.windows(2) {
            prop_assert!(pair[0] <= pair[1], "comb ordering broken: {:?}", lengths);
        }
    }

    /// The envelope level stays inside [0, 1] for any attack/decay setting
    /// and any gate pattern.
    #[test]
    fn envelope_level_stays_normalized(
        attack in 0.0f32..=1.0f32,
        decay in 0.0f32..=1.0f32,
        gate_period in 10usize..2000,
    ) {
        let mut env = AdEnvelope::new(SR);
        env.set_attack(attack);
        env.set_decay(decay);

        for i in 0..20_000 {
            env.gate((i / gate_period) % 2 == 0);
            let level = env.advance();
            prop_assert!((0.0..=1.0).contains(&level), "level {} out of range", level);
        }
    }

    /// The FM feedback path stays bounded for any control combination.
    #[test]
    fn fm_feedback_never_diverges(
        index in 0.0f32..=1.0f32,
        ratio in 0.0f32..=1.0f32,
        feedback in 0.0f32..=1.0f32,
        freq in 27.5f32..880.0f32,
    ) {
        let mut voice = FmVoice::new(SR);
        voice.set_frequency(freq);
        voice.trigger();

        for _ in 0..4410 {
            let s = voice.process(index, ratio, feedback, 1.0, 1.0);
            prop_assert!(s.is_finite());
            prop_assert!(s.abs() <= 1.0);
        }
    }
}
