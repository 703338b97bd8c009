//! Voice demo: the three synthesis algorithms and the engine lifecycle.
//!
//! Run with: cargo run -p timbra-synth --example voice_demo

use timbra_synth::{Engine, Voice};

fn block_rms(engine: &mut Engine, samples: usize) -> f32 {
    let mut acc = 0.0f32;
    for _ in 0..samples {
        let s = engine.process();
        acc += s * s;
    }
    (acc / samples as f32).sqrt()
}

fn main() {
    let sample_rate = 44100.0;

    // --- The three voices on the same note ---
    println!("=== Voice Comparison (220 Hz, RMS per 100 ms block) ===\n");

    for voice in [Voice::Cascade, Voice::Fm, Voice::Resonator] {
        let mut engine = Engine::new(sample_rate);
        engine.set_voice(voice);
        engine.set_attack(0.0);
        engine.set_decay(0.6);
        engine.note_on(220.0);

        print!("{:<10}", format!("{:?}", voice));
        for _ in 0..5 {
            print!(" {:>7.4}", block_rms(&mut engine, 4410));
        }
        engine.note_off();
        for _ in 0..3 {
            print!(" {:>7.4}", block_rms(&mut engine, 4410));
        }
        println!("  (note off after block 5)");
    }

    // --- Harmonic spread sweeping the cascade voice ---
    println!("\n=== Harmonic Spread Sweep (Cascade, 110 Hz) ===\n");
    println!("Spread | Partials | RMS");
    println!("-------+----------+-------");

    for step in 0..=4 {
        let spread = step as f32 / 4.0;
        let mut engine = Engine::new(sample_rate);
        engine.set_harmonic_spread(spread);
        engine.set_cascade_amount(0.0);
        engine.note_on(110.0);
        // Skip the attack before measuring
        block_rms(&mut engine, 4410);
        let rms = block_rms(&mut engine, 4410);
        let partials = 1 + (spread * 7.0) as usize;
        println!("{:>6.2} | {:>8} | {:.4}", spread, partials, rms);
    }

    // --- Resonator decay vs feedback ---
    println!("\n=== Resonator Decay (220 Hz strike, tail RMS at 1 s) ===\n");

    for feedback in [0.0, 0.5, 1.0] {
        let mut engine = Engine::new(sample_rate);
        engine.set_voice(Voice::Resonator);
        engine.set_verb_feedback(feedback);
        engine.note_on(220.0);
        block_rms(&mut engine, 44_100);
        let tail = block_rms(&mut engine, 4410);
        println!("feedback {:.1}: tail RMS = {:.6}", feedback, tail);
    }

    // --- Mid-note voice switching ---
    println!("\n=== Mid-Note Voice Switch ===\n");

    let mut engine = Engine::new(sample_rate);
    engine.note_on(220.0);
    println!("Cascade:   RMS = {:.4}", block_rms(&mut engine, 4410));
    engine.set_voice(Voice::Fm);
    println!("-> Fm:     RMS = {:.4}", block_rms(&mut engine, 4410));
    engine.set_voice(Voice::Resonator);
    println!("-> Reso:   RMS = {:.4}", block_rms(&mut engine, 4410));
    println!("Meter: {:.4}, playing: {}", engine.output_level(), engine.is_playing());

    println!("\nVoice demo complete.");
}
