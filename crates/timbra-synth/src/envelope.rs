//! Attack-decay envelope generator.
//!
//! Produces a 0..1 amplitude multiplier per sample: linear attack to peak,
//! hold while the gate stays high, exponential decay to silence after
//! release. Times are set from normalized 0..1 controls mapped
//! exponentially onto musically useful ranges.

use libm::powf;
use timbra_core::exp_map;

use crate::tuning::{MAX_ATTACK, MAX_DECAY, MIN_ATTACK, MIN_DECAY};

/// Envelope stages
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeStage {
    /// Envelope is inactive — output is zero.
    #[default]
    Idle,
    /// Attack phase — output ramps linearly toward peak.
    Attack,
    /// Decay phase — output falls exponentially toward zero.
    Decay,
    /// Sustain phase — output holds at peak while the gate is held.
    Sustain,
}

/// Attack-decay envelope generator.
///
/// # Behavior
///
/// - `trigger()` enters Attack unconditionally, even mid-envelope. A
///   retrigger therefore continues from the current level rather than
///   restarting at zero; the level jump on a fast retrigger is the
///   intended percussive behavior, not smoothed away.
/// - Decay uses a per-sample multiplicative coefficient chosen so the
///   level reaches 0.001 of peak (−60 dB) in the configured time, then
///   snaps to exactly zero.
///
/// # Example
///
/// ```rust
/// use timbra_synth::{AdEnvelope, EnvelopeStage};
///
/// let mut env = AdEnvelope::new(44100.0);
/// env.set_attack(0.2);
/// env.set_decay(0.5);
///
/// env.trigger();
/// for _ in 0..1000 {
///     let level = env.advance();
///     assert!((0.0..=1.0).contains(&level));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdEnvelope {
    stage: EnvelopeStage,
    level: f32,
    sample_rate: f32,
    /// Per-sample additive increment during Attack.
    attack_rate: f32,
    /// Per-sample multiplicative factor during Decay.
    decay_coeff: f32,
}

impl AdEnvelope {
    /// Create a new envelope at the given sample rate.
    ///
    /// Starts Idle with moderate attack and decay times; call
    /// [`set_attack`](Self::set_attack) and [`set_decay`](Self::set_decay)
    /// before use.
    pub fn new(sample_rate: f32) -> Self {
        let mut env = Self {
            stage: EnvelopeStage::Idle,
            level: 0.0,
            sample_rate,
            attack_rate: 0.01,
            decay_coeff: 0.999,
        };
        env.set_attack(0.5);
        env.set_decay(0.5);
        env
    }

    /// Set attack time from a normalized 0..1 control.
    ///
    /// Maps exponentially onto 1 ms to 2 s.
    pub fn set_attack(&mut self, normalized: f32) {
        let attack_time = exp_map(normalized, MIN_ATTACK, MAX_ATTACK);
        self.attack_rate = 1.0 / (attack_time * self.sample_rate);
    }

    /// Set decay time from a normalized 0..1 control.
    ///
    /// Maps exponentially onto 10 ms to 8 s. The coefficient reaches
    /// 0.001 (−60 dB) of peak in the configured time:
    /// `coeff = 0.001^(1 / (time * sample_rate))`.
    pub fn set_decay(&mut self, normalized: f32) {
        let decay_time = exp_map(normalized, MIN_DECAY, MAX_DECAY);
        self.decay_coeff = powf(0.001, 1.0 / (decay_time * self.sample_rate));
    }

    /// Begin the attack phase (note on). Unconditional, even mid-envelope.
    pub fn trigger(&mut self) {
        self.stage = EnvelopeStage::Attack;
    }

    /// Begin the decay phase (note off). Ignored when already Idle.
    pub fn release(&mut self) {
        if self.stage != EnvelopeStage::Idle {
            self.stage = EnvelopeStage::Decay;
        }
    }

    /// Gate convenience: high triggers, low releases.
    pub fn gate(&mut self, on: bool) {
        if on {
            self.trigger();
        } else {
            self.release();
        }
    }

    /// Advance the envelope by one sample and return the current level.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Idle => {
                self.level = 0.0;
            }

            EnvelopeStage::Attack => {
                self.level += self.attack_rate;
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Sustain;
                }
            }

            EnvelopeStage::Sustain => {
                self.level = 1.0;
            }

            EnvelopeStage::Decay => {
                self.level *= self.decay_coeff;
                if self.level < 0.001 {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }

        self.level
    }

    /// True in any non-Idle stage.
    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Idle
    }

    /// Current stage (diagnostic).
    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// Current level without advancing (diagnostic).
    pub fn level(&self) -> f32 {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 44100.0;

    #[test]
    fn test_idle_outputs_zero() {
        let mut env = AdEnvelope::new(SR);
        assert_eq!(env.stage(), EnvelopeStage::Idle);
        for _ in 0..100 {
            assert_eq!(env.advance(), 0.0);
        }
        assert!(!env.is_active());
    }

    #[test]
    fn test_attack_rises_monotonically_to_sustain() {
        let mut env = AdEnvelope::new(SR);
        env.set_attack(0.3);
        env.trigger();

        let mut prev = 0.0;
        let mut reached_peak = false;
        for _ in 0..SR as usize * 2 {
            let level = env.advance();
            if env.stage() == EnvelopeStage::Sustain {
                assert_eq!(level, 1.0);
                reached_peak = true;
                break;
            }
            assert!(level > prev, "Attack must rise strictly: {} -> {}", prev, level);
            prev = level;
        }
        assert!(reached_peak, "Never reached Sustain");
    }

    #[test]
    fn test_fast_attack_reaches_peak_within_expected_samples() {
        // Normalized 0.0 maps to 1 ms: ~44 samples at 44.1 kHz
        let mut env = AdEnvelope::new(SR);
        env.set_attack(0.0);
        env.trigger();

        let mut samples = 0;
        while env.stage() != EnvelopeStage::Sustain {
            env.advance();
            samples += 1;
            assert!(samples < 100, "1 ms attack took {} samples", samples);
        }
        assert!(samples <= 46, "Expected ~44 samples, took {}", samples);
    }

    #[test]
    fn test_decay_falls_monotonically_then_snaps_idle() {
        let mut env = AdEnvelope::new(SR);
        env.set_attack(0.0);
        env.set_decay(0.0);
        env.trigger();
        while env.stage() != EnvelopeStage::Sustain {
            env.advance();
        }

        env.release();
        assert_eq!(env.stage(), EnvelopeStage::Decay);

        let mut prev = env.level();
        for _ in 0..SR as usize {
            let level = env.advance();
            if env.stage() == EnvelopeStage::Idle {
                assert_eq!(level, 0.0);
                return;
            }
            assert!(level < prev, "Decay must fall strictly: {} -> {}", prev, level);
            prev = level;
        }
        panic!("Decay never reached Idle");
    }

    #[test]
    fn test_decay_reaches_minus_60db_in_configured_time() {
        // Normalized 0.0 maps to 10 ms
        let mut env = AdEnvelope::new(SR);
        env.set_attack(0.0);
        env.set_decay(0.0);
        env.trigger();
        while env.stage() != EnvelopeStage::Sustain {
            env.advance();
        }
        env.release();

        let decay_samples = (0.010 * SR) as usize;
        for _ in 0..decay_samples + 2 {
            env.advance();
        }
        assert!(
            env.level() <= 0.0011,
            "Level {} should be near -60 dB after 10 ms",
            env.level()
        );
    }

    #[test]
    fn test_release_from_idle_is_ignored() {
        let mut env = AdEnvelope::new(SR);
        env.release();
        assert_eq!(env.stage(), EnvelopeStage::Idle);
    }

    #[test]
    fn test_retrigger_mid_decay_resumes_attack_from_current_level() {
        let mut env = AdEnvelope::new(SR);
        env.set_attack(0.5);
        env.set_decay(0.8);
        env.trigger();
        while env.stage() != EnvelopeStage::Sustain {
            env.advance();
        }
        env.release();
        for _ in 0..1000 {
            env.advance();
        }
        let level_before = env.level();
        assert!(level_before > 0.0 && level_before < 1.0);

        // Retrigger: stage flips to Attack, level continues upward from here
        env.trigger();
        assert_eq!(env.stage(), EnvelopeStage::Attack);
        let level_after = env.advance();
        assert!(level_after > level_before);
    }

    #[test]
    fn test_gate_convenience() {
        let mut env = AdEnvelope::new(SR);
        env.gate(true);
        assert_eq!(env.stage(), EnvelopeStage::Attack);
        env.gate(false);
        assert_eq!(env.stage(), EnvelopeStage::Decay);
    }

    #[test]
    fn test_level_always_in_unit_range() {
        let mut env = AdEnvelope::new(SR);
        env.set_attack(0.1);
        env.set_decay(0.1);
        env.trigger();
        for i in 0..50_000 {
            if i == 20_000 {
                env.release();
            }
            let level = env.advance();
            assert!(
                (0.0..=1.0).contains(&level),
                "Level out of range at {}: {}",
                i,
                level
            );
        }
    }
}
