//! Timbra Synth - Voice algorithms and engine for the timbra framework
//!
//! This crate implements the single-voice synthesizer: three selectable
//! voice algorithms, a hardware-style attack-decay envelope, and the
//! [`Engine`] that ties them together behind one control surface.
//!
//! # Core Components
//!
//! ## Voices
//!
//! Three complete synthesis algorithms sharing one pitch and envelope:
//!
//! - [`CascadeVoice`] - Additive harmonic cascade with chaotic modulation
//! - [`FmVoice`] - Two-operator FM with feedback and sine folding
//! - [`ResonatorVoice`] - Pitched comb/allpass resonator, excited on trigger
//!
//! ## Envelope
//!
//! - [`AdEnvelope`] - Attack-Decay envelope with gate-held sustain
//! - [`EnvelopeStage`] - Envelope stage tracking
//!
//! ```rust
//! use timbra_synth::{AdEnvelope, EnvelopeStage};
//!
//! let mut env = AdEnvelope::new(44100.0);
//! env.set_attack(0.2);
//! env.set_decay(0.6);
//!
//! env.trigger();
//! let level = env.advance();
//! assert!(level > 0.0);
//! ```
//!
//! ## Engine
//!
//! [`Engine`] owns all three voices plus the envelope, selects between
//! them with [`Voice`], and guards its output against NaN and overrange
//! samples before they can reach a DAC:
//!
//! ```rust
//! use timbra_synth::{Engine, Voice};
//!
//! let mut engine = Engine::new(44100.0);
//! engine.set_voice(Voice::Cascade);
//! engine.set_harmonic_spread(0.8);
//! engine.note_on(110.0);
//!
//! let mut buffer = [0.0f32; 128];
//! engine.render(&mut buffer);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! timbra-synth = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod cascade;
pub mod engine;
pub mod envelope;
pub mod fm;
pub mod resonator;
pub mod tuning;

// Re-export main types at crate root
pub use cascade::CascadeVoice;
pub use engine::{Engine, Voice};
pub use envelope::{AdEnvelope, EnvelopeStage};
pub use fm::FmVoice;
pub use resonator::ResonatorVoice;

// Re-export commonly used types from timbra-core
pub use timbra_core::{DriftLfo, LorenzAttractor, ModulationSource};
