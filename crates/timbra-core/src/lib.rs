//! Timbra Core - DSP primitives for the timbra voice module
//!
//! This crate provides the foundational building blocks for the timbra
//! synthesis engine, designed for real-time audio processing with zero
//! allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Resonant Delay Structures
//!
//! Fixed-capacity delay structures whose logical length is retuned at
//! run time, for pitch-tracked comb/allpass resonator networks:
//!
//! - [`TunedComb`] - Feedback comb line with one-pole damping
//! - [`Diffuser`] - Schroeder allpass for diffusion
//!
//! Both embed their buffers as fixed-size arrays, so a voice built from
//! them never allocates after construction.
//!
//! ## Modulation Sources
//!
//! Smooth scalar modulation signals for "organic" timbre movement:
//!
//! - [`ModulationSource`] - Trait over autonomous bipolar generators
//! - [`LorenzAttractor`] - Chaotic attractor integrated per sample
//! - [`DriftLfo`] - Two detuned sine phases, periodic alternative
//!
//! ## Filters
//!
//! - [`OnePole`] - One-pole lowpass for feedback-path damping
//!
//! ## Utilities
//!
//! - Math functions: [`exp_map`], [`soft_clip`], [`triangle_fold`],
//!   [`wet_dry_mix`], [`flush_denormal`], etc.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! timbra-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Defensive numerics**: Denormal flushing and saturating feedback
//!   paths instead of recoverable errors

#![cfg_attr(not(feature = "std"), no_std)]

pub mod allpass;
pub mod chaos;
pub mod comb;
pub mod lfo;
pub mod math;
pub mod modulation;
pub mod one_pole;

// Re-export main types at crate root
pub use allpass::Diffuser;
pub use chaos::LorenzAttractor;
pub use comb::TunedComb;
pub use lfo::DriftLfo;
pub use math::{
    exp_map, flush_denormal, hard_clip, lerp, soft_clip, triangle_fold, wet_dry_mix,
};
pub use modulation::ModulationSource;
pub use one_pole::OnePole;
