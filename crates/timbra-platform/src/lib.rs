//! Timbra Platform - Control-rate plumbing for the timbra voice module
//!
//! This crate sits between a hardware front panel (or a test harness
//! standing in for one) and the audio-rate [`Engine`](timbra_synth::Engine).
//! It provides the plain-data frames exchanged across that boundary, a
//! single-slot mailbox for handing the latest frame between contexts, and
//! the control conditioning path that turns raw knob and CV readings into
//! the normalized values the engine's setters accept.
//!
//! # Core Components
//!
//! - [`ParamFrame`] - One control-rate snapshot of every panel input
//! - [`StatusFrame`] - Engine state reported back for display
//! - [`Mailbox`] - Latest-value handoff slot (std only)
//! - [`ControlPath`] - CV + knob combination, smoothing, and pitch mapping
//!
//! # Example
//!
//! ```rust
//! use timbra_platform::{ControlPath, ParamFrame, StatusFrame};
//! use timbra_synth::Engine;
//!
//! let mut engine = Engine::new(44100.0);
//! let mut control = ControlPath::new();
//!
//! let frame = ParamFrame {
//!     gate: true,
//!     knob: [0.5, 0.5, 0.5],
//!     ..ParamFrame::default()
//! };
//! control.apply(&mut engine, &frame);
//!
//! let sample = engine.process();
//! let status = StatusFrame::capture(&engine);
//! assert!(sample.is_finite());
//! assert!(status.is_playing);
//! ```
//!
//! # no_std Support
//!
//! [`ControlPath`] and the frame types are `no_std` compatible; disable
//! the default `std` feature to drop [`Mailbox`], which needs
//! `std::sync::Mutex`.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod control;
#[cfg(feature = "std")]
pub mod mailbox;

pub use control::ControlPath;
#[cfg(feature = "std")]
pub use mailbox::Mailbox;

use timbra_synth::{Engine, Voice};

/// One control-rate snapshot of the front panel.
///
/// All analog values are normalized to 0..1 as read; combining a knob with
/// its CV input is the [`ControlPath`]'s job, never the engine's. The menu
/// parameters (attack, decay, and the per-voice depth controls) arrive
/// already normalized from the UI side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamFrame {
    /// Envelope attack control.
    pub attack: f32,
    /// Envelope decay control.
    pub decay: f32,
    /// Cascade voice folding depth.
    pub wavefold: f32,
    /// Cascade voice chaos depth.
    pub chaos: f32,
    /// FM voice modulator self-feedback.
    pub fm_feedback: f32,
    /// FM voice post-FM folding depth.
    pub fm_fold: f32,
    /// Resonator comb/diffusion blend.
    pub verb_mix: f32,
    /// Resonator excitation level for the next trigger.
    pub verb_excite: f32,
    /// Selected voice algorithm.
    pub voice: Voice,
    /// Gate input state.
    pub gate: bool,
    /// CV jacks: 0 = spread, 1 = cascade, 2 = pitch.
    pub cv: [f32; 3],
    /// Panel knobs, same channel assignment as `cv`.
    pub knob: [f32; 3],
}

impl Default for ParamFrame {
    fn default() -> Self {
        Self {
            attack: 0.5,
            decay: 0.5,
            wavefold: 0.0,
            chaos: 0.0,
            fm_feedback: 0.0,
            fm_fold: 0.0,
            verb_mix: 0.5,
            verb_excite: 0.6,
            voice: Voice::Cascade,
            gate: false,
            // Centered CV reads as "no modulation"
            cv: [0.5; 3],
            knob: [0.5; 3],
        }
    }
}

/// Engine state reported back to the display side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatusFrame {
    /// Metered output level in 0..1.
    pub output_level: f32,
    /// Whether the envelope is producing output.
    pub is_playing: bool,
    /// Current pitch in Hz.
    pub current_freq: f32,
}

impl StatusFrame {
    /// Snapshot the reportable engine state.
    pub fn capture(engine: &Engine) -> Self {
        Self {
            output_level: engine.output_level(),
            is_playing: engine.is_playing(),
            current_freq: engine.frequency(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_frame_is_neutral() {
        let frame = ParamFrame::default();
        assert!(!frame.gate);
        assert_eq!(frame.voice, Voice::Cascade);
        assert_eq!(frame.cv, [0.5; 3]);
    }

    #[test]
    fn test_status_capture_reflects_engine() {
        let mut engine = Engine::new(44100.0);
        engine.note_on(440.0);
        for _ in 0..100 {
            engine.process();
        }

        let status = StatusFrame::capture(&engine);
        assert!(status.is_playing);
        assert_eq!(status.current_freq, 440.0);
        assert!(status.output_level >= 0.0);
    }
}
