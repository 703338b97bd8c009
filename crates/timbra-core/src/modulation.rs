//! Modulation source abstraction.
//!
//! Unifies the autonomous modulation generators — the chaotic
//! [`LorenzAttractor`] and the periodic [`DriftLfo`] — behind one small
//! interface so a consumer can accept either without caring which kind of
//! motion drives it.

use crate::{DriftLfo, LorenzAttractor};

/// Trait for autonomous bipolar modulation generators.
///
/// A modulation source produces one smooth scalar per sample in roughly
/// [-1, 1], advancing its own internal state each call. Sources are
/// self-driving: they take no input signal.
///
/// # Example
///
/// ```rust
/// use timbra_core::{DriftLfo, ModulationSource};
///
/// let mut lfo = DriftLfo::new(48000.0, 2.0);
/// let value = ModulationSource::advance(&mut lfo);
/// assert!((-1.0..=1.0).contains(&value));
/// ```
pub trait ModulationSource {
    /// Advance one sample and return the modulation value in roughly [-1, 1].
    fn advance(&mut self) -> f32;

    /// Reset the source to its initial state.
    fn reset(&mut self);
}

impl ModulationSource for LorenzAttractor {
    fn advance(&mut self) -> f32 {
        LorenzAttractor::advance(self)
    }

    fn reset(&mut self) {
        LorenzAttractor::reset(self);
    }
}

impl ModulationSource for DriftLfo {
    fn advance(&mut self) -> f32 {
        DriftLfo::advance(self)
    }

    fn reset(&mut self) {
        DriftLfo::reset(self);
    }
}
