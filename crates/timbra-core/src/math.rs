//! Mathematical utility functions for DSP.
//!
//! Provides common DSP math operations optimized for real-time audio
//! processing. All functions are allocation-free and suitable for `no_std`.
//!
//! # Control Mapping
//!
//! - [`exp_map`] - Map a normalized control exponentially onto a range
//! - [`lerp`] - Linear interpolation
//!
//! # Waveshaping / Clipping
//!
//! | Function | Character | Use Case |
//! |----------|-----------|----------|
//! | [`soft_clip`] | Smooth, warm | Output saturation |
//! | [`hard_clip`] | Abrupt | Safety bounds |
//! | [`triangle_fold`] | Complex, synthy | Wave-folding distortion |
//!
//! # Numerics
//!
//! - [`flush_denormal`] - Subnormal protection for feedback loops
//! - [`wet_dry_mix`] - Crossfade between two signals

use libm::{expf, logf, tanhf};

/// Map a normalized control onto an exponential range.
///
/// Computes `min * (max/min)^normalized`, the standard musical mapping for
/// time and frequency controls: equal knob movement gives equal ratio change.
///
/// # Arguments
/// * `normalized` - Control value, clamped to [0.0, 1.0]
/// * `min` - Range minimum (must be > 0)
/// * `max` - Range maximum (must be > 0)
///
/// # Example
/// ```rust
/// use timbra_core::exp_map;
///
/// // Attack time: 1 ms at 0.0, 2 s at 1.0
/// assert!((exp_map(0.0, 0.001, 2.0) - 0.001).abs() < 1e-6);
/// assert!((exp_map(1.0, 0.001, 2.0) - 2.0).abs() < 1e-3);
/// ```
#[inline]
pub fn exp_map(normalized: f32, min: f32, max: f32) -> f32 {
    min * expf(normalized.clamp(0.0, 1.0) * logf(max / min))
}

/// Linear interpolation between two values.
///
/// # Arguments
/// * `a` - Start value (at t=0)
/// * `b` - End value (at t=1)
/// * `t` - Interpolation factor (0.0 to 1.0)
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Soft clip using hyperbolic tangent.
///
/// Smooth saturation that approaches ±1 asymptotically. Produces primarily
/// odd harmonics; used as the final nonlinearity of every voice and inside
/// resonant feedback paths to bound them.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    tanhf(x)
}

/// Hard clip to ±threshold range.
///
/// Abrupt limiting used for safety bounds, not for tone.
#[inline]
pub fn hard_clip(x: f32, threshold: f32) -> f32 {
    x.clamp(-threshold, threshold)
}

/// Triangle wave-fold: reflect excursions beyond ±1 back into range.
///
/// Each reflection maps `x > 1` to `2 - x` and `x < -1` to `-2 - x`,
/// generating additional harmonics. Iteration is bounded so that extreme
/// drive values cannot stall the audio thread; anything left outside the
/// range after the bound is hard-clipped.
///
/// # Example
/// ```rust
/// use timbra_core::triangle_fold;
///
/// assert!((triangle_fold(0.5) - 0.5).abs() < 1e-6);
/// assert!((triangle_fold(1.5) - 0.5).abs() < 1e-6);
/// assert!((triangle_fold(-1.25) - (-0.75)).abs() < 1e-6);
/// ```
#[inline]
pub fn triangle_fold(x: f32) -> f32 {
    let mut folded = x;
    // Drive is at most 5x in the voices, so a handful of reflections
    // always suffices for finite input.
    for _ in 0..8 {
        if folded > 1.0 {
            folded = 2.0 - folded;
        } else if folded < -1.0 {
            folded = -2.0 - folded;
        } else {
            return folded;
        }
    }
    folded.clamp(-1.0, 1.0)
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats (~1e-38 to 1e-45) cause severe CPU performance
/// degradation on most architectures. This function replaces values below
/// 1e-20 with zero, providing margin before the IEEE 754 subnormal range
/// begins.
///
/// Use this in feedback loops (comb lines, allpass chains) where signal
/// can decay indefinitely toward zero.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Crossfade between dry and wet signals.
///
/// Equivalent to `dry * (1 - mix) + wet * mix` but uses one fewer multiply:
/// `dry + (wet - dry) * mix`.
///
/// # Arguments
///
/// * `dry` - Unprocessed signal
/// * `wet` - Processed signal
/// * `mix` - Blend factor in \[0.0, 1.0\]: 0.0 = all dry, 1.0 = all wet
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry + (wet - dry) * mix
}
