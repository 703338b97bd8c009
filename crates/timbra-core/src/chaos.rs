//! Lorenz attractor: chaotic low-frequency modulation.
//!
//! Integrates the Lorenz system with a fixed per-sample time step and maps
//! the trajectory to a smooth bounded scalar. At audio sample rates the
//! step is small enough that forward Euler integration stays on the
//! attractor, and the output evolves at control-rate speeds: organic,
//! never repeating, but continuous.

use libm::tanhf;

/// Classic Lorenz parameters (σ, ρ, β) for the chaotic regime.
const SIGMA: f32 = 10.0;
const RHO: f32 = 28.0;
const BETA: f32 = 8.0 / 3.0;

/// Chaotic modulation source producing a smooth value in roughly [-1, 1].
///
/// The attractor state itself wanders inside a bounded basin (|x| ≲ 20,
/// |y| ≲ 27, z ∈ [0, 48] for these parameters); a scaled tanh of a
/// projection squashes it into (-1, 1) while keeping the motion smooth.
///
/// # Example
///
/// ```rust
/// use timbra_core::LorenzAttractor;
///
/// let mut chaos = LorenzAttractor::new(48000.0);
/// let value = chaos.advance();
/// assert!(value > -1.0 && value < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct LorenzAttractor {
    x: f32,
    y: f32,
    z: f32,
    dt: f32,
}

impl LorenzAttractor {
    /// Initial state: slightly off the origin so the trajectory leaves the
    /// (unstable) fixed point immediately.
    const SEED: (f32, f32, f32) = (0.1, 0.0, 0.0);

    /// Create a new attractor integrated at the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            x: Self::SEED.0,
            y: Self::SEED.1,
            z: Self::SEED.2,
            dt: 1.0 / sample_rate,
        }
    }

    /// Return the trajectory to its seed state.
    pub fn reset(&mut self) {
        self.x = Self::SEED.0;
        self.y = Self::SEED.1;
        self.z = Self::SEED.2;
    }

    /// Advance the attractor by one sample and return the squashed
    /// projection in (-1, 1).
    #[inline]
    pub fn advance(&mut self) -> f32 {
        let dx = SIGMA * (self.y - self.x);
        let dy = self.x * (RHO - self.z) - self.y;
        let dz = self.x * self.y - BETA * self.z;

        self.x += dx * self.dt;
        self.y += dy * self.dt;
        self.z += dz * self.dt;

        tanhf(self.x * 0.08 + self.y * 0.03)
    }
}
