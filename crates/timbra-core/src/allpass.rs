//! Retunable Schroeder allpass for diffusion.
//!
//! An allpass filter passes all frequencies at equal amplitude but smears
//! transients in time, turning the discrete echoes of a comb network into
//! a denser, smoother resonance. Like [`TunedComb`](crate::TunedComb), the
//! buffer is a fixed-capacity array with a retunable logical length.

use crate::flush_denormal;

/// Schroeder allpass diffuser with a retunable length.
///
/// Structure per sample:
///
/// ```text
/// output = -gain * input + delayed
/// write  =  input + gain * delayed
/// ```
///
/// # Invariants
///
/// - The logical length is always within `[MIN_LENGTH, CAPACITY)`
/// - The write index is reduced modulo the logical length before every access
///
/// # Example
///
/// ```rust
/// use timbra_core::Diffuser;
///
/// let mut allpass = Diffuser::new(100);
/// let output = allpass.process(1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Diffuser {
    buffer: [f32; Self::CAPACITY],
    write_idx: usize,
    length: usize,
    gain: f32,
}

impl Diffuser {
    /// Buffer capacity in samples.
    pub const CAPACITY: usize = 2048;

    /// Shortest usable logical length in samples.
    pub const MIN_LENGTH: usize = 4;

    /// Create a new diffuser with the given initial length in samples.
    ///
    /// The diffusion gain defaults to the classic Schroeder value of 0.5.
    pub fn new(length: usize) -> Self {
        Self {
            buffer: [0.0; Self::CAPACITY],
            write_idx: 0,
            length: length.clamp(Self::MIN_LENGTH, Self::CAPACITY - 1),
            gain: 0.5,
        }
    }

    /// Set the diffusion gain.
    ///
    /// The allpass is stable for |gain| < 1.0.
    #[inline]
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(-0.99, 0.99);
    }

    /// Get the current diffusion gain.
    #[inline]
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Retune the line to a new logical length in samples.
    ///
    /// The length is clamped into `[MIN_LENGTH, CAPACITY)` and the write
    /// index is reset.
    pub fn retune(&mut self, length: usize) {
        self.length = length.clamp(Self::MIN_LENGTH, Self::CAPACITY - 1);
        self.write_idx = 0;
    }

    /// Current logical length in samples.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Process a single sample through the allpass.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let idx = self.write_idx % self.length;
        let delayed = self.buffer[idx];

        let output = -input * self.gain + delayed;
        self.buffer[idx] = flush_denormal(input + delayed * self.gain);
        self.write_idx = (idx + 1) % self.length;

        output
    }

    /// Clear the buffer and write index.
    pub fn clear(&mut self) {
        self.buffer = [0.0; Self::CAPACITY];
        self.write_idx = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allpass_finite_output() {
        let mut allpass = Diffuser::new(100);
        for _ in 0..500 {
            let out = allpass.process(0.5);
            assert!(out.is_finite());
        }
    }

    #[test]
    fn test_allpass_energy_conservation() {
        // Allpass should approximately preserve energy over a burst
        let mut allpass = Diffuser::new(50);

        let input_energy: f32 = (0..500)
            .map(|i| {
                let x: f32 = if i < 100 { 1.0 } else { 0.0 };
                x * x
            })
            .sum();

        let output_energy: f32 = (0..500)
            .map(|i| {
                let x = if i < 100 { 1.0 } else { 0.0 };
                let y = allpass.process(x);
                y * y
            })
            .sum();

        let ratio = output_energy / input_energy;
        assert!(
            ratio > 0.5 && ratio < 2.0,
            "Energy ratio {} should be close to 1.0",
            ratio
        );
    }

    #[test]
    fn test_allpass_length_clamped() {
        let mut allpass = Diffuser::new(1);
        assert_eq!(allpass.length(), Diffuser::MIN_LENGTH);

        allpass.retune(1 << 20);
        assert_eq!(allpass.length(), Diffuser::CAPACITY - 1);
    }

    #[test]
    fn test_allpass_retune_keeps_index_in_bounds() {
        let mut allpass = Diffuser::new(800);
        for _ in 0..700 {
            allpass.process(0.3);
        }

        allpass.retune(8);
        for _ in 0..100 {
            let out = allpass.process(0.1);
            assert!(out.is_finite());
        }
    }

    #[test]
    fn test_allpass_clear() {
        let mut allpass = Diffuser::new(10);
        for _ in 0..20 {
            allpass.process(1.0);
        }

        allpass.clear();

        for _ in 0..20 {
            let out = allpass.process(0.0);
            assert!(out.abs() < 1e-10, "Should be silent after clear");
        }
    }
}
