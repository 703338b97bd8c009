//! Retunable comb line for pitched resonator networks.
//!
//! A feedback comb filter whose delay length is retuned at run time to
//! track a target pitch. Unlike a reverb comb with a fixed length, the
//! buffer here is a fixed-capacity array and only the *logical* length
//! changes, so retuning never allocates and every index is taken modulo
//! the current length before use.

use crate::OnePole;
use crate::flush_denormal;
use crate::soft_clip;

/// Feedback comb line with one-pole damping and a retunable length.
///
/// The feedback path includes a one-pole lowpass for high-frequency
/// damping, and a tanh saturator so that feedback gains near unity ring
/// indefinitely without diverging.
///
/// # Invariants
///
/// - The logical length is always within `[MIN_LENGTH, CAPACITY)`
/// - The write index is reduced modulo the logical length before every
///   access, so a stale index from a previous tuning can never read or
///   write out of the logical window
///
/// # Example
///
/// ```rust
/// use timbra_core::TunedComb;
///
/// let mut comb = TunedComb::new(200);
/// comb.set_feedback(0.8);
/// comb.set_damping_alpha(0.6);
///
/// let output = comb.process(1.0);
/// ```
#[derive(Debug, Clone)]
pub struct TunedComb {
    buffer: [f32; Self::CAPACITY],
    write_idx: usize,
    length: usize,
    damping: OnePole,
    feedback: f32,
}

impl TunedComb {
    /// Buffer capacity in samples. Long enough for one period of the
    /// lowest playable pitch at 44.1 kHz with the 2.0 length ratio applied.
    pub const CAPACITY: usize = 4096;

    /// Shortest usable logical length in samples.
    pub const MIN_LENGTH: usize = 8;

    /// Create a new comb line with the given initial length in samples.
    pub fn new(length: usize) -> Self {
        Self {
            buffer: [0.0; Self::CAPACITY],
            write_idx: 0,
            length: length.clamp(Self::MIN_LENGTH, Self::CAPACITY - 1),
            damping: OnePole::new(0.6),
            feedback: 0.5,
        }
    }

    /// Set the feedback amount (0.0 to 0.99).
    ///
    /// Higher values create longer decay times; the tanh in the write path
    /// keeps the loop bounded even at the top of the range.
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.99);
    }

    /// Get the current feedback value.
    #[inline]
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Set the damping filter's blend coefficient directly.
    ///
    /// Lower values smooth the feedback signal more, losing high
    /// frequencies faster.
    #[inline]
    pub fn set_damping_alpha(&mut self, alpha: f32) {
        self.damping.set_alpha(alpha);
    }

    /// Retune the line to a new logical length in samples.
    ///
    /// The length is clamped into `[MIN_LENGTH, CAPACITY)`. The write index
    /// and the damping filter state are reset so the retune does not replay
    /// a transient from the previous tuning; buffer contents are kept and
    /// fade through the feedback path.
    pub fn retune(&mut self, length: usize) {
        self.length = length.clamp(Self::MIN_LENGTH, Self::CAPACITY - 1);
        self.write_idx = 0;
        self.damping.reset();
    }

    /// Current logical length in samples.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Process a single sample through the comb line.
    ///
    /// Returns the delayed sample; the input plus the damped, scaled
    /// feedback is saturated and written back at the same position.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let idx = self.write_idx % self.length;
        let delayed = self.buffer[idx];

        let filtered = self.damping.process(delayed);
        let write = soft_clip(input + filtered * self.feedback);

        self.buffer[idx] = flush_denormal(write);
        self.write_idx = (idx + 1) % self.length;

        delayed
    }

    /// Clear the buffer, filter state, and write index.
    pub fn clear(&mut self) {
        self.buffer = [0.0; Self::CAPACITY];
        self.write_idx = 0;
        self.damping.reset();
    }
}
