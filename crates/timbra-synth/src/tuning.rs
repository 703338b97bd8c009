//! Instrument-wide tuning constants.
//!
//! Collected in one place so the voices, the envelope, and the engine
//! agree on the playable range and output staging.

/// Default sample rate in Hz. Constructors take an explicit rate; this is
/// the value the hardware codec runs at.
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;

/// Lowest playable pitch in Hz (A0).
pub const MIN_FREQ: f32 = 27.5;

/// Highest playable pitch in Hz (A5).
pub const MAX_FREQ: f32 = 880.0;

/// Partial count for the additive voice.
pub const MAX_HARMONICS: usize = 8;

/// Envelope attack time range in seconds.
pub const MIN_ATTACK: f32 = 0.001;
/// Envelope attack time range in seconds.
pub const MAX_ATTACK: f32 = 2.0;

/// Envelope decay time range in seconds.
pub const MIN_DECAY: f32 = 0.01;
/// Envelope decay time range in seconds.
pub const MAX_DECAY: f32 = 8.0;

/// Master output gain applied after the active voice.
pub const MASTER_GAIN: f32 = 0.8;

/// Hard safety bound on engine output. Wider than unity so transient
/// overshoot from feedback paths survives to the output stage, which does
/// its own final clamping.
pub const SAMPLE_GUARD: f32 = 2.0;
