//! Sample acquisition: the source trait and its built-in implementations.
//!
//! The controller pulls exactly one scalar amplitude per tick from a
//! [`SampleSource`]. Sources may fail or run dry; either condition halts the
//! cadence at the controller level without corrupting the window or ledger.
//!
//! Two implementations ship with the crate:
//!
//! - [`SyntheticSource`]: a seeded ground-motion simulator (low noise floor
//!   plus rare spikes), reproducible per seed
//! - [`ReplaySource`]: plays out a fixed trace, then reports exhaustion;
//!   the workhorse for deterministic tests

use crate::error::{Result, TemblorError};

/// Produces one amplitude sample per tick on demand.
///
/// Implementations own whatever state the stream needs (generator state,
/// file cursor, network handle) and must hand back samples synchronously;
/// the tick path never blocks.
pub trait SampleSource: Send + Sync {
    /// Unique identifier for this source (used in error messages).
    fn id(&self) -> &'static str;

    /// Produces the next sample.
    ///
    /// # Errors
    ///
    /// Returns [`TemblorError::SourceExhausted`] when the stream has ended
    /// or [`TemblorError::SourceFailed`] when acquisition broke.
    fn next_sample(&mut self) -> Result<f64>;

    /// Rewinds or reseeds the source to its initial state.
    ///
    /// Called by the controller's reset so a fresh run replays the same
    /// trace for a deterministic source.
    fn reset(&mut self);

    /// Human-readable name for display purposes.
    fn display_name(&self) -> &'static str {
        self.id()
    }
}

/// Boxed source for dynamic dispatch.
pub type BoxedSource = Box<dyn SampleSource>;

// ============================================================================
// Seeded generator
// ============================================================================

/// Xorshift64 pseudo-random generator.
///
/// Statistical quality is more than enough for simulated ground motion, and
/// a fixed seed makes every trace reproducible. Not suitable for anything
/// cryptographic.
#[derive(Debug, Clone)]
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Creates a generator from a seed. Zero is remapped; xorshift has a
    /// fixed point at state 0.
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform sample in [0, 1).
    fn next_f64(&mut self) -> f64 {
        // 53 high bits give a full-precision mantissa.
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

// ============================================================================
// Synthetic source
// ============================================================================

/// Simulated microseismic ground motion.
///
/// Each tick produces a low noise floor in [0, 0.1); with 2% probability a
/// spike in [0, 1.2) is added on top. The default detection threshold of
/// 0.4 sits well above the floor, so steady state is quiet with occasional
/// detectable events.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    rng: XorShift64,
    seed: u64,
}

impl SyntheticSource {
    /// Amplitude ceiling of the noise floor.
    pub const NOISE_CEILING: f64 = 0.1;
    /// Probability that a tick carries a spike.
    pub const SPIKE_PROBABILITY: f64 = 0.02;
    /// Amplitude ceiling of a spike (before the floor is added).
    pub const SPIKE_CEILING: f64 = 1.2;
    /// Seed used by [`Default`].
    pub const DEFAULT_SEED: u64 = 42;

    /// Creates a generator with the given seed.
    ///
    /// Two sources built from the same seed produce identical traces.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: XorShift64::new(seed), seed }
    }

    /// Returns the construction seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl SampleSource for SyntheticSource {
    fn id(&self) -> &'static str {
        "synthetic"
    }

    fn next_sample(&mut self) -> Result<f64> {
        let noise = self.rng.next_f64() * Self::NOISE_CEILING;
        let spike = if self.rng.next_f64() < Self::SPIKE_PROBABILITY {
            self.rng.next_f64() * Self::SPIKE_CEILING
        } else {
            0.0
        };
        Ok(noise + spike)
    }

    fn reset(&mut self) {
        self.rng = XorShift64::new(self.seed);
    }

    fn display_name(&self) -> &'static str {
        "Synthetic ground motion"
    }
}

// ============================================================================
// Replay source
// ============================================================================

/// Plays out a fixed trace of samples, then reports exhaustion.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    trace: Vec<f64>,
    cursor: usize,
}

impl ReplaySource {
    /// Creates a source over an owned trace.
    #[must_use]
    pub fn new(trace: Vec<f64>) -> Self {
        Self { trace, cursor: 0 }
    }

    /// Creates a source by copying a slice.
    #[must_use]
    pub fn from_slice(trace: &[f64]) -> Self {
        Self::new(trace.to_vec())
    }

    /// Returns how many samples remain before exhaustion.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.trace.len().saturating_sub(self.cursor)
    }
}

impl SampleSource for ReplaySource {
    fn id(&self) -> &'static str {
        "replay"
    }

    fn next_sample(&mut self) -> Result<f64> {
        match self.trace.get(self.cursor) {
            Some(&sample) => {
                self.cursor += 1;
                Ok(sample)
            }
            None => Err(TemblorError::SourceExhausted { name: self.id() }),
        }
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }

    fn display_name(&self) -> &'static str {
        "Trace replay"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xorshift_same_seed_same_sequence() {
        let mut a = XorShift64::new(1234);
        let mut b = XorShift64::new(1234);

        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_xorshift_zero_seed_is_remapped() {
        let mut rng = XorShift64::new(0);
        // State 0 would be a fixed point; remapping must keep it moving.
        let first = rng.next_u64();
        let second = rng.next_u64();
        assert_ne!(first, 0);
        assert_ne!(first, second);
    }

    #[test]
    fn test_xorshift_f64_in_unit_interval() {
        let mut rng = XorShift64::new(99);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "uniform draw {} left [0, 1)", v);
        }
    }

    #[test]
    fn test_synthetic_same_seed_same_trace() {
        let mut a = SyntheticSource::new(7);
        let mut b = SyntheticSource::new(7);

        for _ in 0..500 {
            assert_eq!(a.next_sample().unwrap(), b.next_sample().unwrap());
        }
    }

    #[test]
    fn test_synthetic_different_seeds_diverge() {
        let mut a = SyntheticSource::new(1);
        let mut b = SyntheticSource::new(2);

        let trace_a: Vec<f64> = (0..50).map(|_| a.next_sample().unwrap()).collect();
        let trace_b: Vec<f64> = (0..50).map(|_| b.next_sample().unwrap()).collect();
        assert_ne!(trace_a, trace_b);
    }

    #[test]
    fn test_synthetic_amplitude_range() {
        let mut source = SyntheticSource::new(42);

        for _ in 0..10_000 {
            let sample = source.next_sample().unwrap();
            assert!(sample >= 0.0, "amplitude {} below zero", sample);
            assert!(
                sample < SyntheticSource::NOISE_CEILING + SyntheticSource::SPIKE_CEILING,
                "amplitude {} above noise + spike ceiling",
                sample
            );
        }
    }

    #[test]
    fn test_synthetic_mostly_noise_floor_with_rare_spikes() {
        let mut source = SyntheticSource::new(42);

        let spikes = (0..10_000)
            .map(|_| source.next_sample().unwrap())
            .filter(|&s| s > 0.15)
            .count();

        // ~2% spike gate; well above zero, nowhere near the majority.
        assert!(spikes > 20, "expected some spikes, got {}", spikes);
        assert!(spikes < 600, "expected rare spikes, got {}", spikes);
    }

    #[test]
    fn test_synthetic_reset_replays_trace() {
        let mut source = SyntheticSource::new(11);

        let first: Vec<f64> = (0..20).map(|_| source.next_sample().unwrap()).collect();
        source.reset();
        let second: Vec<f64> = (0..20).map(|_| source.next_sample().unwrap()).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_synthetic_default_seed() {
        let source = SyntheticSource::default();
        assert_eq!(source.seed(), SyntheticSource::DEFAULT_SEED);
    }

    #[test]
    fn test_replay_plays_trace_in_order() {
        let mut source = ReplaySource::from_slice(&[0.05, 0.6, 0.95]);

        assert_eq!(source.next_sample().unwrap(), 0.05);
        assert_eq!(source.next_sample().unwrap(), 0.6);
        assert_eq!(source.next_sample().unwrap(), 0.95);
    }

    #[test]
    fn test_replay_exhaustion_is_an_error() {
        let mut source = ReplaySource::from_slice(&[0.1]);

        source.next_sample().unwrap();
        let err = source.next_sample().unwrap_err();

        assert!(
            matches!(err, TemblorError::SourceExhausted { name: "replay" }),
            "expected exhaustion, got {:?}",
            err
        );
    }

    #[test]
    fn test_replay_stays_exhausted() {
        let mut source = ReplaySource::new(vec![]);

        assert!(source.next_sample().is_err());
        assert!(source.next_sample().is_err());
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_replay_reset_rewinds() {
        let mut source = ReplaySource::from_slice(&[0.2, 0.3]);

        source.next_sample().unwrap();
        source.next_sample().unwrap();
        assert!(source.next_sample().is_err());

        source.reset();
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.next_sample().unwrap(), 0.2);
    }

    #[test]
    fn test_boxed_source_dispatch() {
        let mut sources: Vec<BoxedSource> = vec![
            Box::new(SyntheticSource::new(5)),
            Box::new(ReplaySource::from_slice(&[0.4])),
        ];

        for source in &mut sources {
            assert!(!source.id().is_empty());
            assert!(!source.display_name().is_empty());
            let _ = source.next_sample();
        }
    }

    #[test]
    fn test_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyntheticSource>();
        assert_send_sync::<ReplaySource>();
        assert_send_sync::<BoxedSource>();
    }
}

// ============================================================================
// Property-based tests with proptest
// ============================================================================
