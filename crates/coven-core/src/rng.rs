//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a seeded `StdRng`. In tests, a scripted
//! implementation is injected so every draw, tie-break and roll is known.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// Pick a uniformly random index into a collection of `len` items.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero or does not fit in a `u32`.
    fn next_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty collection");
        let max = u32::try_from(len - 1).expect("collection length fits in u32");
        self.next_u32_range(0, max) as usize
    }
}

/// Production RNG backed by `rand`'s standard generator.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: StdRng,
}

impl SeededRng {
    /// Creates a reproducible generator from a 64-bit seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl DeterministicRng for SeededRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.inner.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }
}

/// A fresh seed from the thread-local entropy source, for unseeded runs.
#[must_use]
pub fn entropy_seed() -> u64 {
    rand::random()
}

/// Derives an independent seed for one stream of a seeded run.
///
/// Uses the SplitMix64 finalizer so neighbouring stream ids produce
/// uncorrelated seeds.
#[must_use]
pub fn stream_seed(base: u64, stream: u64) -> u64 {
    let mut z = base
        .wrapping_add(0x9e37_79b9_7f4a_7c15)
        .wrapping_add(stream.wrapping_mul(0xbf58_476d_1ce4_e5b9));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
