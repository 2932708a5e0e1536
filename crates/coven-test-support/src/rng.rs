//! Test RNG: deterministic `DeterministicRng` implementations for tests.

use coven_core::rng::DeterministicRng;

/// A no-op RNG that always returns `min` for `next_u32_range` and `0.0` for
/// `next_f64`. Every pick lands on the first candidate and every probability
/// roll succeeds.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns values from predetermined sequences. Panics if the
/// integer sequence is exhausted. Used in tests that need specific,
/// repeatable picks (shuffles, performers, ingredient draws, tie-breaks).
///
/// Floats come from a separate sequence; once it runs out, `next_f64`
/// returns `0.99`, which fails every probability roll the engine makes.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
    floats: Vec<f64>,
    float_index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given integer values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            index: 0,
            floats: Vec::new(),
            float_index: 0,
        }
    }

    /// Script the values returned by `next_f64`.
    #[must_use]
    pub fn with_floats(mut self, floats: Vec<f64>) -> Self {
        self.floats = floats;
        self
    }

    /// Number of integer values consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let val = *self.values.get(self.index).unwrap_or_else(|| {
            panic!(
                "SequenceRng exhausted after {} values (asked for [{min}, {max}])",
                self.index
            )
        });
        self.index += 1;
        val
    }

    fn next_f64(&mut self) -> f64 {
        let val = self.floats.get(self.float_index).copied().unwrap_or(0.99);
        self.float_index += 1;
        val
    }
}
