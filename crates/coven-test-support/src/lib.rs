//! Shared test mocks and utilities for the Coven ritual simulator.

mod rng;

pub use rng::{MockRng, SequenceRng};
