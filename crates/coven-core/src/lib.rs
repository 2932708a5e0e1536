//! Coven Core: shared abstractions.
//!
//! This crate defines the randomness seam and the error type that the
//! simulation engine and its drivers depend on. It contains no game rules.

pub mod error;
pub mod rng;
