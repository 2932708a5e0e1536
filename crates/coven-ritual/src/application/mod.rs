//! Application layer: runs many games and aggregates their outcomes.

pub mod batch;
