//! Coven balance simulator: environment configuration, report rendering
//! and error types for the `coven-sim` binary.

pub mod error;
pub mod report;
pub mod settings;
