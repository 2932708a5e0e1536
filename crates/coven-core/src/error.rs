//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    /// The requested player count has no composition table entry.
    #[error("unsupported player count: {0}")]
    UnsupportedPlayerCount(usize),

    /// A balance configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
