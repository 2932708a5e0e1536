//! Coven simulator: application error types.

use coven_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the simulator binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The balance file could not be read.
    #[error("could not read balance file {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The balance file is not valid YAML for a balance configuration.
    #[error("invalid balance file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The report could not be serialized.
    #[error("report serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The text report could not be formatted.
    #[error("report formatting failed: {0}")]
    Render(#[from] std::fmt::Error),

    /// The simulation rejected its configuration.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
