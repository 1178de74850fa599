//! Error types shared by the topology builder, the pipeline, and the I/O adapters.

use std::fmt;
use std::io;

use thiserror::Error;

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"power.du.k2"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Fatal errors raised by the twin.
///
/// Soft lookup conditions (a link to an unregistered node, a supported node
/// with no utilization sample) are never surfaced here; they are logged and
/// skipped where they occur.
#[derive(Debug, Error)]
pub enum TwinError {
    /// The topology description or a configuration value is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A utilization or power table is malformed or misaligned.
    #[error("format error: {0}")]
    Format(String),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid topology JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl TwinError {
    /// Shorthand for a [`TwinError::Config`] with the given field and message.
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config(ConfigError::new(field, message))
    }

    /// Shorthand for a [`TwinError::Format`].
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = TwinError> = std::result::Result<T, E>;
