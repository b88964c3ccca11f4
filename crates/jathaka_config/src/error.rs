//! Error types for configuration loading.

use thiserror::Error;

/// Errors from reading or validating a configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is well-formed JSON but not usable.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}
