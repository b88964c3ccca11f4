//! Error types for civil-time handling.

use thiserror::Error;

/// Errors from civil date/time validation and UTC normalization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Malformed or out-of-range civil date/time.
    #[error("invalid date/time input: {0}")]
    InvalidInput(String),
    /// Malformed or out-of-range UTC offset.
    #[error("invalid UTC offset: {0}")]
    InvalidOffset(String),
    /// Timezone identifier not known to the normalizer.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}
