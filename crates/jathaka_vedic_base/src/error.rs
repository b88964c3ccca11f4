//! Error types for Vedic calculations.

use jathaka_core::PositionError;
use jathaka_time::TimeError;
use thiserror::Error;

/// Errors from Vedic base calculations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VedicError {
    /// Error from time conversion.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
    /// A position provider could not supply a longitude.
    #[error("position error: {0}")]
    Position(#[from] PositionError),
    /// Invalid geographic location parameter.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
    /// Invalid numeric input (non-finite longitude, bad model parameters).
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}
