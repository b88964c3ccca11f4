//! Error types for position providers.

use thiserror::Error;

use crate::Body;

/// Errors raised while obtaining a body longitude.
///
/// The engine never falls back between providers on its own; callers
/// decide whether to retry with another backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PositionError {
    /// The backend could not produce a position for this body.
    #[error("position of {body:?} unavailable: {reason}")]
    Unavailable { body: Body, reason: String },

    /// Requested instant falls outside the tabulated range.
    #[error("JD {jd} is outside dataset range ({start_jd}..{end_jd})")]
    OutOfRange { jd: f64, start_jd: f64, end_jd: f64 },

    /// The dataset file is malformed.
    #[error("invalid ephemeris dataset: {0}")]
    Dataset(String),

    /// CSV decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Transport-level failure talking to the remote service.
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    /// The remote service answered with something we could not decode.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Body name not recognised.
    #[error("unknown body: {0}")]
    UnknownBody(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
