//! Error types for the jathaka facade.

use jathaka_config::ConfigError;
use jathaka_core::PositionError;
use jathaka_time::TimeError;
use jathaka_vedic_base::VedicError;
use thiserror::Error;

use crate::geocode::GeocodeError;

/// Umbrella error for every fallible facade operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JathakaError {
    #[error("time error: {0}")]
    Time(#[from] TimeError),

    #[error("position error: {0}")]
    Position(#[from] PositionError),

    #[error("{0}")]
    Vedic(#[from] VedicError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("geocode error: {0}")]
    Geocode(#[from] GeocodeError),

    /// The birth location failed validation.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),

    /// The query instant is outside the 120-year cycle rooted at birth.
    #[error("JD {jd} is outside the dasha cycle ({start_jd}..{end_jd})")]
    OutsideDashaCycle { jd: f64, start_jd: f64, end_jd: f64 },
}
