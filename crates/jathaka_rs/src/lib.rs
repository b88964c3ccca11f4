//! High-level facade for the jathaka engine.
//!
//! A [`Jathaka`] handle is built from an explicit [`JathakaConfig`] (or any
//! boxed [`PositionProvider`]) and turns birth data into a [`Chart`]:
//! sidereal graha positions, lagna, sign occupancy and the Vimshottari
//! dasha timeline.
//!
//! # Quick start
//!
//! ```rust
//! use jathaka_rs::*;
//!
//! let engine = Jathaka::analytic();
//! let birth = BirthData::parse("1990-05-15 10:30", "+05:30", 13.0827, 80.2707).unwrap();
//! let chart = engine.compute_chart(&birth).unwrap();
//! println!("lagna: {}, moon: {}", chart.ascendant.rashi(), chart.moon.nakshatra());
//! ```

pub mod chart;
pub mod convenience;
pub mod engine;
pub mod error;
pub mod geocode;
pub mod grid;

pub use chart::{BirthData, Chart, CurrentPeriods, GrahaPosition, Occupant, Transits, occupancy};
pub use convenience::{
    birth_at_place, birth_from_place, compatibility, current_periods, current_periods_now,
};
pub use engine::{Jathaka, build_provider};
pub use error::JathakaError;
pub use geocode::{
    Gazetteer, GeocodeError, Geocoder, Place, ResolvedPlace, resolve_or, resolve_or_default,
};
pub use grid::{GridCell, SOUTH_INDIAN_CELLS, SouthIndianGrid, south_indian_grid};

// Re-export the types callers need so `use jathaka_rs::*` is enough.
pub use jathaka_config::{ConfigError, JathakaConfig, ProviderConfig};
pub use jathaka_core::{
    AnalyticProvider, Body, GeoLocation, NodeMode, PositionProvider, RemoteProvider, Resolution,
    TabulatedEphemeris,
};
pub use jathaka_time::{
    CivilDateTime, CivilTimeNormalizer, FixedOffsetNormalizer, Instant, UtcOffset,
    ZoneTableNormalizer,
};
pub use jathaka_vedic_base::{
    AyanamshaModel, AyanamshaSystem, ChartPosition, CompatibilityResult, DashaBalance,
    DashaPeriod, DashaSnapshot, DashaTimeline, Dms, Graha, Nakshatra, PoruthamRule, Rashi, Vaar,
    Verdict, deg_to_dms,
};
