//! Vedic building blocks for the jathaka engine.
//!
//! This crate provides:
//! - Ayanamsha models for the supported sidereal reference systems
//! - Rashi, nakshatra and pada mapping of sidereal longitudes
//! - Lagna (Ascendant) and MC from local sidereal time
//! - Graha and vaar (weekday) tables
//! - The Vimshottari dasha engine
//! - The ten-rule porutham compatibility check
//!
//! Everything here is a pure function of its inputs; body positions come
//! from a `jathaka_core::PositionProvider` chosen by the caller.

pub mod ayanamsha;
pub mod dasha;
pub mod error;
pub mod graha;
pub mod lagna;
pub mod nakshatra;
pub mod porutham;
pub mod position;
pub mod rashi;
pub mod util;
pub mod vaar;

pub use ayanamsha::{
    ALL_SYSTEMS, AyanamshaModel, AyanamshaSystem, PRECESSION_ARCSEC_PER_YEAR, ayanamsha_deg,
    tropical_to_sidereal,
};
pub use dasha::{
    ActivePeriod, BhuktiPeriod, DashaBalance, DashaLevel, DashaPeriod, DashaSnapshot,
    DashaTimeline, PeriodSpan, VIMSHOTTARI_SEQUENCE, YearsMonthsDays, current_period_at,
    find_active_period, nakshatra_lord, snapshot_at, vimshottari_timeline,
};
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Graha, SAPTA_GRAHAS, rashi_lord};
pub use lagna::{
    armc_deg, ascendant_from_armc_deg, lagna_and_mc_deg, lagna_sidereal_deg, lagna_tropical_deg,
    mc_from_armc_deg, mc_tropical_deg,
};
pub use nakshatra::{
    ALL_NAKSHATRAS, NAKSHATRA_SPAN, Nakshatra, NakshatraInfo, PADA_SPAN, nakshatra_from_longitude,
};
pub use porutham::{
    ALL_RULES, CompatibilityResult, Gana, MoonPlacement, PoruthamRule, RuleOutcome, Verdict,
    porutham,
};
pub use position::{ChartPosition, degree_in_sign, mansion_index, pada, sign_index};
pub use rashi::{ALL_RASHIS, Dms, RASHI_SPAN, Rashi, RashiInfo, deg_to_dms, dms_to_deg, rashi_from_longitude};
pub use util::normalize_360;
pub use vaar::{ALL_VAARS, Vaar, vaar_at, vaar_from_jd, vaar_lord};
