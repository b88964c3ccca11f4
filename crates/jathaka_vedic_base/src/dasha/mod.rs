//! Vimshottari dasha (planetary period) engine.
//!
//! Generation is pure: the timeline is a function of the birth JD and the
//! Moon's sidereal longitude. Lookup against a query instant lives in
//! [`query`].

pub mod balance;
pub mod query;
pub mod subperiod;
pub mod types;
pub mod vimshottari;

pub use balance::{nakshatra_birth_balance, years_to_ymd};
pub use query::{current_period_at, find_active_period, snapshot_at};
pub use types::{
    ActivePeriod, BhuktiPeriod, CYCLE_YEARS, DAYS_PER_YEAR, DashaBalance, DashaLevel,
    DashaPeriod, DashaSnapshot, DashaTimeline, PeriodSpan, YearsMonthsDays,
};
pub use vimshottari::{
    VIMSHOTTARI_SEQUENCE, birth_balance, bhuktis_for, full_years, nakshatra_lord,
    vimshottari_timeline,
};
