//! Civil time handling and the Julian Day time scale.
//!
//! This crate provides:
//! - Julian Day <-> calendar conversions
//! - Validated civil timestamps, UTC offsets and the `CivilTimeNormalizer` seam
//! - Greenwich/local sidereal time and mean obliquity
//! - An `Instant` type carrying a UT Julian Day through the engine

pub mod civil;
pub mod error;
pub mod julian;
pub mod sidereal;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use civil::{
    CivilDateTime, CivilTimeNormalizer, FixedOffsetNormalizer, UtcOffset, ZoneTableNormalizer,
};
pub use error::TimeError;
pub use julian::{
    DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, jd_to_calendar,
    jd_to_centuries, weekday_index,
};
pub use sidereal::{gmst_deg, local_sidereal_time_deg, mean_obliquity_deg, normalize_360};

/// Length of the year used for period arithmetic.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// A point on the continuous UT Julian Day scale.
///
/// Immutable; arithmetic returns new values.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Instant {
    jd: f64,
}

impl Instant {
    pub const J2000: Self = Self { jd: J2000_JD };

    pub const fn from_jd(jd: f64) -> Self {
        Self { jd }
    }

    pub const fn jd(self) -> f64 {
        self.jd
    }

    /// Julian centuries since J2000.0.
    pub fn centuries_since_j2000(self) -> f64 {
        jd_to_centuries(self.jd)
    }

    /// Build from a UTC civil timestamp.
    pub fn from_utc_civil(utc: &CivilDateTime) -> Self {
        let day = utc.day() as f64 + utc.fractional_hour() / 24.0;
        Self::from_jd(calendar_to_jd(utc.year(), utc.month(), day))
    }

    /// Build from local civil time and the UTC offset in force.
    pub fn from_civil(local: &CivilDateTime, offset: UtcOffset) -> Result<Self, TimeError> {
        let utc = local.to_utc(offset)?;
        Ok(Self::from_utc_civil(&utc))
    }

    /// Build from a `chrono` UTC timestamp.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        let seconds = datetime.timestamp() as f64
            + datetime.timestamp_subsec_nanos() as f64 / 1e9;
        Self::from_jd(UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY)
    }

    /// Convert to a `chrono` UTC timestamp. `None` outside chrono's range.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        let seconds = (self.jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
        let secs = seconds.floor() as i64;
        let nanos = ((seconds - secs as f64) * 1e9) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos)
    }

    /// The current wall-clock instant.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    pub fn add_days(self, days: f64) -> Self {
        Self::from_jd(self.jd + days)
    }

    /// Advance by `years` of 365.25 days.
    pub fn add_years(self, years: f64) -> Self {
        self.add_days(years * DAYS_PER_YEAR)
    }

    /// Signed number of days from `self` to `later`.
    pub fn days_until(self, later: Instant) -> f64 {
        later.jd - self.jd
    }

    /// Weekday at a UTC offset, 0 = Sunday .. 6 = Saturday.
    pub fn weekday_at(self, offset: UtcOffset) -> u8 {
        weekday_index(self.jd + offset.as_days())
    }
}

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_utc() {
            Some(dt) => write!(f, "{} (JD {:.6})", dt.format("%Y-%m-%dT%H:%M:%SZ"), self.jd),
            None => write!(f, "JD {:.6}", self.jd),
        }
    }
}
