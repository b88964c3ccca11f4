//! Core types for Vimshottari dasha calculations.

use serde::{Deserialize, Serialize};

use crate::graha::Graha;

/// Year length for dasha arithmetic. No leap adjustment.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Length of the full Vimshottari cycle in years.
pub const CYCLE_YEARS: f64 = 120.0;

/// Hierarchy levels generated by this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DashaLevel {
    /// Major period.
    Dasha,
    /// Minor period within a dasha.
    Bhukti,
}

impl DashaLevel {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dasha => "Dasha",
            Self::Bhukti => "Bhukti",
        }
    }
}

/// A contiguous span of time ruled by a graha.
pub trait PeriodSpan {
    fn lord(&self) -> Graha;
    /// JD, inclusive.
    fn start_jd(&self) -> f64;
    /// JD, exclusive (except for the final period of a sequence).
    fn end_jd(&self) -> f64;

    fn duration_days(&self) -> f64 {
        self.end_jd() - self.start_jd()
    }

    fn duration_years(&self) -> f64 {
        self.duration_days() / DAYS_PER_YEAR
    }
}

/// A minor period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BhuktiPeriod {
    pub lord: Graha,
    pub start_jd: f64,
    pub end_jd: f64,
}

impl PeriodSpan for BhuktiPeriod {
    fn lord(&self) -> Graha {
        self.lord
    }
    fn start_jd(&self) -> f64 {
        self.start_jd
    }
    fn end_jd(&self) -> f64 {
        self.end_jd
    }
}

/// A major period with its nine bhuktis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub lord: Graha,
    pub start_jd: f64,
    pub end_jd: f64,
    /// Length in years. Less than the full allotment for the first period.
    pub duration_years: f64,
    pub bhuktis: Vec<BhuktiPeriod>,
}

impl PeriodSpan for DashaPeriod {
    fn lord(&self) -> Graha {
        self.lord
    }
    fn start_jd(&self) -> f64 {
        self.start_jd
    }
    fn end_jd(&self) -> f64 {
        self.end_jd
    }
    fn duration_years(&self) -> f64 {
        self.duration_years
    }
}

/// Balance broken into calendar-style units (30.4375-day months).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearsMonthsDays {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

/// The part of the first dasha still to run at birth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashaBalance {
    pub lord: Graha,
    /// Remaining years of the first dasha.
    pub years: f64,
    /// Fraction of the Moon's nakshatra already traversed, [0, 1).
    pub elapsed_fraction: f64,
    pub breakdown: YearsMonthsDays,
}

/// The full 120-year sequence rooted at birth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaTimeline {
    pub birth_jd: f64,
    pub moon_sidereal_deg: f64,
    /// 0-based Moon nakshatra.
    pub nakshatra_index: u8,
    pub balance: DashaBalance,
    /// Exactly nine periods.
    pub periods: Vec<DashaPeriod>,
}

impl DashaTimeline {
    /// JD at which the final period ends.
    pub fn end_jd(&self) -> f64 {
        self.periods.last().map_or(self.birth_jd, |p| p.end_jd)
    }

    /// Whether `jd` falls inside the generated span (both ends inclusive).
    pub fn covers(&self, jd: f64) -> bool {
        self.periods
            .first()
            .is_some_and(|first| jd >= first.start_jd && jd <= self.end_jd())
    }
}

/// An active period at a query instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePeriod {
    pub level: DashaLevel,
    pub lord: Graha,
    pub start_jd: f64,
    pub end_jd: f64,
    /// Days from the query instant to `end_jd`.
    pub remaining_days: f64,
}

/// Active dasha and bhukti at a query instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashaSnapshot {
    pub query_jd: f64,
    pub dasha: ActivePeriod,
    pub bhukti: ActivePeriod,
}
