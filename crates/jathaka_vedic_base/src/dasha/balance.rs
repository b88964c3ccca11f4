//! Birth balance: how much of the first dasha remains at birth.
//!
//! Computed from the Moon's position within its nakshatra.

use super::types::{DAYS_PER_YEAR, YearsMonthsDays};
use crate::nakshatra::NAKSHATRA_SPAN;
use crate::util::normalize_360;

/// Days in the month unit of a balance breakdown.
pub const DAYS_PER_MONTH: f64 = DAYS_PER_YEAR / 12.0;

/// Compute the nakshatra birth balance.
///
/// Returns `(nakshatra_index, balance_years, elapsed_fraction)`:
/// - `nakshatra_index`: 0-based index (0 = Ashwini .. 26 = Revati)
/// - `balance_years`: remaining years of the starting lord's period
/// - `elapsed_fraction`: fraction of the nakshatra already traversed, [0, 1)
pub fn nakshatra_birth_balance(moon_sidereal_lon: f64, entry_period_years: f64) -> (u8, f64, f64) {
    let lon = normalize_360(moon_sidereal_lon);
    let nak_idx = ((lon / NAKSHATRA_SPAN).floor() as u8).min(26);
    let position_in_nak = lon - nak_idx as f64 * NAKSHATRA_SPAN;
    let elapsed_fraction = (position_in_nak / NAKSHATRA_SPAN).clamp(0.0, 1.0);
    let balance_years = entry_period_years * (1.0 - elapsed_fraction);
    (nak_idx, balance_years, elapsed_fraction)
}

/// Split a span of years into whole years, months and days.
pub fn years_to_ymd(years: f64) -> YearsMonthsDays {
    let total_days = years.max(0.0) * DAYS_PER_YEAR;
    let whole_years = (total_days / DAYS_PER_YEAR).floor();
    let rest = total_days - whole_years * DAYS_PER_YEAR;
    let months = (rest / DAYS_PER_MONTH).floor();
    let days = (rest - months * DAYS_PER_MONTH).floor();
    YearsMonthsDays {
        years: whole_years as u32,
        months: (months as u32).min(11),
        days: days as u32,
    }
}
