//! Julian Day <-> Gregorian calendar conversions.
//!
//! Source: Meeus, "Astronomical Algorithms" (2nd ed), Chapter 7.
//! The Gregorian century correction is applied for every date, so dates
//! before 1582-10-15 are treated as proleptic Gregorian.

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Day of the Unix epoch (1970-01-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Days in a Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert a Gregorian calendar date to a Julian Day.
///
/// `day` carries the time of day as a fraction (e.g. `15.25` is 06:00 on
/// the 15th). The input is expected to already be in UTC.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Convert a Julian Day back to `(year, month, day_with_fraction)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Julian centuries elapsed since J2000.0.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Day of week for a Julian Day, 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(jd: f64) -> u8 {
    ((jd + 1.5).floor().rem_euclid(7.0)) as u8
}
