//! Greenwich Mean Sidereal Time and mean obliquity of the ecliptic.
//!
//! Everything here works in degrees on a UT Julian Day; UT1 - UTC is
//! ignored, which is well below the precision of the rest of the engine.
//!
//! Sources:
//! - GMST polynomial: Meeus, "Astronomical Algorithms" (2nd ed), Eq. 12.4.
//! - Obliquity: Laskar-style cubic truncated to four terms.

use crate::julian::{J2000_JD, jd_to_centuries};

/// Normalize an angle to [0, 360) degrees.
///
/// `rem_euclid` can return exactly 360.0 for tiny negative inputs; that
/// case is folded back to 0.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Greenwich Mean Sidereal Time in degrees, range [0, 360).
///
/// GMST = 280.46061837 + 360.98564736629 * (JD - 2451545)
///        + 0.000387933 T^2 - T^3 / 38710000
pub fn gmst_deg(jd_ut: f64) -> f64 {
    let t = jd_to_centuries(jd_ut);
    let t2 = t * t;
    let t3 = t2 * t;
    let gmst = 280.460_618_37 + 360.985_647_366_29 * (jd_ut - J2000_JD) + 0.000_387_933 * t2
        - t3 / 38_710_000.0;
    normalize_360(gmst)
}

/// Local Sidereal Time (ARMC) from GMST and observer east longitude.
///
/// Returns degrees in [0, 360).
pub fn local_sidereal_time_deg(gmst_deg: f64, longitude_east_deg: f64) -> f64 {
    normalize_360(gmst_deg + longitude_east_deg)
}

/// Mean obliquity of the ecliptic in degrees for `t` Julian centuries
/// since J2000.0.
pub fn mean_obliquity_deg(t: f64) -> f64 {
    23.439_291 - 0.013_004_2 * t - 0.000_000_16 * t * t + 0.000_000_504 * t * t * t
}
