//! Sidereal longitude to sign / mansion / pada mapping.
//!
//! All functions are total: any finite input is first reduced to [0, 360).

use serde::{Deserialize, Serialize};

use crate::nakshatra::{NAKSHATRA_SPAN, Nakshatra, PADA_SPAN, nakshatra_from_longitude, NakshatraInfo};
use crate::rashi::{RASHI_SPAN, Rashi, RashiInfo, rashi_from_longitude};
use crate::util::normalize_360;

/// `floor(lon / 30) mod 12`.
pub fn sign_index(sidereal_deg: f64) -> u8 {
    ((normalize_360(sidereal_deg) / RASHI_SPAN).floor() as u8).min(11)
}

/// `floor(lon / (360/27)) mod 27`.
pub fn mansion_index(sidereal_deg: f64) -> u8 {
    ((normalize_360(sidereal_deg) / NAKSHATRA_SPAN).floor() as u8).min(26)
}

/// Pada within the mansion, 1-4.
pub fn pada(sidereal_deg: f64) -> u8 {
    let lon = normalize_360(sidereal_deg);
    // Measured from the mansion start so it agrees with `mansion_index`
    // when `lon` sits on a boundary.
    let within = (lon - mansion_index(lon) as f64 * NAKSHATRA_SPAN).max(0.0);
    ((within / PADA_SPAN).floor() as u8).min(3) + 1
}

/// `lon mod 30`, in [0, 30).
pub fn degree_in_sign(sidereal_deg: f64) -> f64 {
    let lon = normalize_360(sidereal_deg);
    lon - sign_index(lon) as f64 * RASHI_SPAN
}

/// Read-only view of a sidereal longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPosition {
    /// Sidereal longitude, [0, 360).
    pub longitude_deg: f64,
    /// 0-11, Mesha = 0.
    pub sign_index: u8,
    /// 0-26, Ashwini = 0.
    pub mansion_index: u8,
    /// 1-4.
    pub pada: u8,
    /// [0, 30).
    pub degree_in_sign: f64,
}

impl ChartPosition {
    pub fn from_sidereal(sidereal_deg: f64) -> Self {
        let lon = normalize_360(sidereal_deg);
        Self {
            longitude_deg: lon,
            sign_index: sign_index(lon),
            mansion_index: mansion_index(lon),
            pada: pada(lon),
            degree_in_sign: degree_in_sign(lon),
        }
    }

    pub fn rashi(&self) -> Rashi {
        Rashi::from_index(self.sign_index)
    }

    pub fn nakshatra(&self) -> Nakshatra {
        Nakshatra::from_index(self.mansion_index)
    }

    /// Full rashi placement including DMS.
    pub fn rashi_info(&self) -> RashiInfo {
        rashi_from_longitude(self.longitude_deg)
    }

    pub fn nakshatra_info(&self) -> NakshatraInfo {
        nakshatra_from_longitude(self.longitude_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn birth_moon_mapping() {
        // Moon of the 1990-05-15 Chennai chart
        let p = ChartPosition::from_sidereal(269.83);
        assert_eq!(p.sign_index, 8);
        assert_eq!(p.mansion_index, 20);
        assert_eq!(p.pada, 1);
        assert!((p.degree_in_sign - 29.83).abs() < 1e-9);
        assert_eq!(p.rashi(), Rashi::Dhanu);
        assert_eq!(p.nakshatra(), Nakshatra::UttaraAshadha);
    }

    #[test]
    fn mansion_boundary_starts_at_first_pada() {
        let p = ChartPosition::from_sidereal(40.0);
        assert_eq!((p.mansion_index, p.pada), (3, 1));
    }

    #[test]
    fn full_circle_folds_to_zero() {
        let p = ChartPosition::from_sidereal(360.0);
        assert_eq!((p.sign_index, p.mansion_index, p.pada), (0, 0, 1));
        assert!(p.degree_in_sign.abs() < 1e-12);
    }

    #[test]
    fn agrees_with_detailed_lookups() {
        for i in 0..720 {
            let lon = i as f64 * 0.5 + 0.01;
            let p = ChartPosition::from_sidereal(lon);
            assert_eq!(p.sign_index, p.rashi_info().rashi_index);
            let n = p.nakshatra_info();
            assert_eq!(p.mansion_index, n.nakshatra_index);
            assert_eq!(p.pada, n.pada);
        }
    }
}
