//! Rashi (zodiac sign) and DMS (degrees-minutes-seconds) computation.
//!
//! The sidereal ecliptic is divided into 12 equal signs of 30 degrees,
//! starting from Mesha at 0 deg.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::util::normalize_360;

/// Span of one rashi in degrees.
pub const RASHI_SPAN: f64 = 30.0;

/// The 12 rashis starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha = 0).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Rashi at `index mod 12`.
    pub const fn from_index(index: u8) -> Self {
        ALL_RASHIS[(index % 12) as usize]
    }

    /// Start of the sign in sidereal degrees.
    pub fn start_deg(self) -> f64 {
        self.index() as f64 * RASHI_SPAN
    }

    /// The sign `steps` places ahead (negative steps go backwards).
    pub fn offset(self, steps: i32) -> Self {
        Self::from_index((self.index() as i32 + steps).rem_euclid(12) as u8)
    }
}

impl Display for Rashi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    /// Whole degrees.
    pub degrees: u16,
    /// Arc-minutes, 0..59.
    pub minutes: u8,
    /// Arc-seconds, [0, 60).
    pub seconds: f64,
}

impl Display for Dms {
    /// `23°51'11"`, seconds rounded down to whole arc-seconds.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\u{b0}{:02}'{:02}\"",
            self.degrees,
            self.minutes,
            self.seconds.floor() as u8
        )
    }
}

/// Full rashi placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RashiInfo {
    pub rashi: Rashi,
    /// 0-based rashi index (0 = Mesha).
    pub rashi_index: u8,
    /// Position within the rashi as DMS.
    pub dms: Dms,
    /// Decimal degrees within the rashi, [0, 30).
    pub degrees_in_rashi: f64,
}

/// Convert DMS back to decimal degrees.
pub fn dms_to_deg(dms: &Dms) -> f64 {
    dms.degrees as f64 + dms.minutes as f64 / 60.0 + dms.seconds / 3600.0
}

/// Convert decimal degrees to DMS. Negative input uses the absolute value.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let degrees = d.floor();
    let remainder = (d - degrees) * 60.0;
    let minutes = remainder.floor();
    let seconds = (remainder - minutes) * 60.0;
    Dms {
        degrees: degrees as u16,
        minutes: minutes as u8,
        seconds,
    }
}

/// Determine the rashi from a sidereal longitude.
///
/// Mesha = [0, 30), Vrishabha = [30, 60), ...
pub fn rashi_from_longitude(sidereal_lon_deg: f64) -> RashiInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let rashi_index = ((lon / RASHI_SPAN).floor() as u8).min(11);
    let degrees_in_rashi = lon - rashi_index as f64 * RASHI_SPAN;
    RashiInfo {
        rashi: ALL_RASHIS[rashi_index as usize],
        rashi_index,
        dms: deg_to_dms(degrees_in_rashi),
        degrees_in_rashi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, r) in ALL_RASHIS.iter().enumerate() {
            assert_eq!(r.index() as usize, i);
            assert_eq!(Rashi::from_index(i as u8), *r);
        }
    }

    #[test]
    fn deg_to_dms_known() {
        // 23.853 deg = 23 deg 51' 10.8"
        let d = deg_to_dms(23.853);
        assert_eq!(d.degrees, 23);
        assert_eq!(d.minutes, 51);
        assert!((d.seconds - 10.8).abs() < 0.01);
    }

    #[test]
    fn dms_round_trip() {
        let d = deg_to_dms(123.456_789);
        assert!((dms_to_deg(&d) - 123.456_789).abs() < 1e-9);
    }

    #[test]
    fn dms_display() {
        assert_eq!(deg_to_dms(23.853_055_6).to_string(), "23\u{b0}51'11\"");
        assert_eq!(deg_to_dms(5.5).to_string(), "5\u{b0}30'00\"");
    }

    #[test]
    fn boundaries_belong_to_next_sign() {
        for i in 0..12u8 {
            let info = rashi_from_longitude(i as f64 * 30.0);
            assert_eq!(info.rashi_index, i);
            assert!(info.degrees_in_rashi.abs() < 1e-10);
        }
    }

    #[test]
    fn wraps_and_negatives() {
        assert_eq!(rashi_from_longitude(365.0).rashi, Rashi::Mesha);
        let info = rashi_from_longitude(-10.0);
        assert_eq!(info.rashi, Rashi::Meena);
        assert!((info.degrees_in_rashi - 20.0).abs() < 1e-10);
    }

    #[test]
    fn offset_wraps() {
        assert_eq!(Rashi::Meena.offset(1), Rashi::Mesha);
        assert_eq!(Rashi::Mesha.offset(-1), Rashi::Meena);
        assert_eq!(Rashi::Karka.offset(24), Rashi::Karka);
    }
}
