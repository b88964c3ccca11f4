//! Nakshatra (lunar mansion) computation.
//!
//! The sidereal ecliptic is divided into 27 equal nakshatras of 13 deg 20'
//! each, and each nakshatra into 4 padas of 3 deg 20'.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::dasha::vimshottari::nakshatra_lord;
use crate::graha::Graha;
use crate::util::normalize_360;

/// Span of one nakshatra: 360/27 = 13.3333... degrees.
pub const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;

/// Span of one pada: 13.3333.../4 = 3.3333... degrees.
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN / 4.0;

/// The 27 nakshatras from Ashwini to Revati.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishtha,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

/// All 27 nakshatras in order (0 = Ashwini, 26 = Revati).
pub const ALL_NAKSHATRAS: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishtha,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

impl Nakshatra {
    /// Sanskrit name of the nakshatra.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishtha => "Dhanishtha",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// 0-based index (Ashwini = 0 .. Revati = 26).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Nakshatra at `index mod 27`.
    pub const fn from_index(index: u8) -> Self {
        ALL_NAKSHATRAS[(index % 27) as usize]
    }

    /// Ruling graha, which is also the Vimshottari dasha lord at birth.
    pub const fn lord(self) -> Graha {
        nakshatra_lord(self.index())
    }

    /// Start of the nakshatra in sidereal degrees.
    pub fn start_deg(self) -> f64 {
        self.index() as f64 * NAKSHATRA_SPAN
    }
}

impl Display for Nakshatra {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a nakshatra lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NakshatraInfo {
    pub nakshatra: Nakshatra,
    /// 0-based index (0 = Ashwini).
    pub nakshatra_index: u8,
    /// Pada (quarter) within the nakshatra, 1-4.
    pub pada: u8,
    /// Decimal degrees within the nakshatra, [0, 13.333...).
    pub degrees_in_nakshatra: f64,
    /// Decimal degrees within the pada, [0, 3.333...).
    pub degrees_in_pada: f64,
}

impl NakshatraInfo {
    /// Fraction of the nakshatra already traversed, [0, 1).
    pub fn elapsed_fraction(&self) -> f64 {
        self.degrees_in_nakshatra / NAKSHATRA_SPAN
    }
}

/// Determine nakshatra and pada from a sidereal longitude.
pub fn nakshatra_from_longitude(sidereal_lon_deg: f64) -> NakshatraInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let nak_idx = ((lon / NAKSHATRA_SPAN).floor() as u8).min(26);
    let degrees_in_nakshatra = lon - nak_idx as f64 * NAKSHATRA_SPAN;
    let pada_idx = ((degrees_in_nakshatra / PADA_SPAN).floor() as u8).min(3);
    let degrees_in_pada = degrees_in_nakshatra - pada_idx as f64 * PADA_SPAN;

    NakshatraInfo {
        nakshatra: ALL_NAKSHATRAS[nak_idx as usize],
        nakshatra_index: nak_idx,
        pada: pada_idx + 1,
        degrees_in_nakshatra,
        degrees_in_pada,
    }
}
