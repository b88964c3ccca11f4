//! The nine grahas of Vedic astrology.
//!
//! Seven grahas are physical bodies placed by a position provider; Rahu and
//! Ketu are the lunar nodes and are computed locally.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use jathaka_core::{Body, LunarNode};
use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::rashi::Rashi;

/// The nine grahas, in traditional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Graha {
    Surya,
    Chandra,
    Mangal,
    Buddh,
    Guru,
    Shukra,
    Shani,
    Rahu,
    Ketu,
}

/// All nine grahas in order (0 = Surya, 8 = Ketu).
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

/// The seven physical grahas (excluding the nodes).
pub const SAPTA_GRAHAS: [Graha; 7] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
];

impl Graha {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Surya => "Sun",
            Self::Chandra => "Moon",
            Self::Mangal => "Mars",
            Self::Buddh => "Mercury",
            Self::Guru => "Jupiter",
            Self::Shukra => "Venus",
            Self::Shani => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// Two-letter abbreviation used in chart grids.
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Surya => "Su",
            Self::Chandra => "Mo",
            Self::Mangal => "Ma",
            Self::Buddh => "Me",
            Self::Guru => "Ju",
            Self::Shukra => "Ve",
            Self::Shani => "Sa",
            Self::Rahu => "Ra",
            Self::Ketu => "Ke",
        }
    }

    /// 0-based index (Surya = 0).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Physical body for the seven sapta grahas, `None` for the nodes.
    pub const fn body(self) -> Option<Body> {
        match self {
            Self::Surya => Some(Body::Sun),
            Self::Chandra => Some(Body::Moon),
            Self::Mangal => Some(Body::Mars),
            Self::Buddh => Some(Body::Mercury),
            Self::Guru => Some(Body::Jupiter),
            Self::Shukra => Some(Body::Venus),
            Self::Shani => Some(Body::Saturn),
            Self::Rahu | Self::Ketu => None,
        }
    }

    /// Lunar node for Rahu/Ketu, `None` otherwise.
    pub const fn node(self) -> Option<LunarNode> {
        match self {
            Self::Rahu => Some(LunarNode::Rahu),
            Self::Ketu => Some(LunarNode::Ketu),
            _ => None,
        }
    }

    pub const fn from_body(body: Body) -> Self {
        match body {
            Body::Sun => Self::Surya,
            Body::Moon => Self::Chandra,
            Body::Mars => Self::Mangal,
            Body::Mercury => Self::Buddh,
            Body::Jupiter => Self::Guru,
            Body::Venus => Self::Shukra,
            Body::Saturn => Self::Shani,
        }
    }

    pub const fn from_node(node: LunarNode) -> Self {
        match node {
            LunarNode::Rahu => Self::Rahu,
            LunarNode::Ketu => Self::Ketu,
        }
    }
}

impl Display for Graha {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Graha {
    type Err = VedicError;

    /// Accepts Sanskrit or English names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ALL_GRAHAS
            .iter()
            .copied()
            .find(|g| {
                g.name().eq_ignore_ascii_case(trimmed)
                    || g.english_name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or(VedicError::InvalidInput("unknown graha"))
    }
}

/// Sign lord. Rahu and Ketu rule no sign.
pub const fn rashi_lord(rashi: Rashi) -> Graha {
    match rashi {
        Rashi::Mesha | Rashi::Vrischika => Graha::Mangal,
        Rashi::Vrishabha | Rashi::Tula => Graha::Shukra,
        Rashi::Mithuna | Rashi::Kanya => Graha::Buddh,
        Rashi::Karka => Graha::Chandra,
        Rashi::Simha => Graha::Surya,
        Rashi::Dhanu | Rashi::Meena => Graha::Guru,
        Rashi::Makara | Rashi::Kumbha => Graha::Shani,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rashi::ALL_RASHIS;

    #[test]
    fn body_mapping_round_trips() {
        for g in SAPTA_GRAHAS {
            let body = g.body().unwrap();
            assert_eq!(Graha::from_body(body), g);
            assert!(g.node().is_none());
        }
        assert_eq!(Graha::Rahu.node(), Some(LunarNode::Rahu));
        assert!(Graha::Ketu.body().is_none());
    }

    #[test]
    fn every_sign_ruled_by_physical_graha() {
        for r in ALL_RASHIS {
            assert!(rashi_lord(r).body().is_some());
        }
        assert_eq!(rashi_lord(Rashi::Karka), Graha::Chandra);
        assert_eq!(rashi_lord(Rashi::Kumbha), Graha::Shani);
    }

    #[test]
    fn parse_both_languages() {
        assert_eq!("guru".parse::<Graha>().unwrap(), Graha::Guru);
        assert_eq!("Jupiter".parse::<Graha>().unwrap(), Graha::Guru);
        assert_eq!("KETU".parse::<Graha>().unwrap(), Graha::Ketu);
        assert!("pluto".parse::<Graha>().is_err());
    }
}
