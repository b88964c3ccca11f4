//! Chart value types.
//!
//! A [`Chart`] is plain data: sidereal positions of the nine grahas, the
//! lagna, sign occupancy and the Vimshottari timeline. Nothing here is
//! formatted or localised.

use jathaka_core::{GeoLocation, Resolution};
use jathaka_time::{CivilDateTime, Instant, TimeError, UtcOffset};
use jathaka_vedic_base::{
    ChartPosition, DashaBalance, DashaSnapshot, DashaTimeline, Dms, Graha, MoonPlacement, Rashi,
    Vaar, deg_to_dms, rashi_lord,
};
use serde::{Deserialize, Serialize};

/// Birth moment and place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    /// Local wall-clock time of birth.
    pub civil: CivilDateTime,
    /// UTC offset in force at birth.
    pub offset: UtcOffset,
    pub location: GeoLocation,
    /// `true` when `location` is a fallback for an unresolved place.
    #[serde(default)]
    pub approximated_location: bool,
}

impl BirthData {
    pub fn new(civil: CivilDateTime, offset: UtcOffset, location: GeoLocation) -> Self {
        Self {
            civil,
            offset,
            location,
            approximated_location: false,
        }
    }

    /// Parse `YYYY-MM-DD HH:MM[:SS]` and an offset such as `+05:30`.
    pub fn parse(
        datetime: &str,
        offset: &str,
        latitude_deg: f64,
        longitude_deg: f64,
    ) -> Result<Self, TimeError> {
        Ok(Self::new(
            datetime.parse()?,
            offset.parse()?,
            GeoLocation::new(latitude_deg, longitude_deg),
        ))
    }

    /// The birth instant on the UT Julian Day scale.
    pub fn instant(&self) -> Result<Instant, TimeError> {
        Instant::from_civil(&self.civil, self.offset)
    }
}

/// One graha's place in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrahaPosition {
    pub graha: Graha,
    /// Tropical longitude, when the provider produced one.
    pub tropical_deg: Option<f64>,
    pub position: ChartPosition,
    /// How much of `position` the provider actually resolved.
    pub resolution: Resolution,
}

impl GrahaPosition {
    pub fn rashi(&self) -> Rashi {
        self.position.rashi()
    }

    pub fn dms_in_sign(&self) -> Dms {
        deg_to_dms(self.position.degree_in_sign)
    }
}

/// Something that occupies a sign cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    Lagna,
    Graha(Graha),
}

impl Occupant {
    /// Two-letter label: `La` for the lagna, else the graha's short name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lagna => "La",
            Self::Graha(g) => g.short_name(),
        }
    }
}

/// Group grahas and the lagna by sidereal sign.
///
/// Each cell lists the lagna first, then grahas in traditional order.
pub fn occupancy(grahas: &[GrahaPosition], ascendant: &ChartPosition) -> [Vec<Occupant>; 12] {
    let mut cells: [Vec<Occupant>; 12] = std::array::from_fn(|_| Vec::new());
    cells[ascendant.sign_index as usize].push(Occupant::Lagna);
    for g in grahas {
        cells[g.position.sign_index as usize].push(Occupant::Graha(g.graha));
    }
    cells
}

/// A computed birth chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub birth: BirthData,
    pub instant: Instant,
    /// Ayanamsha used for every body in this chart.
    pub ayanamsha_deg: f64,
    pub weekday: Vaar,
    /// All nine grahas, in traditional order.
    pub grahas: Vec<GrahaPosition>,
    pub ascendant: ChartPosition,
    /// Sidereal midheaven.
    pub midheaven: ChartPosition,
    pub moon: ChartPosition,
    pub occupancy: [Vec<Occupant>; 12],
    pub dasha: DashaTimeline,
    pub balance: DashaBalance,
    pub approximated_location: bool,
}

impl Chart {
    pub fn graha(&self, graha: Graha) -> Option<&GrahaPosition> {
        self.grahas.iter().find(|g| g.graha == graha)
    }

    /// The Moon placement the porutham rules read.
    pub fn moon_placement(&self) -> MoonPlacement {
        MoonPlacement::from(&self.moon)
    }

    /// Lord of the rising sign.
    pub fn lagna_lord(&self) -> Graha {
        rashi_lord(self.ascendant.rashi())
    }

    pub fn ayanamsha_dms(&self) -> Dms {
        deg_to_dms(self.ayanamsha_deg)
    }

    /// Occupants of the sign `rashi`.
    pub fn occupants(&self, rashi: Rashi) -> &[Occupant] {
        &self.occupancy[rashi.index() as usize]
    }
}

/// Active periods at a query instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentPeriods {
    pub query: Instant,
    pub snapshot: DashaSnapshot,
}

impl CurrentPeriods {
    pub fn dasha_lord(&self) -> Graha {
        self.snapshot.dasha.lord
    }

    pub fn bhukti_lord(&self) -> Graha {
        self.snapshot.bhukti.lord
    }
}

/// Positions of all grahas at one instant, without a lagna or dasha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transits {
    pub instant: Instant,
    pub ayanamsha_deg: f64,
    pub grahas: Vec<GrahaPosition>,
}

impl Transits {
    pub fn graha(&self, graha: Graha) -> Option<&GrahaPosition> {
        self.grahas.iter().find(|g| g.graha == graha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(graha: Graha, lon: f64) -> GrahaPosition {
        GrahaPosition {
            graha,
            tropical_deg: None,
            position: ChartPosition::from_sidereal(lon),
            resolution: Resolution::Exact,
        }
    }

    #[test]
    fn occupancy_groups_by_sign() {
        let grahas = [at(Graha::Surya, 30.4), at(Graha::Chandra, 269.83), at(Graha::Buddh, 45.0)];
        let asc = ChartPosition::from_sidereal(96.87);
        let cells = occupancy(&grahas, &asc);
        assert_eq!(cells[1], vec![Occupant::Graha(Graha::Surya), Occupant::Graha(Graha::Buddh)]);
        assert_eq!(cells[3], vec![Occupant::Lagna]);
        assert_eq!(cells[8], vec![Occupant::Graha(Graha::Chandra)]);
        let total: usize = cells.iter().map(Vec::len).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn lagna_shares_cell_and_comes_first() {
        let grahas = [at(Graha::Shani, 100.0)];
        let asc = ChartPosition::from_sidereal(96.87);
        let cells = occupancy(&grahas, &asc);
        assert_eq!(cells[3], vec![Occupant::Lagna, Occupant::Graha(Graha::Shani)]);
    }

    #[test]
    fn occupant_labels() {
        assert_eq!(Occupant::Lagna.label(), "La");
        assert_eq!(Occupant::Graha(Graha::Chandra).label(), "Mo");
    }

    #[test]
    fn birth_data_parse() {
        let b = BirthData::parse("1990-05-15 10:30", "+05:30", 13.0827, 80.2707).unwrap();
        assert!((b.instant().unwrap().jd() - 2_448_026.708_333_3).abs() < 1e-6);
        assert!(!b.approximated_location);
        assert!(BirthData::parse("1990-02-30 10:30", "+05:30", 0.0, 0.0).is_err());
        assert!(BirthData::parse("1990-05-15 10:30", "+25:00", 0.0, 0.0).is_err());
    }
}
