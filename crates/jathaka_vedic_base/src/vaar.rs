//! Vaar (weekday) and its ruling graha.

use std::fmt::{Display, Formatter};

use jathaka_time::{Instant, UtcOffset, weekday_index};
use serde::{Deserialize, Serialize};

use crate::graha::Graha;

/// The seven weekdays, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vaar {
    Ravivaar,
    Somvaar,
    Mangalvaar,
    Budhvaar,
    Guruvaar,
    Shukravaar,
    Shanivaar,
}

pub const ALL_VAARS: [Vaar; 7] = [
    Vaar::Ravivaar,
    Vaar::Somvaar,
    Vaar::Mangalvaar,
    Vaar::Budhvaar,
    Vaar::Guruvaar,
    Vaar::Shukravaar,
    Vaar::Shanivaar,
];

impl Vaar {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ravivaar => "Ravivaar",
            Self::Somvaar => "Somvaar",
            Self::Mangalvaar => "Mangalvaar",
            Self::Budhvaar => "Budhvaar",
            Self::Guruvaar => "Guruvaar",
            Self::Shukravaar => "Shukravaar",
            Self::Shanivaar => "Shanivaar",
        }
    }

    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Ravivaar => "Sunday",
            Self::Somvaar => "Monday",
            Self::Mangalvaar => "Tuesday",
            Self::Budhvaar => "Wednesday",
            Self::Guruvaar => "Thursday",
            Self::Shukravaar => "Friday",
            Self::Shanivaar => "Saturday",
        }
    }

    /// 0 = Sunday .. 6 = Saturday.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(index: u8) -> Self {
        ALL_VAARS[(index % 7) as usize]
    }

    /// Day lord.
    pub const fn lord(self) -> Graha {
        match self {
            Self::Ravivaar => Graha::Surya,
            Self::Somvaar => Graha::Chandra,
            Self::Mangalvaar => Graha::Mangal,
            Self::Budhvaar => Graha::Buddh,
            Self::Guruvaar => Graha::Guru,
            Self::Shukravaar => Graha::Shukra,
            Self::Shanivaar => Graha::Shani,
        }
    }
}

impl Display for Vaar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Civil weekday of a Julian Day at the given UTC offset.
///
/// Uses the calendar day, not the sunrise-to-sunrise Vedic day.
pub fn vaar_from_jd(jd: f64, offset: UtcOffset) -> Vaar {
    Vaar::from_index(weekday_index(jd + offset.as_days()))
}

pub fn vaar_at(instant: Instant, offset: UtcOffset) -> Vaar {
    Vaar::from_index(instant.weekday_at(offset))
}

/// Graha ruling the weekday of `jd` at `offset`.
pub fn vaar_lord(jd: f64, offset: UtcOffset) -> Graha {
    vaar_from_jd(jd, offset).lord()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_is_saturday() {
        assert_eq!(vaar_from_jd(2_451_545.0, UtcOffset::UTC), Vaar::Shanivaar);
        assert_eq!(vaar_lord(2_451_545.0, UtcOffset::UTC), Graha::Shani);
    }

    #[test]
    fn birth_day_is_tuesday() {
        // 1990-05-15 10:30 IST
        let offset = UtcOffset::from_hm(5, 30).unwrap();
        let v = vaar_from_jd(2_448_026.708_333_3, offset);
        assert_eq!(v, Vaar::Mangalvaar);
        assert_eq!(v.lord(), Graha::Mangal);
    }

    #[test]
    fn offset_can_change_the_day() {
        // 2000-01-01 20:00 UTC is already Sunday in IST.
        let jd = 2_451_545.0 + 8.0 / 24.0;
        assert_eq!(vaar_from_jd(jd, UtcOffset::UTC), Vaar::Shanivaar);
        let ist = UtcOffset::from_hm(5, 30).unwrap();
        assert_eq!(vaar_from_jd(jd, ist), Vaar::Ravivaar);
    }
}
