//! Civil date/time input, UTC offsets and normalization to UTC.
//!
//! Civil timestamps are validated through `chrono` so impossible dates
//! (Feb 30, hour 25, ...) are rejected instead of silently rolled over.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::TimeError;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// A validated wall-clock date and time, without zone information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CivilDateTime {
    inner: NaiveDateTime,
}

impl CivilDateTime {
    /// Build from calendar fields, rejecting impossible combinations.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, TimeError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            TimeError::InvalidInput(format!("no such date {year:04}-{month:02}-{day:02}"))
        })?;
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| {
            TimeError::InvalidInput(format!("no such time {hour:02}:{minute:02}:{second:02}"))
        })?;
        Ok(Self {
            inner: NaiveDateTime::new(date, time),
        })
    }

    /// Parse a separate date (`YYYY-MM-DD`) and time (`HH:MM` or `HH:MM:SS`).
    pub fn from_date_and_time(date: &str, time: &str) -> Result<Self, TimeError> {
        format!("{} {}", date.trim(), time.trim()).parse()
    }

    pub fn from_naive(inner: NaiveDateTime) -> Self {
        Self { inner }
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.inner
    }

    pub fn year(&self) -> i32 {
        self.inner.year()
    }

    pub fn month(&self) -> u32 {
        self.inner.month()
    }

    pub fn day(&self) -> u32 {
        self.inner.day()
    }

    pub fn hour(&self) -> u32 {
        self.inner.hour()
    }

    pub fn minute(&self) -> u32 {
        self.inner.minute()
    }

    pub fn second(&self) -> u32 {
        self.inner.second()
    }

    /// Time of day as fractional hours, e.g. 10:30 -> 10.5.
    pub fn fractional_hour(&self) -> f64 {
        self.hour() as f64 + self.minute() as f64 / 60.0 + self.second() as f64 / 3600.0
    }

    /// Shift by a UTC offset, producing the matching UTC wall-clock time.
    pub fn to_utc(&self, offset: UtcOffset) -> Result<Self, TimeError> {
        self.inner
            .checked_sub_signed(TimeDelta::minutes(offset.minutes() as i64))
            .map(Self::from_naive)
            .ok_or_else(|| TimeError::InvalidInput(format!("{self} {offset} overflows")))
    }
}

impl FromStr for CivilDateTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(Self::from_naive)
            .ok_or_else(|| {
                TimeError::InvalidInput(format!("expected YYYY-MM-DD HH:MM[:SS], got {s:?}"))
            })
    }
}

impl Display for CivilDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Fixed offset from UTC in whole minutes (east positive).
///
/// Serialized as the signed minute count; deserialization applies the same
/// range check as [`UtcOffset::from_minutes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UtcOffset {
    minutes: i32,
}

impl UtcOffset {
    /// Largest offset in use anywhere (UTC+14:00).
    pub const MAX_MINUTES: i32 = 14 * 60;

    pub const UTC: Self = Self { minutes: 0 };

    pub fn from_minutes(minutes: i32) -> Result<Self, TimeError> {
        if minutes.abs() > Self::MAX_MINUTES {
            return Err(TimeError::InvalidOffset(format!(
                "{minutes} minutes is beyond +/-14:00"
            )));
        }
        Ok(Self { minutes })
    }

    pub fn from_hm(hours: i32, minutes: i32) -> Result<Self, TimeError> {
        let sign = if hours < 0 { -1 } else { 1 };
        Self::from_minutes(hours * 60 + sign * minutes)
    }

    pub const fn minutes(self) -> i32 {
        self.minutes
    }

    /// Offset as a fraction of a day.
    pub fn as_days(self) -> f64 {
        self.minutes as f64 / 1440.0
    }
}

impl TryFrom<i32> for UtcOffset {
    type Error = TimeError;

    fn try_from(minutes: i32) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}

impl From<UtcOffset> for i32 {
    fn from(offset: UtcOffset) -> Self {
        offset.minutes
    }
}

impl FromStr for UtcOffset {
    type Err = TimeError;

    /// Accepts `Z`, `+05:30`, `-08:00`, `+0530`, `+5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
            return Ok(Self::UTC);
        }
        let bad = || TimeError::InvalidOffset(s.to_string());
        let (sign, rest) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(bad()),
        };
        let (h, m) = if let Some((h, m)) = rest.split_once(':') {
            (h, m)
        } else if rest.len() == 4 {
            rest.split_at(2)
        } else {
            (rest, "0")
        };
        // The sign is only allowed in front: reject "+-05:30", "+ 5".
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(h) || !digits(m) {
            return Err(bad());
        }
        let hours: i32 = h.parse().map_err(|_| bad())?;
        let minutes: i32 = m.parse().map_err(|_| bad())?;
        if !(0..60).contains(&minutes) {
            return Err(bad());
        }
        Self::from_minutes(sign * (hours * 60 + minutes))
    }
}

impl Display for UtcOffset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.minutes < 0 { '-' } else { '+' };
        let abs = self.minutes.abs();
        write!(f, "{sign}{:02}:{:02}", abs / 60, abs % 60)
    }
}

/// Resolves a civil timestamp in a named zone to UTC.
///
/// Full timezone-database resolution lives outside this crate; implementors
/// only need to answer which offset applies.
pub trait CivilTimeNormalizer {
    /// UTC offset in force for `local` in `zone`.
    fn utc_offset(&self, zone: &str, local: &CivilDateTime) -> Result<UtcOffset, TimeError>;

    /// Convert `local` in `zone` to a UTC civil timestamp.
    fn to_utc(&self, zone: &str, local: &CivilDateTime) -> Result<CivilDateTime, TimeError> {
        let offset = self.utc_offset(zone, local)?;
        local.to_utc(offset)
    }
}

/// Treats the zone string itself as an offset (`+05:30`, `Z`).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOffsetNormalizer;

impl CivilTimeNormalizer for FixedOffsetNormalizer {
    fn utc_offset(&self, zone: &str, _local: &CivilDateTime) -> Result<UtcOffset, TimeError> {
        zone.parse()
    }
}

const ALWAYS: (i32, u32, u32) = (i32::MIN, 1, 1);

/// `(zone, first local date the offset applies, minutes)`, ascending per zone.
///
/// Transitions are kept to the day. Offsets before 1906 (local mean time)
/// are not modelled, nor is daylight saving outside the rows listed here.
const ZONE_RULES: &[(&str, (i32, u32, u32), i32)] = &[
    ("UTC", ALWAYS, 0),
    // Wartime +06:30 in 1941-42 and 1942-45.
    ("Asia/Kolkata", ALWAYS, 330),
    ("Asia/Kolkata", (1941, 10, 1), 390),
    ("Asia/Kolkata", (1942, 5, 15), 330),
    ("Asia/Kolkata", (1942, 9, 1), 390),
    ("Asia/Kolkata", (1945, 10, 15), 330),
    ("Asia/Colombo", ALWAYS, 330),
    ("Asia/Colombo", (1942, 1, 5), 360),
    ("Asia/Colombo", (1942, 9, 1), 390),
    ("Asia/Colombo", (1945, 10, 16), 330),
    ("Asia/Colombo", (1996, 5, 25), 390),
    ("Asia/Colombo", (1996, 10, 26), 360),
    ("Asia/Colombo", (2006, 4, 15), 330),
    ("Asia/Kathmandu", ALWAYS, 330),
    ("Asia/Kathmandu", (1986, 1, 1), 345),
    ("Asia/Dhaka", ALWAYS, 360),
    ("Asia/Dhaka", (2009, 6, 19), 420),
    ("Asia/Dhaka", (2010, 1, 1), 360),
    ("Asia/Yangon", ALWAYS, 390),
    ("Asia/Yangon", (1942, 5, 1), 540),
    ("Asia/Yangon", (1945, 5, 3), 390),
    ("Asia/Bangkok", ALWAYS, 420),
    ("Asia/Singapore", ALWAYS, 450),
    ("Asia/Singapore", (1942, 2, 16), 540),
    ("Asia/Singapore", (1945, 9, 12), 450),
    ("Asia/Singapore", (1982, 1, 1), 480),
    ("Asia/Tokyo", ALWAYS, 540),
    ("Asia/Dubai", ALWAYS, 240),
    ("Asia/Qatar", ALWAYS, 240),
    ("Asia/Qatar", (1972, 6, 1), 180),
    ("Asia/Riyadh", ALWAYS, 180),
];

const ZONE_ALIASES: &[(&str, &str)] = &[
    ("Etc/UTC", "UTC"),
    ("GMT", "UTC"),
    ("Asia/Calcutta", "Asia/Kolkata"),
    ("Asia/Rangoon", "Asia/Yangon"),
    ("Asia/Kuala_Lumpur", "Asia/Singapore"),
    ("Asia/Muscat", "Asia/Dubai"),
];

/// Offset in force in `zone` on the local date of `local`, if the zone is known.
fn zone_offset_minutes(zone: &str, local: &CivilDateTime) -> Option<i32> {
    let zone = ZONE_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(zone))
        .map_or(zone, |&(_, canonical)| canonical);
    let date = (local.year(), local.month(), local.day());
    ZONE_RULES
        .iter()
        .filter(|(name, _, _)| name.eq_ignore_ascii_case(zone))
        .take_while(|(_, from, _)| *from <= date)
        .last()
        .map(|&(_, _, minutes)| minutes)
}

/// Looks the zone up in a small table of historical offsets for South and
/// South-East Asian zones, then falls back to parsing it as an explicit
/// offset.
///
/// Zones outside the table, and daylight saving anywhere it is not listed,
/// need a full timezone database behind another [`CivilTimeNormalizer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneTableNormalizer;

impl CivilTimeNormalizer for ZoneTableNormalizer {
    fn utc_offset(&self, zone: &str, local: &CivilDateTime) -> Result<UtcOffset, TimeError> {
        let zone = zone.trim();
        if let Some(minutes) = zone_offset_minutes(zone, local) {
            return UtcOffset::from_minutes(minutes);
        }
        zone.parse::<UtcOffset>()
            .map_err(|_| TimeError::UnknownTimezone(zone.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_impossible_date() {
        let err = CivilDateTime::new(1990, 2, 30, 10, 0, 0).unwrap_err();
        assert!(matches!(err, TimeError::InvalidInput(_)));
    }

    #[test]
    fn rejects_impossible_time() {
        assert!(CivilDateTime::new(1990, 5, 15, 24, 0, 0).is_err());
        assert!(CivilDateTime::new(1990, 5, 15, 10, 60, 0).is_err());
    }

    #[test]
    fn parses_space_and_t_separators() {
        let a: CivilDateTime = "1990-05-15 10:30".parse().unwrap();
        let b: CivilDateTime = "1990-05-15T10:30:00".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.hour(), 10);
        assert_eq!(a.minute(), 30);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("15/05/1990 10:30".parse::<CivilDateTime>().is_err());
        assert!("1990-13-01 10:30".parse::<CivilDateTime>().is_err());
        assert!("".parse::<CivilDateTime>().is_err());
    }

    #[test]
    fn date_and_time_pair() {
        let c = CivilDateTime::from_date_and_time("1990-05-15", "10:30").unwrap();
        assert!((c.fractional_hour() - 10.5).abs() < 1e-12);
    }

    #[test]
    fn offset_parsing() {
        assert_eq!("+05:30".parse::<UtcOffset>().unwrap().minutes(), 330);
        assert_eq!("-08:00".parse::<UtcOffset>().unwrap().minutes(), -480);
        assert_eq!("+0545".parse::<UtcOffset>().unwrap().minutes(), 345);
        assert_eq!("+5".parse::<UtcOffset>().unwrap().minutes(), 300);
        assert_eq!("Z".parse::<UtcOffset>().unwrap(), UtcOffset::UTC);
    }

    #[test]
    fn offset_rejects_out_of_range() {
        assert!("+15:00".parse::<UtcOffset>().is_err());
        assert!("+05:75".parse::<UtcOffset>().is_err());
        assert!("0530".parse::<UtcOffset>().is_err());
    }

    #[test]
    fn offset_rejects_sign_inside_fields() {
        assert!("+-05:30".parse::<UtcOffset>().is_err());
        assert!("-+05:30".parse::<UtcOffset>().is_err());
        assert!("+05:-30".parse::<UtcOffset>().is_err());
        assert!("+ 5".parse::<UtcOffset>().is_err());
        assert!("+:30".parse::<UtcOffset>().is_err());
    }

    #[test]
    fn offset_serde_checks_range() {
        let off: UtcOffset = serde_json::from_str("330").unwrap();
        assert_eq!(off.minutes(), 330);
        assert_eq!(serde_json::to_string(&off).unwrap(), "330");
        assert!(serde_json::from_str::<UtcOffset>("900").is_err());
        assert!(serde_json::from_str::<UtcOffset>("-841").is_err());
    }

    #[test]
    fn offset_display_round_trip() {
        let off = UtcOffset::from_hm(-3, 30).unwrap();
        assert_eq!(off.minutes(), -210);
        assert_eq!(off.to_string(), "-03:30");
    }

    #[test]
    fn to_utc_crosses_midnight() {
        let local = CivilDateTime::new(1990, 5, 15, 2, 0, 0).unwrap();
        let utc = local.to_utc("+05:30".parse().unwrap()).unwrap();
        assert_eq!((utc.day(), utc.hour(), utc.minute()), (14, 20, 30));
    }

    #[test]
    fn zone_table_knows_kolkata() {
        let local = CivilDateTime::new(1990, 5, 15, 10, 30, 0).unwrap();
        let utc = ZoneTableNormalizer.to_utc("Asia/Kolkata", &local).unwrap();
        assert_eq!((utc.hour(), utc.minute()), (5, 0));
    }

    #[test]
    fn zone_table_follows_historical_offsets() {
        let at = |zone: &str, y, m, d| {
            let local = CivilDateTime::new(y, m, d, 12, 0, 0).unwrap();
            ZoneTableNormalizer.utc_offset(zone, &local).unwrap().minutes()
        };
        assert_eq!(at("Asia/Kolkata", 1944, 6, 1), 390);
        assert_eq!(at("Asia/Kolkata", 1945, 10, 14), 390);
        assert_eq!(at("Asia/Kolkata", 1945, 10, 15), 330);
        assert_eq!(at("Asia/Kolkata", 1930, 1, 1), 330);
        assert_eq!(at("Asia/Calcutta", 1944, 6, 1), 390);
        assert_eq!(at("Asia/Colombo", 2000, 1, 1), 360);
        assert_eq!(at("Asia/Colombo", 2010, 1, 1), 330);
        assert_eq!(at("Asia/Singapore", 1980, 1, 1), 450);
        assert_eq!(at("Asia/Kuala_Lumpur", 1990, 5, 15), 480);
        assert_eq!(at("Asia/Kathmandu", 1980, 1, 1), 330);
        assert_eq!(at("Asia/Kathmandu", 1990, 1, 1), 345);
        assert_eq!(at("gmt", 1990, 1, 1), 0);
    }

    #[test]
    fn zone_table_accepts_explicit_offset() {
        let local = CivilDateTime::new(2024, 1, 1, 0, 0, 0).unwrap();
        let off = ZoneTableNormalizer.utc_offset("+09:00", &local).unwrap();
        assert_eq!(off.minutes(), 540);
    }

    #[test]
    fn zone_table_rejects_unknown_zone() {
        let local = CivilDateTime::new(2024, 1, 1, 0, 0, 0).unwrap();
        let err = ZoneTableNormalizer.utc_offset("Mars/Olympus", &local).unwrap_err();
        assert_eq!(err, TimeError::UnknownTimezone("Mars/Olympus".into()));
    }
}
