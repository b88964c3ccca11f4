//! Vimshottari dasha: the 120-year, nine-lord cycle.
//!
//! The Moon's nakshatra at birth selects the first lord; the Moon's
//! progress through that nakshatra fixes how much of the first period has
//! already elapsed. Each dasha is split into nine bhuktis starting from its
//! own lord, proportional to the lords' full periods.

use log::debug;

use super::balance::{nakshatra_birth_balance, years_to_ymd};
use super::subperiod::{build_cyclic_sequence, proportional_children};
use super::types::{
    BhuktiPeriod, CYCLE_YEARS, DAYS_PER_YEAR, DashaBalance, DashaPeriod, DashaTimeline,
};
use crate::graha::Graha;
use crate::position::mansion_index;
use crate::util::normalize_360;

/// Lords in cycle order with their full periods in years. Sums to 120.
pub const VIMSHOTTARI_SEQUENCE: [(Graha, f64); 9] = [
    (Graha::Ketu, 7.0),
    (Graha::Shukra, 20.0),
    (Graha::Surya, 6.0),
    (Graha::Chandra, 10.0),
    (Graha::Mangal, 7.0),
    (Graha::Rahu, 18.0),
    (Graha::Guru, 16.0),
    (Graha::Shani, 19.0),
    (Graha::Buddh, 17.0),
];

/// Lord of a nakshatra: the cycle repeats every nine nakshatras from Ashwini.
pub const fn nakshatra_lord(nakshatra_index: u8) -> Graha {
    VIMSHOTTARI_SEQUENCE[(nakshatra_index % 27 % 9) as usize].0
}

/// Full Vimshottari period of a lord, in years.
pub fn full_years(lord: Graha) -> f64 {
    VIMSHOTTARI_SEQUENCE
        .iter()
        .find(|(g, _)| *g == lord)
        .map_or(0.0, |&(_, y)| y)
}

/// Nine bhuktis of a dasha, starting from the dasha's own lord.
pub fn bhuktis_for(dasha: &DashaPeriod) -> Vec<BhuktiPeriod> {
    let seq = build_cyclic_sequence(&VIMSHOTTARI_SEQUENCE, dasha.lord);
    proportional_children(dasha, &seq, CYCLE_YEARS)
}

/// Birth balance for a Moon sidereal longitude.
pub fn birth_balance(moon_sidereal_deg: f64) -> (u8, DashaBalance) {
    let lon = normalize_360(moon_sidereal_deg);
    let lord = nakshatra_lord(mansion_index(lon));
    let (nak_idx, years, elapsed_fraction) = nakshatra_birth_balance(lon, full_years(lord));
    (
        nak_idx,
        DashaBalance {
            lord,
            years,
            elapsed_fraction,
            breakdown: years_to_ymd(years),
        },
    )
}

/// Generate the nine dashas (with bhuktis) from birth.
///
/// The first period runs for the birth balance; the remaining eight use
/// full allotments, so the sequence ends before `birth + 120 years` by
/// the elapsed part of the first lord's period.
pub fn vimshottari_timeline(birth_jd: f64, moon_sidereal_deg: f64) -> DashaTimeline {
    let moon = normalize_360(moon_sidereal_deg);
    let (nakshatra_index, balance) = birth_balance(moon);
    let start_pos = nakshatra_index as usize % 9;

    let mut periods = Vec::with_capacity(9);
    let mut cursor = birth_jd;
    for i in 0..9 {
        let (lord, full) = VIMSHOTTARI_SEQUENCE[(start_pos + i) % 9];
        let years = if i == 0 { balance.years } else { full };
        let end = cursor + years * DAYS_PER_YEAR;
        let mut period = DashaPeriod {
            lord,
            start_jd: cursor,
            end_jd: end,
            duration_years: years,
            bhuktis: Vec::new(),
        };
        period.bhuktis = bhuktis_for(&period);
        periods.push(period);
        cursor = end;
    }

    debug!(
        "vimshottari from nakshatra {nakshatra_index}: {} balance {:.4} yr",
        balance.lord, balance.years
    );

    DashaTimeline {
        birth_jd,
        moon_sidereal_deg: moon,
        nakshatra_index,
        balance,
        periods,
    }
}
