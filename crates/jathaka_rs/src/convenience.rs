use jathaka_time::{CivilDateTime, CivilTimeNormalizer, Instant};
use jathaka_vedic_base::{CompatibilityResult, current_period_at, porutham};

use crate::chart::{BirthData, Chart, CurrentPeriods};
use crate::error::JathakaError;
use crate::geocode::{Geocoder, ResolvedPlace, resolve_or_default};

/// Porutham of two charts, read from their Moon placements.
///
/// `first` is conventionally the bride's chart; the nakshatra count runs
/// from her Moon to the groom's.
pub fn compatibility(first: &Chart, second: &Chart) -> CompatibilityResult {
    porutham(first.moon_placement(), second.moon_placement())
}

/// Dasha and bhukti active at `at`.
///
/// Fails with [`JathakaError::OutsideDashaCycle`] before birth or after the
/// 120-year cycle ends.
pub fn current_periods(chart: &Chart, at: Instant) -> Result<CurrentPeriods, JathakaError> {
    current_period_at(&chart.dasha, at)
        .map(|snapshot| CurrentPeriods {
            query: at,
            snapshot,
        })
        .ok_or_else(|| JathakaError::OutsideDashaCycle {
            jd: at.jd(),
            start_jd: chart.dasha.birth_jd,
            end_jd: chart.dasha.end_jd(),
        })
}

/// [`current_periods`] at the current wall-clock time.
pub fn current_periods_now(chart: &Chart) -> Result<CurrentPeriods, JathakaError> {
    current_periods(chart, Instant::from_utc(chrono::Utc::now()))
}

/// Build birth data from a place name.
///
/// An unresolved place falls back to Chennai; the returned birth data then
/// has `approximated_location = true`. Use [`Jathaka::birth_from_place`]
/// to fall back to an engine's configured place instead.
///
/// [`Jathaka::birth_from_place`]: crate::Jathaka::birth_from_place
pub fn birth_from_place<G, N>(
    civil: CivilDateTime,
    place_name: &str,
    geocoder: &G,
    normalizer: &N,
) -> Result<(BirthData, ResolvedPlace), JathakaError>
where
    G: Geocoder + ?Sized,
    N: CivilTimeNormalizer + ?Sized,
{
    birth_at_place(civil, resolve_or_default(geocoder, place_name), normalizer)
}

/// Birth data at an already resolved place. The UTC offset comes from the
/// place's timezone.
pub fn birth_at_place<N>(
    civil: CivilDateTime,
    resolved: ResolvedPlace,
    normalizer: &N,
) -> Result<(BirthData, ResolvedPlace), JathakaError>
where
    N: CivilTimeNormalizer + ?Sized,
{
    let offset = normalizer.utc_offset(&resolved.place.timezone, &civil)?;
    let birth = BirthData {
        civil,
        offset,
        location: resolved.place.location,
        approximated_location: resolved.approximated,
    };
    Ok((birth, resolved))
}
