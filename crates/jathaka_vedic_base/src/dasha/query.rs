//! Active-period lookup.
//!
//! Periods are half-open `[start, end)`: at a shared boundary the later
//! period wins. The final period of a sequence also contains its own end.
//! No wall-clock reads happen here; callers pass the query instant.

use jathaka_time::Instant;

use super::types::{ActivePeriod, DashaLevel, DashaSnapshot, DashaTimeline, PeriodSpan};

/// Index of the period containing `jd`, if any.
///
/// `periods` must be sorted and contiguous.
pub fn find_active_period<P: PeriodSpan>(periods: &[P], jd: f64) -> Option<usize> {
    let idx = periods.partition_point(|p| p.start_jd() <= jd);
    let candidate = idx.checked_sub(1)?;
    let period = &periods[candidate];
    let is_last = candidate + 1 == periods.len();
    if jd < period.end_jd() || (is_last && jd == period.end_jd()) {
        Some(candidate)
    } else {
        None
    }
}

fn active<P: PeriodSpan>(period: &P, level: DashaLevel, jd: f64) -> ActivePeriod {
    ActivePeriod {
        level,
        lord: period.lord(),
        start_jd: period.start_jd(),
        end_jd: period.end_jd(),
        remaining_days: period.end_jd() - jd,
    }
}

/// Active dasha and bhukti at `jd`, or `None` outside the generated span.
pub fn snapshot_at(timeline: &DashaTimeline, jd: f64) -> Option<DashaSnapshot> {
    let d_idx = find_active_period(&timeline.periods, jd)?;
    let dasha = &timeline.periods[d_idx];
    let b_idx = find_active_period(&dasha.bhuktis, jd)?;
    Some(DashaSnapshot {
        query_jd: jd,
        dasha: active(dasha, DashaLevel::Dasha, jd),
        bhukti: active(&dasha.bhuktis[b_idx], DashaLevel::Bhukti, jd),
    })
}

/// [`snapshot_at`] for an [`Instant`].
pub fn current_period_at(timeline: &DashaTimeline, at: Instant) -> Option<DashaSnapshot> {
    snapshot_at(timeline, at.jd())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dasha::types::BhuktiPeriod;
    use crate::dasha::vimshottari::vimshottari_timeline;
    use crate::graha::Graha;

    fn spans() -> Vec<BhuktiPeriod> {
        vec![
            BhuktiPeriod { lord: Graha::Ketu, start_jd: 0.0, end_jd: 10.0 },
            BhuktiPeriod { lord: Graha::Shukra, start_jd: 10.0, end_jd: 30.0 },
            BhuktiPeriod { lord: Graha::Surya, start_jd: 30.0, end_jd: 36.0 },
        ]
    }

    #[test]
    fn interior_points() {
        let s = spans();
        assert_eq!(find_active_period(&s, 0.0), Some(0));
        assert_eq!(find_active_period(&s, 5.0), Some(0));
        assert_eq!(find_active_period(&s, 29.9), Some(1));
    }

    #[test]
    fn boundary_goes_to_later_period() {
        let s = spans();
        assert_eq!(find_active_period(&s, 10.0), Some(1));
        assert_eq!(find_active_period(&s, 30.0), Some(2));
    }

    #[test]
    fn final_end_is_inclusive() {
        let s = spans();
        assert_eq!(find_active_period(&s, 36.0), Some(2));
        assert_eq!(find_active_period(&s, 36.1), None);
        assert_eq!(find_active_period(&s, -0.1), None);
    }

    #[test]
    fn snapshot_nested_lookup() {
        let t = vimshottari_timeline(2_451_545.0, 0.0);
        // 8 years in: Shukra dasha, Shukra bhukti (first 40 months).
        let snap = snapshot_at(&t, 2_451_545.0 + 8.0 * 365.25).unwrap();
        assert_eq!(snap.dasha.lord, Graha::Shukra);
        assert_eq!(snap.bhukti.lord, Graha::Shukra);
        assert_eq!(snap.bhukti.level, DashaLevel::Bhukti);
        assert!(snap.dasha.remaining_days > 0.0);
        assert!(snap.bhukti.remaining_days <= snap.dasha.remaining_days);
    }

    #[test]
    fn snapshot_outside_span_is_none() {
        let t = vimshottari_timeline(2_451_545.0, 0.0);
        assert!(snapshot_at(&t, 2_451_544.0).is_none());
        assert!(snapshot_at(&t, t.end_jd() + 1.0).is_none());
        assert!(current_period_at(&t, Instant::from_jd(t.end_jd())).is_some());
    }
}
