//! Golden tests for civil time -> Julian Day conversion.

use approx::assert_relative_eq;
use jathaka_time::{
    CivilDateTime, CivilTimeNormalizer, Instant, J2000_JD, TimeError, UtcOffset,
    ZoneTableNormalizer, calendar_to_jd, gmst_deg, jd_to_calendar,
};

#[test]
fn meeus_table_7a_dates() {
    // (year, month, day_frac, JD) from Meeus ch. 7
    let cases = [
        (2000, 1, 1.5, 2_451_545.0),
        (1999, 1, 1.0, 2_451_179.5),
        (1987, 1, 27.0, 2_446_822.5),
        (1987, 6, 19.5, 2_446_966.0),
        (1988, 1, 27.0, 2_447_187.5),
        (1988, 6, 19.5, 2_447_332.0),
        (1900, 1, 1.0, 2_415_020.5),
        (1600, 1, 1.0, 2_305_447.5),
        (1600, 12, 31.0, 2_305_812.5),
    ];
    for (y, m, d, expected) in cases {
        let jd = calendar_to_jd(y, m, d);
        assert!(
            (jd - expected).abs() < 1e-9,
            "{y}-{m}-{d}: got {jd}, expected {expected}"
        );
    }
}

#[test]
fn calendar_round_trip_over_centuries() {
    for &jd in &[2_305_447.5, 2_415_020.5, 2_448_026.708_333, 2_460_000.25] {
        let (y, m, d) = jd_to_calendar(jd);
        assert_relative_eq!(calendar_to_jd(y, m, d), jd, epsilon = 1e-6);
    }
}

#[test]
fn birth_scenario_is_deterministic() {
    let local = CivilDateTime::from_date_and_time("1990-05-15", "10:30").unwrap();
    let offset: UtcOffset = "+05:30".parse().unwrap();
    let a = Instant::from_civil(&local, offset).unwrap();
    let b = Instant::from_civil(&local, offset).unwrap();
    assert_eq!(a, b);
    assert_relative_eq!(a.jd(), 2_448_026.708_333_333, epsilon = 1e-6);
}

#[test]
fn normalizer_matches_explicit_offset() {
    let local = CivilDateTime::from_date_and_time("1990-05-15", "10:30").unwrap();
    let utc = ZoneTableNormalizer.to_utc("Asia/Kolkata", &local).unwrap();
    let via_zone = Instant::from_utc_civil(&utc);
    let via_offset = Instant::from_civil(&local, "+05:30".parse().unwrap()).unwrap();
    assert_relative_eq!(via_zone.jd(), via_offset.jd(), epsilon = 1e-12);
}

#[test]
fn malformed_input_is_rejected_not_defaulted() {
    let err = CivilDateTime::from_date_and_time("1990-02-31", "10:30").unwrap_err();
    assert!(matches!(err, TimeError::InvalidInput(_)), "got {err:?}");
    let err = CivilDateTime::from_date_and_time("1990-05-15", "ten thirty").unwrap_err();
    assert!(matches!(err, TimeError::InvalidInput(_)), "got {err:?}");
}

#[test]
fn gmst_is_in_range_over_a_year() {
    let mut jd = J2000_JD;
    while jd < J2000_JD + 366.0 {
        let g = gmst_deg(jd);
        assert!((0.0..360.0).contains(&g), "GMST {g} at {jd}");
        jd += 0.37;
    }
}
