//! End-to-end chart tests against the analytic provider.
//!
//! Birth case: 1990-05-15 10:30 IST, Chennai (13.0827 N, 80.2707 E).

use jathaka_core::{BodyLongitude, PositionError};
use jathaka_rs::*;

fn birth() -> BirthData {
    BirthData::parse("1990-05-15 10:30", "+05:30", 13.0827, 80.2707).unwrap()
}

fn birth_chart() -> Chart {
    Jathaka::analytic().compute_chart(&birth()).unwrap()
}

#[test]
fn instant_ayanamsha_and_weekday() {
    let c = birth_chart();
    assert!((c.instant.jd() - 2_448_026.708_333_3).abs() < 1e-6);
    assert!((c.ayanamsha_deg - 23.718_49).abs() < 1e-4, "aya = {}", c.ayanamsha_deg);
    assert_eq!(c.weekday, Vaar::Mangalvaar);
    assert!(!c.approximated_location);
}

#[test]
fn moon_placement() {
    let c = birth_chart();
    assert!((c.moon.longitude_deg - 269.83).abs() < 0.02, "moon = {}", c.moon.longitude_deg);
    assert_eq!(c.moon.rashi(), Rashi::Dhanu);
    assert_eq!(c.moon.nakshatra(), Nakshatra::UttaraAshadha);
    assert_eq!(c.moon.pada, 1);
    assert_eq!(c.graha(Graha::Chandra).unwrap().position, c.moon);
}

#[test]
fn sun_and_nodes() {
    let c = birth_chart();
    let sun = c.graha(Graha::Surya).unwrap();
    assert_eq!(sun.rashi(), Rashi::Vrishabha);
    let trop = sun.tropical_deg.unwrap();
    assert!((trop - 54.12).abs() < 0.01, "sun tropical = {trop}");

    let rahu = c.graha(Graha::Rahu).unwrap().position.longitude_deg;
    let ketu = c.graha(Graha::Ketu).unwrap().position.longitude_deg;
    assert!(((ketu - rahu).rem_euclid(360.0) - 180.0).abs() < 1e-9);
}

#[test]
fn lagna_is_karka() {
    let c = birth_chart();
    assert!(
        (c.ascendant.longitude_deg - 96.871).abs() < 0.01,
        "lagna = {}",
        c.ascendant.longitude_deg
    );
    assert_eq!(c.ascendant.rashi(), Rashi::Karka);
    assert_eq!(c.lagna_lord(), Graha::Chandra);
    // Tropical MC 30.03 deg -> sidereal Mesha.
    assert_eq!(c.midheaven.rashi(), Rashi::Mesha);
}

#[test]
fn grahas_in_order_and_occupancy_complete() {
    let c = birth_chart();
    let order: Vec<Graha> = c.grahas.iter().map(|g| g.graha).collect();
    assert_eq!(order, jathaka_vedic_base::ALL_GRAHAS.to_vec());

    let total: usize = c.occupancy.iter().map(Vec::len).sum();
    assert_eq!(total, 10);
    assert!(c.occupants(Rashi::Karka).contains(&Occupant::Lagna));
    assert!(c.occupants(Rashi::Dhanu).contains(&Occupant::Graha(Graha::Chandra)));
}

#[test]
fn dasha_starts_with_surya() {
    let c = birth_chart();
    assert_eq!(c.balance.lord, Graha::Surya);
    assert!((c.balance.years - 4.5765).abs() < 0.01, "balance = {}", c.balance.years);
    assert_eq!(c.dasha.periods.len(), 9);
    assert_eq!(c.dasha.periods[0].start_jd, c.instant.jd());
}

#[test]
fn current_periods_in_2024() {
    let c = birth_chart();
    let p = current_periods(&c, Instant::from_jd(2_460_310.5)).unwrap();
    assert_eq!(p.dasha_lord(), Graha::Rahu);
    assert!(p.snapshot.bhukti.remaining_days <= p.snapshot.dasha.remaining_days);

    let err = current_periods(&c, Instant::from_jd(c.instant.jd() - 10.0)).unwrap_err();
    assert!(matches!(err, JathakaError::OutsideDashaCycle { .. }));
}

#[test]
fn self_compatibility() {
    let c = birth_chart();
    let r = compatibility(&c, &c);
    assert_eq!(r.nakshatra_count, 1);
    assert_eq!(r.rasi_distance, 0);
    assert_eq!(r.total, 4);
    assert_eq!(r.verdict, Verdict::Average);
}

#[test]
fn compatibility_reads_moon_placements() {
    let engine = Jathaka::analytic();
    let a = engine.compute_chart(&birth()).unwrap();
    let b = engine
        .compute_chart(&BirthData::parse("1992-11-03 06:15", "+05:30", 9.9252, 78.1198).unwrap())
        .unwrap();
    let r = compatibility(&a, &b);
    assert_eq!(r.first, a.moon_placement());
    assert_eq!(r.second, b.moon_placement());
    let passed = r.outcomes.iter().filter(|o| o.pass).count() as u8;
    assert_eq!(passed, r.total);
}

#[test]
fn south_indian_grid_places_lagna_and_moon() {
    let c = birth_chart();
    let grid = south_indian_grid(&c);
    let karka = grid[1][3].as_ref().unwrap();
    assert_eq!(karka.rashi, Rashi::Karka);
    assert!(karka.has_lagna());
    let dhanu = grid[3][0].as_ref().unwrap();
    assert!(dhanu.occupants.contains(&Occupant::Graha(Graha::Chandra)));
    assert!(grid[1][1].is_none() && grid[2][2].is_none());
}

#[test]
fn invalid_latitude_rejected() {
    let b = BirthData::parse("1990-05-15 10:30", "+05:30", 90.0, 80.0).unwrap();
    let err = Jathaka::analytic().compute_chart(&b).unwrap_err();
    assert!(matches!(err, JathakaError::Vedic(_)));
}

#[test]
fn transits_at_j2000() {
    let t = Jathaka::analytic()
        .transits(Instant::J2000, &GeoLocation::new(13.0827, 80.2707))
        .unwrap();
    assert_eq!(t.grahas.len(), 9);
    // Sun ~280.4 tropical, ~256.5 sidereal.
    assert_eq!(t.graha(Graha::Surya).unwrap().rashi(), Rashi::Dhanu);
    assert!((t.ayanamsha_deg - 23.853_055_6).abs() < 1e-9);
}

#[test]
fn birth_from_unknown_place_is_flagged() {
    let civil: CivilDateTime = "1990-05-15 10:30".parse().unwrap();
    let g = Gazetteer::builtin();
    let (b, resolved) = birth_from_place(civil, "Atlantis", &g, &ZoneTableNormalizer).unwrap();
    assert!(resolved.approximated);
    assert!(b.approximated_location);
    assert_eq!(b.offset.minutes(), 330);
    let chart = Jathaka::analytic().compute_chart(&b).unwrap();
    assert!(chart.approximated_location);

    let (b, resolved) = birth_from_place(civil, "Colombo", &g, &ZoneTableNormalizer).unwrap();
    assert!(!resolved.approximated);
    assert_eq!(b.location, GeoLocation::new(6.9271, 79.8612));
}

#[test]
fn engine_birth_from_place_uses_configured_fallback() {
    let civil: CivilDateTime = "1990-05-15 10:30".parse().unwrap();
    let g = Gazetteer::builtin();
    let singapore = Place::new("Singapore", GeoLocation::new(1.3521, 103.8198), "Asia/Singapore");
    let engine = Jathaka::analytic().with_fallback_place(singapore.clone());

    let (b, resolved) = engine
        .birth_from_place(civil, "Atlantis", &g, &ZoneTableNormalizer)
        .unwrap();
    assert!(resolved.approximated);
    assert_eq!(resolved.place, singapore);
    assert_eq!(b.location, singapore.location);
    assert_eq!(b.offset.minutes(), 480);

    let (b, resolved) = engine
        .birth_from_place(civil, "Madurai", &g, &ZoneTableNormalizer)
        .unwrap();
    assert!(!resolved.approximated);
    assert_eq!(b.offset.minutes(), 330);
}

/// Provider that answers in the sidereal zodiac at sign/mansion resolution.
struct SiderealStub;

impl PositionProvider for SiderealStub {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn longitude(
        &self,
        body: Body,
        _instant: Instant,
        _location: &GeoLocation,
    ) -> Result<BodyLongitude, PositionError> {
        let idx = Body::ALL.iter().position(|&b| b == body).unwrap_or(0);
        Ok(BodyLongitude::sidereal(
            idx as f64 * 40.0 + 5.0,
            Resolution::SignAndMansion,
        ))
    }
}

#[test]
fn sidereal_provider_output_is_used_as_is() {
    let c = Jathaka::from_provider(Box::new(SiderealStub))
        .compute_chart(&birth())
        .unwrap();
    let moon = c.graha(Graha::Chandra).unwrap();
    assert_eq!(moon.tropical_deg, None);
    assert_eq!(moon.resolution, Resolution::SignAndMansion);
    assert!((moon.position.longitude_deg - 45.0).abs() < 1e-12);
    // Nodes always come from the node formula.
    assert_eq!(c.graha(Graha::Rahu).unwrap().resolution, Resolution::Exact);
}

/// Provider whose backend is down.
struct Offline;

impl PositionProvider for Offline {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn longitude(
        &self,
        body: Body,
        _instant: Instant,
        _location: &GeoLocation,
    ) -> Result<BodyLongitude, PositionError> {
        Err(PositionError::Unavailable {
            body,
            reason: "service unreachable".to_string(),
        })
    }
}

#[test]
fn provider_failure_propagates() {
    let err = Jathaka::from_provider(Box::new(Offline))
        .compute_chart(&birth())
        .unwrap_err();
    assert!(matches!(
        err,
        JathakaError::Position(PositionError::Unavailable { .. })
    ));
}

#[test]
fn true_nodes_differ_from_mean() {
    let b = birth();
    let mean = Jathaka::analytic().compute_chart(&b).unwrap();
    let tru = Jathaka::analytic()
        .with_node_mode(NodeMode::True)
        .compute_chart(&b)
        .unwrap();
    let m = mean.graha(Graha::Rahu).unwrap().position.longitude_deg;
    let t = tru.graha(Graha::Rahu).unwrap().position.longitude_deg;
    let diff = (t - m + 180.0).rem_euclid(360.0) - 180.0;
    assert!(diff.abs() > 1e-6 && diff.abs() < 2.0, "true - mean = {diff}");
}

#[test]
fn chart_serializes_to_json() {
    let c = birth_chart();
    let json = serde_json::to_value(&c).unwrap();
    assert_eq!(json["weekday"], "Mangalvaar");
    assert_eq!(json["grahas"].as_array().unwrap().len(), 9);
    assert_eq!(json["occupancy"].as_array().unwrap().len(), 12);
}
