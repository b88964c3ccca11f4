//! Closed-form approximate positions (no I/O).
//!
//! - Sun: mean longitude + equation of centre (Meeus ch. 25, low accuracy).
//! - Moon: mean longitude + the 16 largest periodic terms of Meeus table 47.A.
//! - Planets: mean heliocentric elements (Meeus table 31.A), single-term
//!   Jupiter/Saturn perturbations, equation of centre to third order in e,
//!   then a heliocentric -> geocentric vector subtraction in the ecliptic
//!   plane (inclinations ignored).
//!
//! Sun and Moon land within a few hundredths of a degree of a full theory
//! for dates within a few centuries of J2000; planets within ~1-2 deg.

use jathaka_time::{Instant, normalize_360 as norm};

use crate::error::PositionError;
use crate::fundamental::lunar_arguments;
use crate::{Body, BodyLongitude, GeoLocation, PositionProvider};

/// Geocentric tropical longitude of the Sun and its distance in AU.
pub fn sun_longitude_and_distance(t: f64) -> (f64, f64) {
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = (357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t * t).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let e = 0.016_708_634 - 0.000_042_037 * t;
    let nu = m + c.to_radians();
    let r = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * nu.cos());
    (norm(l0 + c), r)
}

/// Geocentric tropical longitude of the Sun in degrees.
pub fn sun_longitude_deg(t: f64) -> f64 {
    sun_longitude_and_distance(t).0
}

/// Geocentric tropical longitude of the Moon in degrees.
pub fn moon_longitude_deg(t: f64) -> f64 {
    let a = lunar_arguments(t);
    let d = a.elongation.to_radians();
    let m = a.sun_anomaly.to_radians();
    let mp = a.moon_anomaly.to_radians();
    let f = a.latitude_argument.to_radians();

    // (amplitude, nD, nM, nM', nF)
    #[rustfmt::skip]
    const TERMS: [(f64, f64, f64, f64, f64); 16] = [
        ( 6.288_774, 0.0,  0.0,  1.0,  0.0),
        ( 1.274_027, 2.0,  0.0, -1.0,  0.0),
        ( 0.658_314, 2.0,  0.0,  0.0,  0.0),
        ( 0.213_618, 0.0,  0.0,  2.0,  0.0),
        (-0.185_116, 0.0,  1.0,  0.0,  0.0),
        (-0.114_332, 0.0,  0.0,  0.0,  2.0),
        ( 0.058_793, 2.0,  0.0, -2.0,  0.0),
        ( 0.057_066, 2.0, -1.0, -1.0,  0.0),
        ( 0.053_322, 2.0,  0.0,  1.0,  0.0),
        ( 0.045_758, 2.0, -1.0,  0.0,  0.0),
        (-0.040_923, 0.0,  1.0, -1.0,  0.0),
        (-0.034_720, 1.0,  0.0,  0.0,  0.0),
        (-0.030_383, 0.0,  1.0,  1.0,  0.0),
        ( 0.015_327, 2.0,  0.0,  0.0, -2.0),
        (-0.012_528, 0.0,  0.0,  1.0,  2.0),
        ( 0.010_980, 0.0,  0.0,  1.0, -2.0),
    ];

    let correction: f64 = TERMS
        .iter()
        .map(|&(amp, nd, nm, nmp, nf)| amp * (nd * d + nm * m + nmp * mp + nf * f).sin())
        .sum();
    norm(a.mean_longitude + correction)
}

/// Mean orbital elements of a planet referred to the mean equinox of date.
#[derive(Debug, Clone, Copy)]
struct Elements {
    /// Mean longitude polynomial [deg, deg/cy, deg/cy^2].
    mean_longitude: [f64; 3],
    /// Longitude of perihelion [deg, deg/cy].
    perihelion: [f64; 2],
    /// Eccentricity [-, 1/cy].
    eccentricity: [f64; 2],
    /// Semi-major axis in AU.
    semi_major_axis: f64,
}

fn elements(body: Body) -> Option<Elements> {
    let el = match body {
        Body::Mercury => Elements {
            mean_longitude: [252.250_906, 149_474.072_249_1, 0.000_303_50],
            perihelion: [77.456_119, 1.556_477_6],
            eccentricity: [0.205_631_75, 0.000_020_407],
            semi_major_axis: 0.387_098_310,
        },
        Body::Venus => Elements {
            mean_longitude: [181.979_801, 58_519.213_030_2, 0.000_310_60],
            perihelion: [131.563_707, 1.402_228_8],
            eccentricity: [0.006_771_88, -0.000_047_766],
            semi_major_axis: 0.723_329_820,
        },
        Body::Mars => Elements {
            mean_longitude: [355.433_275, 19_141.696_474_6, 0.000_310_52],
            perihelion: [336.060_234, 1.841_033_1],
            eccentricity: [0.093_400_62, 0.000_090_483],
            semi_major_axis: 1.523_679_342,
        },
        Body::Jupiter => Elements {
            mean_longitude: [34.351_484, 3_036.302_788_9, 0.000_223_74],
            perihelion: [14.331_309, 1.612_666_8],
            eccentricity: [0.048_494_85, 0.000_163_244],
            semi_major_axis: 5.202_603_191,
        },
        Body::Saturn => Elements {
            mean_longitude: [50.077_471, 1_223.511_014_1, 0.000_519_52],
            perihelion: [93.056_787, 1.963_769_4],
            eccentricity: [0.055_508_62, -0.000_346_818],
            semi_major_axis: 9.554_909_596,
        },
        Body::Sun | Body::Moon => return None,
    };
    Some(el)
}

/// Largest periodic perturbation of the mean longitude, in degrees.
fn perturbation_deg(body: Body, t: f64) -> f64 {
    match body {
        Body::Jupiter => 0.3314 * (183.6 + 52.17 * t).to_radians().sin(),
        Body::Saturn => 0.8140 * (213.7 + 43.02 * t).to_radians().sin(),
        _ => 0.0,
    }
}

/// Heliocentric ecliptic longitude (deg) and radius (AU) of a planet.
fn heliocentric(el: &Elements, body: Body, t: f64) -> (f64, f64) {
    let [l0, l1, l2] = el.mean_longitude;
    let l = l0 + l1 * t + l2 * t * t + perturbation_deg(body, t);
    let pi = el.perihelion[0] + el.perihelion[1] * t;
    let e = el.eccentricity[0] + el.eccentricity[1] * t;

    let m = (l - pi).to_radians();
    let e3 = e * e * e;
    let nu = m
        + (2.0 * e - e3 / 4.0) * m.sin()
        + 1.25 * e * e * (2.0 * m).sin()
        + (13.0 / 12.0) * e3 * (3.0 * m).sin();
    let r = el.semi_major_axis * (1.0 - e * e) / (1.0 + e * nu.cos());
    (norm(nu.to_degrees() + pi), r)
}

/// Geocentric tropical longitude of Mercury..Saturn in degrees.
///
/// Returns `None` for the Sun and Moon, which have dedicated series.
pub fn planet_longitude_deg(body: Body, t: f64) -> Option<f64> {
    let el = elements(body)?;
    let (lon_p, r_p) = heliocentric(&el, body, t);
    let (sun_lon, r_e) = sun_longitude_and_distance(t);
    // Earth's heliocentric longitude is opposite the Sun's geocentric one.
    let lon_e = (sun_lon + 180.0).to_radians();
    let lon_p = lon_p.to_radians();
    let x = r_p * lon_p.cos() - r_e * lon_e.cos();
    let y = r_p * lon_p.sin() - r_e * lon_e.sin();
    Some(norm(y.atan2(x).to_degrees()))
}

/// Tropical longitude of any body from the closed-form series.
pub fn analytic_longitude_deg(body: Body, t: f64) -> f64 {
    match body {
        Body::Sun => sun_longitude_deg(t),
        Body::Moon => moon_longitude_deg(t),
        _ => planet_longitude_deg(body, t).unwrap_or_default(),
    }
}

/// Pure-computation provider. Never fails and performs no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticProvider;

impl AnalyticProvider {
    pub fn new() -> Self {
        Self
    }
}

impl PositionProvider for AnalyticProvider {
    fn name(&self) -> &'static str {
        "analytic"
    }

    fn longitude(
        &self,
        body: Body,
        instant: Instant,
        _location: &GeoLocation,
    ) -> Result<BodyLongitude, PositionError> {
        let t = instant.centuries_since_j2000();
        Ok(BodyLongitude::tropical(analytic_longitude_deg(body, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angular_diff(a: f64, b: f64) -> f64 {
        ((a - b + 180.0).rem_euclid(360.0) - 180.0).abs()
    }

    #[test]
    fn sun_at_j2000() {
        // Apparent longitude at J2000.0 is 280.37; geometric ~280.38
        let lon = sun_longitude_deg(0.0);
        assert!(angular_diff(lon, 280.37) < 0.05, "Sun = {lon}");
    }

    #[test]
    fn sun_meeus_example_25a() {
        // 1992-10-13 0h TD: true longitude 199.90988
        let t = -0.072_183_436;
        let lon = sun_longitude_deg(t);
        assert!(angular_diff(lon, 199.909_88) < 0.001, "Sun = {lon}");
    }

    #[test]
    fn sun_distance_near_perihelion_in_january() {
        let (_, r) = sun_longitude_and_distance(0.0);
        assert!((r - 0.9833).abs() < 0.001, "R = {r}");
    }

    #[test]
    fn moon_at_j2000() {
        // Geocentric lunar longitude at J2000.0 is ~223.32
        let lon = moon_longitude_deg(0.0);
        assert!(angular_diff(lon, 223.32) < 0.1, "Moon = {lon}");
    }

    #[test]
    fn moon_meeus_example_47a() {
        // 1992-04-12 0h TD: lambda = 133.162655 (full theory)
        let lon = moon_longitude_deg(-0.077_221_081_451);
        assert!(angular_diff(lon, 133.162_655) < 0.05, "Moon = {lon}");
    }

    #[test]
    fn planets_at_j2000() {
        // Geocentric longitudes at 2000-01-01 12:00 TT
        let cases = [
            (Body::Mercury, 271.89),
            (Body::Venus, 241.57),
            (Body::Mars, 327.96),
            (Body::Jupiter, 25.25),
            (Body::Saturn, 40.40),
        ];
        for (body, expected) in cases {
            let lon = planet_longitude_deg(body, 0.0).unwrap();
            assert!(
                angular_diff(lon, expected) < 1.0,
                "{body:?}: got {lon}, expected ~{expected}"
            );
        }
    }

    #[test]
    fn sun_and_moon_have_no_planet_elements() {
        assert!(planet_longitude_deg(Body::Sun, 0.0).is_none());
        assert!(planet_longitude_deg(Body::Moon, 0.0).is_none());
    }

    #[test]
    fn all_bodies_in_range() {
        for i in -50..50 {
            let t = i as f64 * 0.037;
            for body in Body::ALL {
                let lon = analytic_longitude_deg(body, t);
                assert!((0.0..360.0).contains(&lon), "{body:?} at t={t}: {lon}");
            }
        }
    }

    #[test]
    fn continuous_in_time() {
        // One hour steps never jump more than the Moon's hourly motion
        let step = 1.0 / 24.0 / 36_525.0;
        for body in Body::ALL {
            let mut prev = analytic_longitude_deg(body, 0.0);
            for i in 1..200 {
                let lon = analytic_longitude_deg(body, i as f64 * step);
                assert!(angular_diff(lon, prev) < 0.7, "{body:?} jumped at step {i}");
                prev = lon;
            }
        }
    }

    #[test]
    fn provider_returns_tropical_exact() {
        let p = AnalyticProvider::new();
        let here = GeoLocation::new(13.0827, 80.2707);
        let lon = p.longitude(Body::Sun, Instant::J2000, &here).unwrap();
        assert_eq!(lon.zodiac, crate::Zodiac::Tropical);
        assert_eq!(lon.resolution, crate::Resolution::Exact);
    }
}
