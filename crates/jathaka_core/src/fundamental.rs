//! Fundamental arguments of the lunar theory.
//!
//! Polynomials in Julian centuries `T` since J2000.0, from Meeus,
//! "Astronomical Algorithms" (2nd ed), Chapter 47 (Eqs. 47.1 - 47.5) and
//! Chapter 22 for the lunar node. All angles are in degrees, [0, 360).

use jathaka_time::normalize_360 as norm;

/// Delaunay-style arguments shared by the Moon series and the node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarArguments {
    /// Moon's mean longitude, L'.
    pub mean_longitude: f64,
    /// Mean elongation of the Moon, D.
    pub elongation: f64,
    /// Sun's mean anomaly, M.
    pub sun_anomaly: f64,
    /// Moon's mean anomaly, M'.
    pub moon_anomaly: f64,
    /// Moon's argument of latitude, F.
    pub latitude_argument: f64,
    /// Longitude of the mean ascending node, Omega.
    pub node: f64,
}

/// Moon's mean longitude L'.
pub fn moon_mean_longitude_deg(t: f64) -> f64 {
    let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);
    norm(218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0)
}

/// Mean elongation D.
pub fn mean_elongation_deg(t: f64) -> f64 {
    let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);
    norm(297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0)
}

/// Sun's mean anomaly M.
pub fn sun_mean_anomaly_deg(t: f64) -> f64 {
    norm(357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t * t)
}

/// Moon's mean anomaly M'.
pub fn moon_mean_anomaly_deg(t: f64) -> f64 {
    let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);
    norm(134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0)
}

/// Moon's argument of latitude F.
pub fn latitude_argument_deg(t: f64) -> f64 {
    let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);
    norm(93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0)
}

/// Longitude of the Moon's mean ascending node.
///
/// `Omega = 125.0445479 - 1934.1362891 T + 0.0020754 T^2 + T^3 / 467441`
pub fn mean_node_deg(t: f64) -> f64 {
    let (t2, t3) = (t * t, t * t * t);
    norm(125.044_547_9 - 1_934.136_289_1 * t + 0.002_075_4 * t2 + t3 / 467_441.0)
}

/// All lunar arguments at once.
pub fn lunar_arguments(t: f64) -> LunarArguments {
    LunarArguments {
        mean_longitude: moon_mean_longitude_deg(t),
        elongation: mean_elongation_deg(t),
        sun_anomaly: sun_mean_anomaly_deg(t),
        moon_anomaly: moon_mean_anomaly_deg(t),
        latitude_argument: latitude_argument_deg(t),
        node: mean_node_deg(t),
    }
}
