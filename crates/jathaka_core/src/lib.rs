//! Body positions for the jathaka engine.
//!
//! Every backend implements [`PositionProvider`] and reports a longitude
//! tagged with the zodiac it is expressed in and how precise it is:
//!
//! - [`AnalyticProvider`]: closed-form series, tropical, exact.
//! - [`TabulatedEphemeris`]: interpolated CSV dataset, tropical, exact.
//! - [`RemoteProvider`]: HTTP astrology service, already sidereal and
//!   only resolved to sign (and optionally mansion).
//!
//! Lunar nodes are derived quantities and are computed locally by every
//! provider through [`nodes`].

pub mod analytic;
pub mod error;
pub mod fundamental;
pub mod nodes;
pub mod remote;
pub mod tabulated;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use jathaka_time::{Instant, normalize_360};
use serde::{Deserialize, Serialize};

pub use analytic::AnalyticProvider;
pub use error::PositionError;
pub use nodes::{LunarNode, NodeMode};
pub use remote::RemoteProvider;
pub use tabulated::TabulatedEphemeris;

/// Physical bodies a provider must be able to place.
///
/// Rahu and Ketu are not bodies; see [`LunarNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
}

impl Body {
    /// All bodies in weekday-lord order.
    pub const ALL: [Body; 7] = [
        Body::Sun,
        Body::Moon,
        Body::Mars,
        Body::Mercury,
        Body::Jupiter,
        Body::Venus,
        Body::Saturn,
    ];

    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Mercury => "Mercury",
            Self::Jupiter => "Jupiter",
            Self::Venus => "Venus",
            Self::Saturn => "Saturn",
        }
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Body::ALL
            .iter()
            .copied()
            .find(|b| b.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| PositionError::UnknownBody(trimmed.to_string()))
    }
}

/// Geographic observer location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive, [-90, 90].
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive, [-180, 180].
    pub longitude_deg: f64,
}

impl GeoLocation {
    pub const fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    /// Both coordinates finite and within their ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude_deg.is_finite()
            && self.longitude_deg.is_finite()
            && (-90.0..=90.0).contains(&self.latitude_deg)
            && (-180.0..=180.0).contains(&self.longitude_deg)
    }
}

/// Reference frame of a reported longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zodiac {
    Tropical,
    Sidereal,
}

/// How much of the longitude a provider actually knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// Full-precision longitude.
    Exact,
    /// Sign and mansion known; the longitude is the midpoint of their overlap.
    SignAndMansion,
    /// Only the sign known; the longitude is the sign midpoint.
    SignOnly,
}

/// A body longitude as returned by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyLongitude {
    /// Ecliptic longitude in degrees, [0, 360).
    pub longitude_deg: f64,
    pub zodiac: Zodiac,
    pub resolution: Resolution,
}

impl BodyLongitude {
    /// Exact tropical longitude.
    pub fn tropical(longitude_deg: f64) -> Self {
        Self {
            longitude_deg: normalize_360(longitude_deg),
            zodiac: Zodiac::Tropical,
            resolution: Resolution::Exact,
        }
    }

    /// Sidereal longitude at the given resolution.
    pub fn sidereal(longitude_deg: f64, resolution: Resolution) -> Self {
        Self {
            longitude_deg: normalize_360(longitude_deg),
            zodiac: Zodiac::Sidereal,
            resolution,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.resolution == Resolution::Exact
    }
}

/// A source of body longitudes.
///
/// Implementations must be stateless with respect to queries so that a
/// single provider can serve concurrent chart computations.
pub trait PositionProvider: Send + Sync {
    /// Short backend identifier used in logs and chart metadata.
    fn name(&self) -> &'static str;

    /// Geocentric ecliptic longitude of `body` at `instant`.
    fn longitude(
        &self,
        body: Body,
        instant: Instant,
        location: &GeoLocation,
    ) -> Result<BodyLongitude, PositionError>;

    /// Tropical longitude of a lunar node.
    fn lunar_node(&self, node: LunarNode, instant: Instant, mode: NodeMode) -> BodyLongitude {
        let t = instant.centuries_since_j2000();
        BodyLongitude::tropical(nodes::lunar_node_deg(node, t, mode))
    }
}

impl<P: PositionProvider + ?Sized> PositionProvider for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn longitude(
        &self,
        body: Body,
        instant: Instant,
        location: &GeoLocation,
    ) -> Result<BodyLongitude, PositionError> {
        (**self).longitude(body, instant, location)
    }

    fn lunar_node(&self, node: LunarNode, instant: Instant, mode: NodeMode) -> BodyLongitude {
        (**self).lunar_node(node, instant, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiny_negative_longitude_wraps_below_360() {
        let trop = BodyLongitude::tropical(-1e-17);
        assert!((0.0..360.0).contains(&trop.longitude_deg), "{}", trop.longitude_deg);
        let sid = BodyLongitude::sidereal(-1e-17, Resolution::SignOnly);
        assert_eq!(sid.longitude_deg, 0.0);
        assert!((BodyLongitude::tropical(-30.0).longitude_deg - 330.0).abs() < 1e-12);
    }

    #[test]
    fn body_parse_is_case_insensitive() {
        assert_eq!("moon".parse::<Body>().unwrap(), Body::Moon);
        assert_eq!(" SATURN ".parse::<Body>().unwrap(), Body::Saturn);
        assert!(matches!(
            "Pluto".parse::<Body>(),
            Err(PositionError::UnknownBody(_))
        ));
    }

    #[test]
    fn body_display_round_trips() {
        for b in Body::ALL {
            assert_eq!(b.to_string().parse::<Body>().unwrap(), b);
        }
    }

    #[test]
    fn longitude_constructors_normalize() {
        let l = BodyLongitude::tropical(-10.0);
        assert!((l.longitude_deg - 350.0).abs() < 1e-12);
        assert!(l.is_exact());
        let s = BodyLongitude::sidereal(725.0, Resolution::SignOnly);
        assert!((s.longitude_deg - 5.0).abs() < 1e-12);
        assert_eq!(s.zodiac, Zodiac::Sidereal);
        assert!(!s.is_exact());
    }

    #[test]
    fn location_validity() {
        assert!(GeoLocation::new(13.0827, 80.2707).is_valid());
        assert!(!GeoLocation::new(91.0, 0.0).is_valid());
        assert!(!GeoLocation::new(0.0, f64::NAN).is_valid());
    }

    #[test]
    fn default_node_is_tropical_and_opposed() {
        let p = AnalyticProvider::new();
        let rahu = p.lunar_node(LunarNode::Rahu, Instant::J2000, NodeMode::Mean);
        let ketu = p.lunar_node(LunarNode::Ketu, Instant::J2000, NodeMode::Mean);
        assert_eq!(rahu.zodiac, Zodiac::Tropical);
        let diff = (ketu.longitude_deg - rahu.longitude_deg).rem_euclid(360.0);
        assert!((diff - 180.0).abs() < 1e-10);
    }

    #[test]
    fn boxed_provider_delegates() {
        let p: Box<dyn PositionProvider> = Box::new(AnalyticProvider::new());
        assert_eq!(p.name(), "analytic");
        let loc = GeoLocation::new(0.0, 0.0);
        assert!(p.longitude(Body::Sun, Instant::J2000, &loc).is_ok());
    }
}
