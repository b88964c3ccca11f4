//! Place-name resolution.
//!
//! Real geocoding services live outside this crate. The engine only needs a
//! [`Geocoder`]; [`Gazetteer`] is an in-memory implementation that ships
//! with a handful of cities and can be extended from JSON.
//!
//! When a place cannot be resolved, [`resolve_or_default`] substitutes a
//! fallback location instead of failing. The substitution is never silent:
//! the result carries `approximated = true` and a warning is logged.

use jathaka_core::GeoLocation;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeocodeError {
    #[error("place not found: {0}")]
    NotFound(String),

    #[error("empty place name")]
    EmptyName,

    #[error("invalid gazetteer: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid coordinates for {0}")]
    InvalidCoordinates(String),
}

/// A resolved place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub location: GeoLocation,
    /// Timezone identifier, e.g. `Asia/Kolkata`.
    pub timezone: String,
}

impl Place {
    pub fn new(name: impl Into<String>, location: GeoLocation, timezone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location,
            timezone: timezone.into(),
        }
    }

    /// Chennai, the fallback when nothing else is configured.
    pub fn chennai() -> Self {
        Self::new("Chennai", GeoLocation::new(13.0827, 80.2707), "Asia/Kolkata")
    }
}

/// Resolves a free-form place name.
pub trait Geocoder {
    fn resolve(&self, place: &str) -> Result<Place, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn resolve(&self, place: &str) -> Result<Place, GeocodeError> {
        (**self).resolve(place)
    }
}

/// Outcome of a resolution that never fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    pub place: Place,
    /// `true` when `place` is the fallback, not the requested place.
    pub approximated: bool,
}

/// Resolve `place`, substituting Chennai on failure.
pub fn resolve_or_default<G: Geocoder + ?Sized>(geocoder: &G, place: &str) -> ResolvedPlace {
    resolve_or(geocoder, place, Place::chennai())
}

/// Resolve `place`, substituting `fallback` on failure.
pub fn resolve_or<G: Geocoder + ?Sized>(geocoder: &G, place: &str, fallback: Place) -> ResolvedPlace {
    match geocoder.resolve(place) {
        Ok(found) => ResolvedPlace {
            place: found,
            approximated: false,
        },
        Err(e) => {
            warn!(
                "could not resolve {place:?} ({e}); using {} ({}, {})",
                fallback.name, fallback.location.latitude_deg, fallback.location.longitude_deg
            );
            ResolvedPlace {
                place: fallback,
                approximated: true,
            }
        }
    }
}

// (name, latitude, longitude, timezone)
const BUILTIN_PLACES: &[(&str, f64, f64, &str)] = &[
    ("Chennai", 13.0827, 80.2707, "Asia/Kolkata"),
    ("Madurai", 9.9252, 78.1198, "Asia/Kolkata"),
    ("Coimbatore", 11.0168, 76.9558, "Asia/Kolkata"),
    ("Tiruchirappalli", 10.7905, 78.7047, "Asia/Kolkata"),
    ("Salem", 11.6643, 78.1460, "Asia/Kolkata"),
    ("Tirunelveli", 8.7139, 77.7567, "Asia/Kolkata"),
    ("Thanjavur", 10.7870, 79.1378, "Asia/Kolkata"),
    ("Puducherry", 11.9416, 79.8083, "Asia/Kolkata"),
    ("Bengaluru", 12.9716, 77.5946, "Asia/Kolkata"),
    ("Hyderabad", 17.3850, 78.4867, "Asia/Kolkata"),
    ("Mumbai", 19.0760, 72.8777, "Asia/Kolkata"),
    ("Delhi", 28.6139, 77.2090, "Asia/Kolkata"),
    ("Kolkata", 22.5726, 88.3639, "Asia/Kolkata"),
    ("Colombo", 6.9271, 79.8612, "Asia/Colombo"),
    ("Jaffna", 9.6615, 80.0255, "Asia/Colombo"),
    ("Singapore", 1.3521, 103.8198, "Asia/Singapore"),
    ("Kuala Lumpur", 3.1390, 101.6869, "Asia/Kuala_Lumpur"),
    ("Dubai", 25.2048, 55.2708, "Asia/Dubai"),
];

/// In-memory place table with case-insensitive lookup.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    places: Vec<Place>,
}

impl Gazetteer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in city table.
    pub fn builtin() -> Self {
        let places = BUILTIN_PLACES
            .iter()
            .map(|&(name, lat, lon, tz)| Place::new(name, GeoLocation::new(lat, lon), tz))
            .collect();
        Self { places }
    }

    /// Parse a JSON array of [`Place`] values.
    pub fn from_json_str(json: &str) -> Result<Self, GeocodeError> {
        let places: Vec<Place> = serde_json::from_str(json)?;
        let mut g = Self::new();
        for p in places {
            g.insert(p)?;
        }
        debug!("gazetteer loaded with {} places", g.len());
        Ok(g)
    }

    /// Add or replace a place.
    pub fn insert(&mut self, place: Place) -> Result<(), GeocodeError> {
        if place.name.trim().is_empty() {
            return Err(GeocodeError::EmptyName);
        }
        if !place.location.is_valid() {
            return Err(GeocodeError::InvalidCoordinates(place.name));
        }
        self.upsert(place);
        Ok(())
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Add every place of `other`, replacing same-named entries.
    pub fn merge(&mut self, other: Gazetteer) {
        for place in other.places {
            self.upsert(place);
        }
    }

    fn upsert(&mut self, place: Place) {
        match self.position(&place.name) {
            Some(i) => self.places[i] = place,
            None => self.places.push(place),
        }
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.places
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
    }
}

impl Geocoder for Gazetteer {
    fn resolve(&self, place: &str) -> Result<Place, GeocodeError> {
        let query = place.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyName);
        }
        // "Madurai, Tamil Nadu, India" -> try the full string, then the city.
        let city = query.split(',').next().unwrap_or(query);
        self.position(query)
            .or_else(|| self.position(city))
            .map(|i| self.places[i].clone())
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))
    }
}
