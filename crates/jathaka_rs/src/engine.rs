//! The engine handle and chart assembly.

use std::time::Duration;

use jathaka_config::{JathakaConfig, ProviderConfig};
use jathaka_core::{
    AnalyticProvider, Body, BodyLongitude, GeoLocation, LunarNode, NodeMode, PositionError,
    PositionProvider, RemoteProvider, TabulatedEphemeris, Zodiac,
};
use jathaka_time::{CivilDateTime, CivilTimeNormalizer, Instant, UtcOffset};
use jathaka_vedic_base::{
    AyanamshaModel, ChartPosition, Graha, lagna_and_mc_deg, tropical_to_sidereal, vaar_at,
    vimshottari_timeline,
};
use log::{debug, info};

use crate::chart::{BirthData, Chart, GrahaPosition, Transits, occupancy};
use crate::convenience::birth_at_place;
use crate::error::JathakaError;
use crate::geocode::{Geocoder, Place, ResolvedPlace, resolve_or};

/// A configured chart engine.
///
/// Holds one position provider, the ayanamsha model and node mode. Every
/// chart built by the same handle uses the same sidereal reference.
pub struct Jathaka {
    provider: Box<dyn PositionProvider>,
    ayanamsha: AyanamshaModel,
    nodes: NodeMode,
    fallback: Place,
}

impl std::fmt::Debug for Jathaka {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Jathaka")
            .field("provider", &self.provider.name())
            .field("ayanamsha", &self.ayanamsha)
            .field("nodes", &self.nodes)
            .field("fallback", &self.fallback.name)
            .finish()
    }
}

/// Instantiate the backend named by `config`.
pub fn build_provider(config: &ProviderConfig) -> Result<Box<dyn PositionProvider>, JathakaError> {
    let provider: Box<dyn PositionProvider> = match config {
        ProviderConfig::Analytic => Box::new(AnalyticProvider::new()),
        ProviderConfig::Tabulated { dataset } => Box::new(TabulatedEphemeris::load(dataset)?),
        ProviderConfig::Remote {
            base_url,
            timeout_secs,
            utc_offset_minutes,
        } => Box::new(RemoteProvider::new(
            base_url.clone(),
            Duration::from_secs(*timeout_secs),
            UtcOffset::from_minutes(*utc_offset_minutes)?,
        )),
    };
    info!("using {} position provider", provider.name());
    Ok(provider)
}

impl Jathaka {
    /// Build from a configuration, validating it first.
    pub fn from_config(config: &JathakaConfig) -> Result<Self, JathakaError> {
        config.validate()?;
        let provider = build_provider(&config.provider)?;
        let fallback = config.fallback_location();
        Ok(Self {
            provider,
            ayanamsha: config.ayanamsha.model()?,
            nodes: config.nodes,
            fallback: Place::new(fallback.name.clone(), fallback.location(), fallback.timezone),
        })
    }

    /// Build around any provider, with Lahiri ayanamsha and mean nodes.
    pub fn from_provider(provider: Box<dyn PositionProvider>) -> Self {
        Self {
            provider,
            ayanamsha: AyanamshaModel::lahiri(),
            nodes: NodeMode::Mean,
            fallback: Place::chennai(),
        }
    }

    /// Analytic provider with default settings. Performs no I/O.
    pub fn analytic() -> Self {
        Self::from_provider(Box::new(AnalyticProvider::new()))
    }

    pub fn with_ayanamsha(mut self, model: AyanamshaModel) -> Self {
        self.ayanamsha = model;
        self
    }

    pub fn with_node_mode(mut self, mode: NodeMode) -> Self {
        self.nodes = mode;
        self
    }

    pub fn with_fallback_place(mut self, place: Place) -> Self {
        self.fallback = place;
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn ayanamsha(&self) -> &AyanamshaModel {
        &self.ayanamsha
    }

    pub fn node_mode(&self) -> NodeMode {
        self.nodes
    }

    pub fn fallback_place(&self) -> &Place {
        &self.fallback
    }

    /// Resolve a place name, falling back to this engine's default place.
    pub fn resolve_place<G: Geocoder + ?Sized>(&self, geocoder: &G, name: &str) -> ResolvedPlace {
        resolve_or(geocoder, name, self.fallback.clone())
    }

    /// Birth data from a place name, falling back to this engine's default
    /// place when the name does not resolve.
    pub fn birth_from_place<G, N>(
        &self,
        civil: CivilDateTime,
        place_name: &str,
        geocoder: &G,
        normalizer: &N,
    ) -> Result<(BirthData, ResolvedPlace), JathakaError>
    where
        G: Geocoder + ?Sized,
        N: CivilTimeNormalizer + ?Sized,
    {
        birth_at_place(civil, self.resolve_place(geocoder, place_name), normalizer)
    }

    /// Compute a full birth chart.
    pub fn compute_chart(&self, birth: &BirthData) -> Result<Chart, JathakaError> {
        let instant = birth.instant()?;
        let jd = instant.jd();
        let aya = self.ayanamsha.value_deg(jd);

        let (asc_trop, mc_trop) = lagna_and_mc_deg(instant, &birth.location)?;
        let ascendant = ChartPosition::from_sidereal(tropical_to_sidereal(asc_trop, aya));
        let midheaven = ChartPosition::from_sidereal(tropical_to_sidereal(mc_trop, aya));

        let grahas = self.graha_positions(instant, &birth.location, aya)?;
        let moon = grahas[Graha::Chandra.index() as usize].position;
        let dasha = vimshottari_timeline(jd, moon.longitude_deg);
        let balance = dasha.balance;

        debug!(
            "chart at {instant}: lagna {} moon {} pada {}, first dasha {} ({:.4} y)",
            ascendant.rashi(),
            moon.nakshatra(),
            moon.pada,
            balance.lord,
            balance.years
        );

        Ok(Chart {
            birth: *birth,
            instant,
            ayanamsha_deg: aya,
            weekday: vaar_at(instant, birth.offset),
            occupancy: occupancy(&grahas, &ascendant),
            grahas,
            ascendant,
            midheaven,
            moon,
            dasha,
            balance,
            approximated_location: birth.approximated_location,
        })
    }

    /// Positions of all grahas at `at`.
    pub fn transits(&self, at: Instant, location: &GeoLocation) -> Result<Transits, JathakaError> {
        if !location.is_valid() {
            return Err(JathakaError::InvalidLocation("coordinates out of range"));
        }
        let aya = self.ayanamsha.value_deg(at.jd());
        Ok(Transits {
            instant: at,
            ayanamsha_deg: aya,
            grahas: self.graha_positions(at, location, aya)?,
        })
    }

    /// Transits at the current wall-clock time.
    pub fn transits_now(&self, location: &GeoLocation) -> Result<Transits, JathakaError> {
        self.transits(Instant::from_utc(chrono::Utc::now()), location)
    }

    fn graha_positions(
        &self,
        instant: Instant,
        location: &GeoLocation,
        aya: f64,
    ) -> Result<Vec<GrahaPosition>, JathakaError> {
        let physical = self.body_longitudes(instant, location)?;
        let mut out = Vec::with_capacity(9);
        for (body, lon) in Body::ALL.into_iter().zip(physical) {
            out.push(graha_position(Graha::from_body(body), lon, aya));
        }
        for node in [LunarNode::Rahu, LunarNode::Ketu] {
            let lon = self.provider.lunar_node(node, instant, self.nodes);
            out.push(graha_position(Graha::from_node(node), lon, aya));
        }
        Ok(out)
    }

    #[cfg(not(feature = "parallel"))]
    fn body_longitudes(
        &self,
        instant: Instant,
        location: &GeoLocation,
    ) -> Result<Vec<BodyLongitude>, PositionError> {
        Body::ALL
            .iter()
            .map(|&body| self.provider.longitude(body, instant, location))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn body_longitudes(
        &self,
        instant: Instant,
        location: &GeoLocation,
    ) -> Result<Vec<BodyLongitude>, PositionError> {
        use rayon::prelude::*;
        Body::ALL
            .par_iter()
            .map(|&body| self.provider.longitude(body, instant, location))
            .collect()
    }
}

/// Place a provider longitude in the sidereal zodiac.
///
/// Tropical values are shifted by `aya`; values the provider already gave
/// as sidereal are used unchanged.
fn graha_position(graha: Graha, raw: BodyLongitude, aya: f64) -> GrahaPosition {
    let (tropical_deg, sidereal) = match raw.zodiac {
        Zodiac::Tropical => (
            Some(raw.longitude_deg),
            tropical_to_sidereal(raw.longitude_deg, aya),
        ),
        Zodiac::Sidereal => (None, raw.longitude_deg),
    };
    GrahaPosition {
        graha,
        tropical_deg,
        position: ChartPosition::from_sidereal(sidereal),
        resolution: raw.resolution,
    }
}

#[cfg(test)]
mod tests {
    use jathaka_core::Resolution;

    use super::*;

    #[test]
    fn sidereal_input_is_not_shifted_again() {
        let raw = BodyLongitude::sidereal(45.0, Resolution::SignAndMansion);
        let g = graha_position(Graha::Guru, raw, 23.7);
        assert_eq!(g.tropical_deg, None);
        assert!((g.position.longitude_deg - 45.0).abs() < 1e-12);
        assert_eq!(g.resolution, Resolution::SignAndMansion);
    }

    #[test]
    fn tropical_input_is_shifted() {
        let g = graha_position(Graha::Surya, BodyLongitude::tropical(10.0), 23.7);
        assert_eq!(g.tropical_deg, Some(10.0));
        assert!((g.position.longitude_deg - 346.3).abs() < 1e-9);
    }

    #[test]
    fn analytic_engine_defaults() {
        let j = Jathaka::analytic();
        assert_eq!(j.provider_name(), "analytic");
        assert_eq!(j.node_mode(), NodeMode::Mean);
        assert_eq!(j.fallback_place().name, "Chennai");
    }

    #[test]
    fn from_config_uses_configured_settings() {
        let config = JathakaConfig::from_json_str(
            r#"{"ayanamsha": {"system": "Raman"}, "nodes": "true",
                "default_location": {"name": "Madurai", "latitude_deg": 9.9252,
                                     "longitude_deg": 78.1198, "timezone": "Asia/Kolkata"}}"#,
        )
        .unwrap();
        let j = Jathaka::from_config(&config).unwrap();
        assert_eq!(j.node_mode(), NodeMode::True);
        assert!((j.ayanamsha().reference_deg - 22.37).abs() < 1e-12);
        assert_eq!(j.fallback_place().name, "Madurai");
    }

    #[test]
    fn remote_config_builds_without_network() {
        let config = JathakaConfig {
            provider: ProviderConfig::remote_default(),
            ..JathakaConfig::default()
        };
        let j = Jathaka::from_config(&config).unwrap();
        assert_eq!(j.provider_name(), "remote");
    }

    #[test]
    fn missing_dataset_is_reported() {
        let config = JathakaConfig {
            provider: ProviderConfig::Tabulated {
                dataset: "/nonexistent/jathaka/moon.csv".into(),
            },
            ..JathakaConfig::default()
        };
        let err = Jathaka::from_config(&config).unwrap_err();
        assert!(matches!(err, JathakaError::Position(PositionError::Io(_))));
    }
}
