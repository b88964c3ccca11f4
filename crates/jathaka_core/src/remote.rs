//! Remote astrology web service backend.
//!
//! The service answers with the sidereal sign and mansion a body occupies,
//! not with a longitude. Each query therefore issues two GET requests:
//!
//! ```text
//! {base}/Calculate/PlanetZodiacSign/{Planet}/{HH:mm/DD/MM/YYYY/+hh:mm}/{lat}/{lon}
//! {base}/Calculate/PlanetConstellation/{Planet}/{HH:mm/DD/MM/YYYY/+hh:mm}/{lat}/{lon}
//! ```
//!
//! and the pair is folded into the midpoint of the sign/mansion overlap.
//! Time is sent as local wall-clock time at minute resolution.

use std::time::Duration;

use jathaka_time::{Instant, UtcOffset, jd_to_calendar};
use log::{debug, info, warn};
use serde_json::Value;
use ureq::Agent;

use crate::error::PositionError;
use crate::{Body, BodyLongitude, GeoLocation, PositionProvider, Resolution};

/// Public VedAstro endpoint.
pub const DEFAULT_BASE_URL: &str = "https://vedastroapi.azurewebsites.net/api";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const SIGN_SPAN: f64 = 30.0;
const MANSION_SPAN: f64 = 360.0 / 27.0;

const WESTERN_SIGNS: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

/// Accepted spellings per mansion, compared after dropping case and
/// non-letters.
const MANSION_SPELLINGS: [&[&str]; 27] = [
    &["ashwini", "aswini", "asvini"],
    &["bharani"],
    &["krittika", "kritika", "krithika"],
    &["rohini"],
    &["mrigashira", "mrigasira", "mrigashirsha"],
    &["ardra", "aridra", "arudra"],
    &["punarvasu", "punarpoosam"],
    &["pushya", "pushyami", "pooya"],
    &["ashlesha", "aslesha", "ashlesa"],
    &["magha", "makha"],
    &["purvaphalguni", "pubba", "poorvaphalguni"],
    &["uttaraphalguni", "uttara", "uthiram"],
    &["hasta", "hastha"],
    &["chitra", "chitta", "chithirai"],
    &["swati", "swathi", "svati"],
    &["vishakha", "visakha", "vishaka"],
    &["anuradha", "anusham"],
    &["jyeshtha", "jyeshta", "jyesta"],
    &["mula", "moola"],
    &["purvaashadha", "purvashadha", "poorvashada"],
    &["uttaraashadha", "uttarashadha", "uttarashada"],
    &["shravana", "sravana", "thiruvonam"],
    &["dhanishta", "dhanishtha", "dhanista"],
    &["shatabhisha", "satabhisha", "shatabhishak"],
    &["purvabhadrapada", "purvabhadra", "poorvabhadra"],
    &["uttarabhadrapada", "uttarabhadra"],
    &["revati", "revathi"],
];

fn fold_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Sign index 0..11 from a western sign name.
pub fn sign_index_from_name(name: &str) -> Option<u8> {
    let folded = fold_name(name);
    WESTERN_SIGNS
        .iter()
        .position(|s| s.eq_ignore_ascii_case(&folded))
        .map(|i| i as u8)
}

/// Mansion index 0..26 from any accepted spelling.
pub fn mansion_index_from_name(name: &str) -> Option<u8> {
    let folded = fold_name(name);
    MANSION_SPELLINGS
        .iter()
        .position(|aliases| aliases.contains(&folded.as_str()))
        .map(|i| i as u8)
}

/// Local-time path segment `HH:mm/DD/MM/YYYY/+hh:mm`, rounded to the minute.
pub fn format_time_segment(instant: Instant, offset: UtcOffset) -> String {
    let local_jd = instant.jd() + offset.as_days() + 0.5 / 1440.0;
    let (year, month, day_frac) = jd_to_calendar(local_jd);
    let day = day_frac.floor();
    let minutes = ((day_frac - day) * 1440.0).floor() as u32;
    format!(
        "{:02}:{:02}/{:02}/{:02}/{:04}/{}",
        minutes / 60,
        minutes % 60,
        day as u32,
        month,
        year,
        offset
    )
}

/// Full request URL for one calculation.
pub fn planet_url(
    base_url: &str,
    calculation: &str,
    body: Body,
    time_segment: &str,
    location: &GeoLocation,
) -> String {
    format!(
        "{}/Calculate/{}/{}/{}/{}/{}",
        base_url.trim_end_matches('/'),
        calculation,
        body.name(),
        time_segment,
        location.latitude_deg,
        location.longitude_deg
    )
}

fn payload_field<'a>(json: &'a Value, field: &str) -> Result<&'a Value, PositionError> {
    json.get("Payload")
        .and_then(|p| p.get(field))
        .ok_or_else(|| PositionError::Decode(format!("missing Payload.{field}")))
}

/// The name inside a payload field, given either as a bare string or as
/// an object with a `Name` member.
fn payload_name<'a>(json: &'a Value, field: &str) -> Result<&'a str, PositionError> {
    let value = payload_field(json, field)?;
    value
        .as_str()
        .or_else(|| value.get("Name").and_then(Value::as_str))
        .ok_or_else(|| PositionError::Decode(format!("Payload.{field} has no name")))
}

/// Decode a `PlanetZodiacSign` response into a sign index.
pub fn decode_sign(body_text: &str) -> Result<u8, PositionError> {
    let json: Value =
        serde_json::from_str(body_text).map_err(|e| PositionError::Decode(e.to_string()))?;
    let name = payload_name(&json, "PlanetZodiacSign")?;
    sign_index_from_name(name)
        .ok_or_else(|| PositionError::Decode(format!("unknown sign name {name:?}")))
}

/// Decode a `PlanetConstellation` response into a mansion index.
///
/// `Ok(None)` when the payload carries no constellation for the body.
/// Malformed JSON, a missing `Payload` or an unknown name are errors.
pub fn decode_constellation(body_text: &str) -> Result<Option<u8>, PositionError> {
    let json: Value =
        serde_json::from_str(body_text).map_err(|e| PositionError::Decode(e.to_string()))?;
    let payload = json
        .get("Payload")
        .ok_or_else(|| PositionError::Decode("missing Payload".to_string()))?;
    match payload.get("PlanetConstellation") {
        None | Some(Value::Null) => Ok(None),
        Some(_) => {
            let name = payload_name(&json, "PlanetConstellation")?;
            mansion_index_from_name(name)
                .map(Some)
                .ok_or_else(|| PositionError::Decode(format!("unknown mansion name {name:?}")))
        }
    }
}

/// Fold a decoded sign and optional mansion into a sidereal longitude.
///
/// Without a mansion the result is the sign midpoint at
/// [`Resolution::SignOnly`].
pub fn resolve_longitude(
    body: Body,
    sign: u8,
    mansion: Option<u8>,
) -> Result<BodyLongitude, PositionError> {
    match mansion {
        Some(mansion) => Ok(BodyLongitude::sidereal(
            sign_and_mansion_to_longitude(sign, mansion)?,
            Resolution::SignAndMansion,
        )),
        None => {
            warn!("{body}: service returned no constellation, using sign midpoint");
            Ok(BodyLongitude::sidereal(
                sign_midpoint(sign),
                Resolution::SignOnly,
            ))
        }
    }
}

/// Midpoint of the arc shared by a sign and a mansion.
///
/// Errors when the two do not overlap, i.e. the service contradicted itself.
pub fn sign_and_mansion_to_longitude(sign: u8, mansion: u8) -> Result<f64, PositionError> {
    let sign_start = sign as f64 * SIGN_SPAN;
    let mansion_start = mansion as f64 * MANSION_SPAN;
    let lo = sign_start.max(mansion_start);
    let hi = (sign_start + SIGN_SPAN).min(mansion_start + MANSION_SPAN);
    if lo >= hi {
        return Err(PositionError::Decode(format!(
            "sign {sign} and mansion {mansion} do not overlap"
        )));
    }
    Ok((lo + hi) / 2.0)
}

/// Midpoint of a sign.
pub fn sign_midpoint(sign: u8) -> f64 {
    sign as f64 * SIGN_SPAN + SIGN_SPAN / 2.0
}

/// HTTP-backed provider. Results are sidereal and coarse.
#[derive(Debug, Clone)]
pub struct RemoteProvider {
    agent: Agent,
    base_url: String,
    utc_offset: UtcOffset,
}

impl RemoteProvider {
    /// `utc_offset` is the offset the service should interpret local times in.
    pub fn new(base_url: impl Into<String>, timeout: Duration, utc_offset: UtcOffset) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        let agent: Agent = config.into();
        let base_url = base_url.into();
        info!("remote provider at {base_url} (timeout {timeout:?})");
        Self {
            agent,
            base_url,
            utc_offset,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn utc_offset(&self) -> UtcOffset {
        self.utc_offset
    }

    fn get(&self, url: &str) -> Result<String, PositionError> {
        debug!("GET {url}");
        let text = self.agent.get(url).call()?.body_mut().read_to_string()?;
        Ok(text)
    }
}

impl Default for RemoteProvider {
    fn default() -> Self {
        Self::new(
            DEFAULT_BASE_URL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            UtcOffset::from_hm(5, 30).unwrap_or(UtcOffset::UTC),
        )
    }
}

impl PositionProvider for RemoteProvider {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn longitude(
        &self,
        body: Body,
        instant: Instant,
        location: &GeoLocation,
    ) -> Result<BodyLongitude, PositionError> {
        let time = format_time_segment(instant, self.utc_offset);

        let sign_url = planet_url(&self.base_url, "PlanetZodiacSign", body, &time, location);
        let sign = decode_sign(&self.get(&sign_url)?)?;

        let mansion_url = planet_url(&self.base_url, "PlanetConstellation", body, &time, location);
        let mansion = decode_constellation(&self.get(&mansion_url)?)?;

        resolve_longitude(body, sign, mansion)
    }
}
