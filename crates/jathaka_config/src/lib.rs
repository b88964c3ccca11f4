//! Explicit configuration for the jathaka engine.
//!
//! A [`JathakaConfig`] is plain data: it is loaded from JSON (or built in
//! code), validated once, and handed to the engine at construction time.
//! There is no process-wide configuration state.
//!
//! ```json
//! {
//!   "provider": { "kind": "remote", "timeout_secs": 20 },
//!   "ayanamsha": { "system": "Lahiri" },
//!   "nodes": "true",
//!   "default_location": {
//!     "name": "Chennai", "latitude_deg": 13.0827, "longitude_deg": 80.2707,
//!     "timezone": "Asia/Kolkata"
//!   }
//! }
//! ```

pub mod error;

use std::path::{Path, PathBuf};

use jathaka_core::{GeoLocation, NodeMode, remote};
use jathaka_time::UtcOffset;
use jathaka_vedic_base::{AyanamshaModel, AyanamshaSystem};
use log::info;
use serde::{Deserialize, Serialize};

pub use error::ConfigError;

/// Which position backend to use.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Closed-form series. No I/O.
    #[default]
    Analytic,
    /// CSV dataset of tropical longitudes.
    Tabulated { dataset: PathBuf },
    /// Remote astrology web service.
    Remote {
        #[serde(default = "default_base_url")]
        base_url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
        /// Offset used for the local-time path segment of requests.
        #[serde(default = "default_utc_offset_minutes")]
        utc_offset_minutes: i32,
    },
}

fn default_base_url() -> String {
    remote::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    remote::DEFAULT_TIMEOUT_SECS
}

fn default_utc_offset_minutes() -> i32 {
    330
}

impl ProviderConfig {
    /// Remote provider with default endpoint, timeout and IST offset.
    pub fn remote_default() -> Self {
        Self::Remote {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Analytic => "analytic",
            Self::Tabulated { .. } => "tabulated",
            Self::Remote { .. } => "remote",
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Analytic => Ok(()),
            Self::Tabulated { dataset } => {
                if dataset.as_os_str().is_empty() {
                    return Err(ConfigError::Invalid("tabulated dataset path must not be empty"));
                }
                Ok(())
            }
            Self::Remote {
                base_url,
                timeout_secs,
                utc_offset_minutes,
            } => {
                if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                    return Err(ConfigError::Invalid("remote base_url must be an http(s) URL"));
                }
                if *timeout_secs == 0 {
                    return Err(ConfigError::Invalid("remote timeout_secs must be positive"));
                }
                if UtcOffset::from_minutes(*utc_offset_minutes).is_err() {
                    return Err(ConfigError::Invalid("remote utc_offset_minutes out of range"));
                }
                Ok(())
            }
        }
    }
}

/// Custom linear ayanamsha parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomAyanamsha {
    pub reference_deg: f64,
    pub epoch_jd: f64,
    pub rate_arcsec_per_year: f64,
}

/// Sidereal reference selection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AyanamshaConfig {
    #[serde(default)]
    pub system: AyanamshaSystem,
    /// Overrides `system` when present.
    #[serde(default)]
    pub custom: Option<CustomAyanamsha>,
}

impl AyanamshaConfig {
    /// The model every chart built with this configuration uses.
    pub fn model(&self) -> Result<AyanamshaModel, ConfigError> {
        match self.custom {
            Some(c) => AyanamshaModel::new(c.reference_deg, c.epoch_jd, c.rate_arcsec_per_year)
                .map_err(|_| ConfigError::Invalid("custom ayanamsha parameters are not usable")),
            None => Ok(AyanamshaModel::for_system(self.system)),
        }
    }
}

/// Place substituted when a birth place cannot be resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultLocation {
    pub name: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub timezone: String,
}

impl DefaultLocation {
    pub fn location(&self) -> GeoLocation {
        GeoLocation::new(self.latitude_deg, self.longitude_deg)
    }
}

impl Default for DefaultLocation {
    fn default() -> Self {
        Self {
            name: "Chennai".to_string(),
            latitude_deg: 13.0827,
            longitude_deg: 80.2707,
            timezone: "Asia/Kolkata".to_string(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JathakaConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub ayanamsha: AyanamshaConfig,
    #[serde(default)]
    pub nodes: NodeMode,
    /// Fallback place for unresolved birth places. `None` uses Chennai.
    #[serde(default)]
    pub default_location: Option<DefaultLocation>,
}

impl JathakaConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!(
            "loaded config {} (provider: {})",
            path.display(),
            config.provider.kind()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.provider.validate()?;
        self.ayanamsha.model()?;
        if let Some(loc) = &self.default_location {
            if !loc.location().is_valid() {
                return Err(ConfigError::Invalid("default_location coordinates out of range"));
            }
            if loc.timezone.trim().is_empty() {
                return Err(ConfigError::Invalid("default_location timezone must not be empty"));
            }
        }
        Ok(())
    }

    /// The configured fallback place, or Chennai.
    pub fn fallback_location(&self) -> DefaultLocation {
        self.default_location.clone().unwrap_or_default()
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
