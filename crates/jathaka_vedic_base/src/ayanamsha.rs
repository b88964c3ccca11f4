//! Ayanamsha: the offset between the tropical and sidereal zodiacs.
//!
//! Every system here uses the same linear model:
//!
//! ```text
//! ayanamsha(JD) = reference_deg + (rate_arcsec_per_year / 3600) * (JD - epoch_jd) / 365.25
//! ```
//!
//! anchored at J2000.0. Systems differ only in their J2000 reference value;
//! they share the mean precession rate of 50.29"/yr.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use jathaka_time::{DAYS_PER_YEAR, J2000_JD};
use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::util::normalize_360;

/// Mean general precession in longitude, arcseconds per Julian year.
pub const PRECESSION_ARCSEC_PER_YEAR: f64 = 50.29;

/// Sidereal reference systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AyanamshaSystem {
    /// Lahiri (Chitrapaksha): Spica at 0 Libra sidereal. Indian government standard.
    #[default]
    Lahiri,
    /// Krishnamurti Paddhati: a few arcseconds short of Lahiri.
    KP,
    /// B.V. Raman.
    Raman,
    /// Fagan-Bradley: the Western sidereal standard.
    FaganBradley,
    /// Sri Yukteshwar, "The Holy Science".
    Yukteshwar,
}

/// All systems in enum order.
pub const ALL_SYSTEMS: [AyanamshaSystem; 5] = [
    AyanamshaSystem::Lahiri,
    AyanamshaSystem::KP,
    AyanamshaSystem::Raman,
    AyanamshaSystem::FaganBradley,
    AyanamshaSystem::Yukteshwar,
];

impl AyanamshaSystem {
    /// Ayanamsha at J2000.0 in degrees.
    pub const fn reference_j2000_deg(self) -> f64 {
        match self {
            // 23 deg 51' 11"
            Self::Lahiri => 23.853_055_6,
            Self::KP => 23.850_0,
            Self::Raman => 22.370_0,
            Self::FaganBradley => 24.736_0,
            Self::Yukteshwar => 22.376_0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Lahiri => "Lahiri",
            Self::KP => "KP",
            Self::Raman => "Raman",
            Self::FaganBradley => "Fagan-Bradley",
            Self::Yukteshwar => "Yukteshwar",
        }
    }

    pub const fn all() -> &'static [AyanamshaSystem; 5] {
        &ALL_SYSTEMS
    }
}

impl Display for AyanamshaSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AyanamshaSystem {
    type Err = VedicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "lahiri" | "chitrapaksha" => Ok(Self::Lahiri),
            "kp" | "krishnamurti" => Ok(Self::KP),
            "raman" => Ok(Self::Raman),
            "faganbradley" | "fagan" => Ok(Self::FaganBradley),
            "yukteshwar" => Ok(Self::Yukteshwar),
            _ => Err(VedicError::InvalidInput("unknown ayanamsha system")),
        }
    }
}

/// Linear ayanamsha model. One instance is used for every body of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AyanamshaModel {
    /// Ayanamsha at `epoch_jd`, degrees.
    pub reference_deg: f64,
    /// Anchor epoch (JD).
    pub epoch_jd: f64,
    /// Precession rate, arcseconds per 365.25-day year.
    pub rate_arcsec_per_year: f64,
}

impl AyanamshaModel {
    /// Build a custom model. The rate must be positive so the offset grows
    /// monotonically.
    pub fn new(
        reference_deg: f64,
        epoch_jd: f64,
        rate_arcsec_per_year: f64,
    ) -> Result<Self, VedicError> {
        if !reference_deg.is_finite() || !epoch_jd.is_finite() {
            return Err(VedicError::InvalidInput("ayanamsha anchor must be finite"));
        }
        if !(rate_arcsec_per_year.is_finite() && rate_arcsec_per_year > 0.0) {
            return Err(VedicError::InvalidInput("precession rate must be positive"));
        }
        Ok(Self {
            reference_deg,
            epoch_jd,
            rate_arcsec_per_year,
        })
    }

    /// Model for a named system, anchored at J2000.0.
    pub const fn for_system(system: AyanamshaSystem) -> Self {
        Self {
            reference_deg: system.reference_j2000_deg(),
            epoch_jd: J2000_JD,
            rate_arcsec_per_year: PRECESSION_ARCSEC_PER_YEAR,
        }
    }

    pub const fn lahiri() -> Self {
        Self::for_system(AyanamshaSystem::Lahiri)
    }

    /// Ayanamsha in degrees at `jd`.
    pub fn value_deg(&self, jd: f64) -> f64 {
        let years = (jd - self.epoch_jd) / DAYS_PER_YEAR;
        self.reference_deg + self.rate_arcsec_per_year / 3600.0 * years
    }

    /// Sidereal longitude of a tropical longitude at `jd`.
    pub fn to_sidereal(&self, tropical_deg: f64, jd: f64) -> f64 {
        tropical_to_sidereal(tropical_deg, self.value_deg(jd))
    }
}

impl Default for AyanamshaModel {
    fn default() -> Self {
        Self::lahiri()
    }
}

/// Ayanamsha in degrees for `system` at `jd`.
pub fn ayanamsha_deg(system: AyanamshaSystem, jd: f64) -> f64 {
    AyanamshaModel::for_system(system).value_deg(jd)
}

/// `(tropical - ayanamsha) mod 360`, always in [0, 360).
pub fn tropical_to_sidereal(tropical_deg: f64, ayanamsha_deg: f64) -> f64 {
    normalize_360(tropical_deg - ayanamsha_deg)
}
