//! Lagna (Ascendant) and MC (Midheaven) computation.
//!
//! Standard spherical astronomy on the local sidereal time (ARMC):
//!
//! ```text
//! Asc = atan2(cos(ARMC), -(sin(eps) * tan(phi) + cos(eps) * sin(ARMC)))
//! MC  = atan2(sin(ARMC), cos(ARMC) * cos(eps))
//! ```
//!
//! The textbook `tan(Asc) = -cos(ARMC) / (sin(eps) tan(phi) + cos(eps) sin(ARMC))`
//! has two solutions 180 deg apart; the signs above select the point on
//! the eastern horizon (hour angle < 0). Obliquity is the mean obliquity
//! of date.
//!
//! Sources: Meeus, "Astronomical Algorithms" (2nd ed), Chapters 12-14.

use jathaka_core::GeoLocation;
use jathaka_time::{Instant, gmst_deg, local_sidereal_time_deg, mean_obliquity_deg};

use crate::ayanamsha::AyanamshaModel;
use crate::error::VedicError;
use crate::util::normalize_360;

/// Local sidereal time (ARMC) in degrees at `instant` for an observer at
/// `longitude_east_deg`.
pub fn armc_deg(instant: Instant, longitude_east_deg: f64) -> f64 {
    local_sidereal_time_deg(gmst_deg(instant.jd()), longitude_east_deg)
}

/// Tropical ascendant from ARMC, geographic latitude and obliquity (all degrees).
pub fn ascendant_from_armc_deg(armc_deg: f64, latitude_deg: f64, obliquity_deg: f64) -> f64 {
    let armc = armc_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    let phi = latitude_deg.to_radians();
    let asc = f64::atan2(
        armc.cos(),
        -(eps.sin() * phi.tan() + eps.cos() * armc.sin()),
    );
    normalize_360(asc.to_degrees())
}

/// Tropical MC from ARMC and obliquity (degrees).
pub fn mc_from_armc_deg(armc_deg: f64, obliquity_deg: f64) -> f64 {
    let armc = armc_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    normalize_360(f64::atan2(armc.sin(), armc.cos() * eps.cos()).to_degrees())
}

fn validate(location: &GeoLocation) -> Result<(), VedicError> {
    if !location.latitude_deg.is_finite() || !location.longitude_deg.is_finite() {
        return Err(VedicError::InvalidLocation("coordinates must be finite"));
    }
    // tan(phi) diverges at the poles
    if location.latitude_deg.abs() >= 90.0 {
        return Err(VedicError::InvalidLocation("latitude must be within (-90, 90)"));
    }
    Ok(())
}

/// Tropical ascendant in degrees, [0, 360).
pub fn lagna_tropical_deg(instant: Instant, location: &GeoLocation) -> Result<f64, VedicError> {
    lagna_and_mc_deg(instant, location).map(|(asc, _)| asc)
}

/// Tropical MC in degrees, [0, 360).
pub fn mc_tropical_deg(instant: Instant, location: &GeoLocation) -> Result<f64, VedicError> {
    lagna_and_mc_deg(instant, location).map(|(_, mc)| mc)
}

/// Tropical `(ascendant, mc)`, sharing the ARMC and obliquity computation.
pub fn lagna_and_mc_deg(
    instant: Instant,
    location: &GeoLocation,
) -> Result<(f64, f64), VedicError> {
    validate(location)?;
    let armc = armc_deg(instant, location.longitude_deg);
    let eps = mean_obliquity_deg(instant.centuries_since_j2000());
    Ok((
        ascendant_from_armc_deg(armc, location.latitude_deg, eps),
        mc_from_armc_deg(armc, eps),
    ))
}

/// Sidereal ascendant under `model`.
pub fn lagna_sidereal_deg(
    instant: Instant,
    location: &GeoLocation,
    model: &AyanamshaModel,
) -> Result<f64, VedicError> {
    let tropical = lagna_tropical_deg(instant, location)?;
    Ok(model.to_sidereal(tropical, instant.jd()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 23.439_291;

    #[test]
    fn equator_armc_zero_rises_cancer() {
        // Vernal point on the meridian: 0 Cancer is rising.
        let asc = ascendant_from_armc_deg(0.0, 0.0, EPS);
        assert!((asc - 90.0).abs() < 1e-10, "asc = {asc}");
    }

    #[test]
    fn mc_at_cardinal_points() {
        assert!(mc_from_armc_deg(0.0, EPS).abs() < 1e-10);
        assert!((mc_from_armc_deg(90.0, EPS) - 90.0).abs() < 1e-10);
        assert!((mc_from_armc_deg(180.0, EPS) - 180.0).abs() < 1e-10);
    }

    #[test]
    fn ascendant_leads_mc_by_about_ninety() {
        // At the equator asc - mc stays within a few degrees of 90.
        for i in 0..36 {
            let armc = i as f64 * 10.0;
            let asc = ascendant_from_armc_deg(armc, 0.0, EPS);
            let mc = mc_from_armc_deg(armc, EPS);
            let d = normalize_360(asc - mc);
            assert!((60.0..120.0).contains(&d), "armc {armc}: asc-mc = {d}");
        }
    }

    #[test]
    fn poles_rejected() {
        let err = lagna_tropical_deg(Instant::J2000, &GeoLocation::new(90.0, 0.0));
        assert!(matches!(err, Err(VedicError::InvalidLocation(_))));
        let err = lagna_tropical_deg(Instant::J2000, &GeoLocation::new(f64::NAN, 0.0));
        assert!(err.is_err());
    }

    #[test]
    fn sidereal_subtracts_ayanamsha() {
        let loc = GeoLocation::new(13.0827, 80.2707);
        let model = AyanamshaModel::lahiri();
        let trop = lagna_tropical_deg(Instant::J2000, &loc).unwrap();
        let sid = lagna_sidereal_deg(Instant::J2000, &loc, &model).unwrap();
        assert!((normalize_360(trop - sid) - model.value_deg(Instant::J2000.jd())).abs() < 1e-9);
    }
}
