//! Tabulated ephemeris loaded from a CSV dataset.
//!
//! Expected columns (header required):
//!
//! ```text
//! jd,body,longitude_deg
//! 2451545.0,Sun,280.3689
//! ```
//!
//! Rows may come in any order. Per body, samples are sorted by JD and
//! queried with linear interpolation across the 0/360 wrap.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use jathaka_time::{Instant, normalize_360};
use log::{debug, info};
use serde::Deserialize;

use crate::error::PositionError;
use crate::{Body, BodyLongitude, GeoLocation, PositionProvider};

#[derive(Debug, Deserialize)]
struct Row {
    jd: f64,
    body: String,
    longitude_deg: f64,
}

/// In-memory longitude tables, one series per body.
#[derive(Debug, Clone, Default)]
pub struct TabulatedEphemeris {
    series: HashMap<Body, Vec<(f64, f64)>>,
}

impl TabulatedEphemeris {
    /// Load a dataset from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PositionError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        info!(
            "loaded tabulated ephemeris {} ({} bodies)",
            path.display(),
            table.series.len()
        );
        Ok(table)
    }

    /// Parse a dataset from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PositionError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut series: HashMap<Body, Vec<(f64, f64)>> = HashMap::new();

        for record in csv_reader.deserialize::<Row>() {
            let row = record?;
            let body: Body = row.body.parse()?;
            if !row.jd.is_finite() || !row.longitude_deg.is_finite() {
                return Err(PositionError::Dataset(format!(
                    "non-finite sample for {body}"
                )));
            }
            series
                .entry(body)
                .or_default()
                .push((row.jd, normalize_360(row.longitude_deg)));
        }

        if series.is_empty() {
            return Err(PositionError::Dataset("dataset contains no rows".into()));
        }
        for (body, samples) in &mut series {
            if samples.len() < 2 {
                return Err(PositionError::Dataset(format!(
                    "{body} needs at least two samples"
                )));
            }
            samples.sort_by(|a, b| a.0.total_cmp(&b.0));
            if samples.windows(2).any(|w| w[0].0 == w[1].0) {
                return Err(PositionError::Dataset(format!(
                    "{body} has duplicate timestamps"
                )));
            }
        }

        Ok(Self { series })
    }

    /// JD range covered for `body`, if present.
    pub fn range(&self, body: Body) -> Option<(f64, f64)> {
        let s = self.series.get(&body)?;
        Some((s.first()?.0, s.last()?.0))
    }

    /// Bodies with data.
    pub fn bodies(&self) -> Vec<Body> {
        let mut out: Vec<Body> = self.series.keys().copied().collect();
        out.sort();
        out
    }

    /// Interpolated tropical longitude of `body` at `jd`.
    pub fn interpolate(&self, body: Body, jd: f64) -> Result<f64, PositionError> {
        let samples = self
            .series
            .get(&body)
            .ok_or_else(|| PositionError::Unavailable {
                body,
                reason: "body not present in dataset".into(),
            })?;
        let (start_jd, end_jd) = (samples[0].0, samples[samples.len() - 1].0);
        if !(start_jd..=end_jd).contains(&jd) {
            debug!("{body} at JD {jd} outside {start_jd}..{end_jd}");
            return Err(PositionError::OutOfRange {
                jd,
                start_jd,
                end_jd,
            });
        }

        // Index of the first sample strictly after jd, clamped so that
        // [idx-1, idx] is always a valid interval.
        let idx = samples
            .partition_point(|&(t, _)| t <= jd)
            .clamp(1, samples.len() - 1);
        let (t0, l0) = samples[idx - 1];
        let (t1, l1) = samples[idx];

        // shortest signed arc from l0 to l1
        let delta = (l1 - l0 + 180.0).rem_euclid(360.0) - 180.0;
        let frac = (jd - t0) / (t1 - t0);
        Ok(normalize_360(l0 + delta * frac))
    }
}

impl PositionProvider for TabulatedEphemeris {
    fn name(&self) -> &'static str {
        "tabulated"
    }

    fn longitude(
        &self,
        body: Body,
        instant: Instant,
        _location: &GeoLocation,
    ) -> Result<BodyLongitude, PositionError> {
        self.interpolate(body, instant.jd())
            .map(BodyLongitude::tropical)
    }
}
