//! Probe data files.
//!
//! ```json
//! {
//!   "depths": [0.0, 0.25, 0.5],
//!   "records": [
//!     {
//!       "timestamp": "2023-01-10T00:00:00Z",
//!       "readings": [-1.5, 0.2, 1.1],
//!       "confidence": [1, -1, 1]
//!     }
//!   ]
//! }
//! ```
//!
//! `confidence` is optional; a negative level marks that reading invalid.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use profile_common::{Observation, ObservationSeries};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeFile {
    pub depths: Vec<f64>,
    #[serde(default)]
    pub records: Vec<ProbeRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeRecord {
    pub timestamp: DateTime<Utc>,
    pub readings: Vec<f64>,
    #[serde(default)]
    pub confidence: Option<Vec<f64>>,
}

impl From<ProbeRecord> for Observation {
    fn from(record: ProbeRecord) -> Self {
        match record.confidence {
            Some(cl) => Observation::from_confidence(record.timestamp, record.readings, &cl),
            None => Observation::valid(record.timestamp, record.readings),
        }
    }
}

impl ProbeFile {
    /// Convert into a validated series.
    pub fn into_series(self) -> Result<ObservationSeries> {
        let observations = self.records.into_iter().map(Observation::from).collect();
        let series = ObservationSeries::new(self.depths, observations);
        series.validate().context("Inconsistent probe data")?;
        Ok(series)
    }
}

pub fn parse_probe_json(json: &str) -> Result<ObservationSeries> {
    let file: ProbeFile = serde_json::from_str(json).context("Failed to parse probe data")?;
    file.into_series()
}

/// Load a probe data file.
pub fn load_series(path: &Path) -> Result<ObservationSeries> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read probe data {}", path.display()))?;
    let series = parse_probe_json(&contents).with_context(|| format!("in {}", path.display()))?;

    info!(
        path = %path.display(),
        depths = series.depths.len(),
        observations = series.len(),
        "Loaded probe data"
    );
    Ok(series)
}
