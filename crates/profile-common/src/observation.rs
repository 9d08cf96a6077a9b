//! Frost-probe observations: one timestamped reading per thermistor depth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, ProfileResult};

/// One timestamped record across all depth levels of the probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    /// Temperature per depth level, top to bottom.
    pub readings: Vec<f64>,
    /// Per depth level, `true` marks an invalid reading.
    pub invalid: Vec<bool>,
}

impl Observation {
    pub fn new(timestamp: DateTime<Utc>, readings: Vec<f64>, invalid: Vec<bool>) -> Self {
        Self {
            timestamp,
            readings,
            invalid,
        }
    }

    /// Observation with every reading valid.
    pub fn valid(timestamp: DateTime<Utc>, readings: Vec<f64>) -> Self {
        let invalid = vec![false; readings.len()];
        Self::new(timestamp, readings, invalid)
    }

    /// Derive validity from probe confidence levels; a negative level is invalid.
    pub fn from_confidence(
        timestamp: DateTime<Utc>,
        readings: Vec<f64>,
        confidence: &[f64],
    ) -> Self {
        let invalid = confidence.iter().map(|cl| *cl < 0.0).collect();
        Self::new(timestamp, readings, invalid)
    }

    /// Time in epoch milliseconds, the domain value of a time scale.
    pub fn time_value(&self) -> f64 {
        self.timestamp.timestamp_millis() as f64
    }

    pub fn is_invalid(&self, depth: usize) -> bool {
        self.invalid.get(depth).copied().unwrap_or(false)
    }
}

/// An ordered run of observations sharing one set of thermistor depths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationSeries {
    /// Thermistor depths, top to bottom, in depth-scale units.
    pub depths: Vec<f64>,
    pub observations: Vec<Observation>,
}

impl ObservationSeries {
    pub fn new(depths: Vec<f64>, observations: Vec<Observation>) -> Self {
        Self {
            depths,
            observations,
        }
    }

    /// Check that depths run strictly top to bottom, that every observation
    /// matches the depth count and that timestamps never go backwards.
    pub fn validate(&self) -> ProfileResult<()> {
        if let Some(pair) = self.depths.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(ProfileError::invalid_parameter(
                "depths",
                format!("depths must increase downwards, got {} then {}", pair[0], pair[1]),
            ));
        }

        let depth_count = self.depths.len();
        let mut previous: Option<DateTime<Utc>> = None;

        for (index, obs) in self.observations.iter().enumerate() {
            if obs.readings.len() != depth_count {
                return Err(ProfileError::InconsistentObservation {
                    index,
                    message: format!(
                        "{} readings for {} depth levels",
                        obs.readings.len(),
                        depth_count
                    ),
                });
            }
            if obs.invalid.len() != depth_count {
                return Err(ProfileError::InconsistentObservation {
                    index,
                    message: format!(
                        "{} validity flags for {} depth levels",
                        obs.invalid.len(),
                        depth_count
                    ),
                });
            }
            if previous.is_some_and(|prev| obs.timestamp < prev) {
                return Err(ProfileError::InconsistentObservation {
                    index,
                    message: "timestamps out of order".to_string(),
                });
            }
            previous = Some(obs.timestamp);
        }

        Ok(())
    }

    /// First and last timestamp, if any observations exist.
    pub fn time_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.observations.first()?;
        let last = self.observations.last()?;
        Some((first.timestamp, last.timestamp))
    }

    /// Shallowest and deepest thermistor depth.
    pub fn depth_bounds(&self) -> Option<(f64, f64)> {
        self.depths.iter().fold(None, |acc, &d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
