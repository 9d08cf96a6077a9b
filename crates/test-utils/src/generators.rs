//! Test data generators for creating synthetic frost-probe data.
//!
//! These generators create predictable, verifiable test data patterns
//! that can be used across the test suite.

use chrono::{DateTime, Duration, Utc};
use profile_common::{Observation, ObservationSeries, SampleGrid};

/// Creates a series of `count` observations, `step_minutes` apart, starting
/// at `start`, one reading per depth.
///
/// Each reading is `obs_index * 10 + depth_index`, so any cell can be
/// checked by value. All readings are valid.
///
/// # Example
///
/// ```
/// use test_utils::{fixtures, uniform_series};
///
/// let series = uniform_series(&[0.0, 1.0], 3, fixtures::reference_time(), 60);
/// assert_eq!(series.observations[2].readings, vec![20.0, 21.0]);
/// ```
pub fn uniform_series(
    depths: &[f64],
    count: usize,
    start: DateTime<Utc>,
    step_minutes: i64,
) -> ObservationSeries {
    let observations = (0..count)
        .map(|i| {
            let readings = (0..depths.len()).map(|j| (i * 10 + j) as f64).collect();
            Observation::valid(start + Duration::minutes(step_minutes * i as i64), readings)
        })
        .collect();
    ObservationSeries::new(depths.to_vec(), observations)
}

/// Marks the readings at `(observation, depth)` positions invalid.
pub fn with_invalid(mut series: ObservationSeries, cells: &[(usize, usize)]) -> ObservationSeries {
    for &(i, j) in cells {
        if let Some(flag) = series.observations.get_mut(i).and_then(|o| o.invalid.get_mut(j)) {
            *flag = true;
        }
    }
    series
}

/// Creates a temperature-like probe series.
///
/// Temperatures follow a daily cycle that is strongest at the surface and
/// damped with depth, centred on 2°C.
pub fn probe_series(
    depths: &[f64],
    count: usize,
    start: DateTime<Utc>,
    step_minutes: i64,
) -> ObservationSeries {
    let observations = (0..count)
        .map(|i| {
            let hours = (step_minutes * i as i64) as f64 / 60.0;
            let phase = hours / 24.0 * std::f64::consts::TAU;
            let readings = depths
                .iter()
                .map(|d| 2.0 + 6.0 * (-d * 3.0).exp() * phase.sin())
                .collect();
            Observation::valid(start + Duration::minutes(step_minutes * i as i64), readings)
        })
        .collect();
    ObservationSeries::new(depths.to_vec(), observations)
}

/// Creates a fully present grid where cell `(row, col)` is `row * 100 + col`.
///
/// # Example
///
/// ```
/// use test_utils::linear_grid;
///
/// let grid = linear_grid(2, 3);
/// assert_eq!(grid.get(1, 2), Some(102.0));
/// ```
pub fn linear_grid(rows: usize, cols: usize) -> SampleGrid {
    let rows: Vec<Vec<Option<f64>>> = (0..rows)
        .map(|r| (0..cols).map(|c| Some((r * 100 + c) as f64)).collect())
        .collect();
    SampleGrid::from_rows(rows).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_uniform_series_values() {
        let series = uniform_series(&[0.0, 0.5, 1.0], 4, fixtures::reference_time(), 30);
        assert_eq!(series.len(), 4);
        assert_eq!(series.observations[3].readings, vec![30.0, 31.0, 32.0]);
        assert_eq!(
            series.observations[1].timestamp - series.observations[0].timestamp,
            Duration::minutes(30)
        );
        assert!(series.validate().is_ok());
    }

    #[test]
    fn test_with_invalid_marks_cells() {
        let series = with_invalid(
            uniform_series(&[0.0, 0.5], 2, fixtures::reference_time(), 30),
            &[(1, 0), (9, 9)],
        );
        assert!(series.observations[1].is_invalid(0));
        assert!(!series.observations[0].is_invalid(0));
    }

    #[test]
    fn test_probe_series_damped_with_depth() {
        let series = probe_series(&fixtures::PROBE_DEPTHS, 24, fixtures::reference_time(), 60);
        let surface: f64 = series.observations.iter().map(|o| (o.readings[0] - 2.0).abs()).sum();
        let deep: f64 = series.observations.iter().map(|o| (o.readings[7] - 2.0).abs()).sum();
        assert!(surface > deep);
    }
}
