//! Common test fixtures for profile rendering tests.
//!
//! This module provides pre-defined grids and probe layouts that represent
//! common scenarios in frost-probe rendering.

use chrono::{DateTime, TimeZone, Utc};

/// The 3×4 reference grid used by the interpolation tests.
pub fn reference_grid() -> Vec<Vec<f64>> {
    vec![
        vec![1.0, 2.0, 3.0, 4.0],
        vec![1.0, 2.0, 4.0, 8.0],
        vec![1.0, 3.0, 9.0, 27.0],
    ]
}

/// Reference grid with the third column absent in the lower two rows.
pub fn reference_grid_null_column() -> Vec<Vec<Option<f64>>> {
    vec![
        vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
        vec![Some(1.0), Some(2.0), None, Some(8.0)],
        vec![Some(1.0), Some(3.0), None, Some(27.0)],
    ]
}

/// Reference grid with the middle row absent in its last two columns.
pub fn reference_grid_null_row() -> Vec<Vec<Option<f64>>> {
    vec![
        vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
        vec![Some(1.0), Some(2.0), None, None],
        vec![Some(1.0), Some(3.0), Some(9.0), Some(27.0)],
    ]
}

/// Thermistor depths in metres of a typical road-weather frost probe.
pub const PROBE_DEPTHS: [f64; 8] = [0.0, 0.05, 0.1, 0.2, 0.3, 0.5, 0.75, 1.0];

/// A fixed reference time for tests (2023-01-10T00:00:00Z).
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 10, 0, 0, 0)
        .single()
        .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH)
}
