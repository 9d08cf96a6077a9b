//! Error types for temperature profile rendering.

use thiserror::Error;

/// Result type alias using ProfileError.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Grid axis named in dimension errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Primary error type for profile rendering operations.
///
/// Every variant is a precondition failure: the rendering pass is pure and
/// idempotent, so there is nothing to retry. Absent cells are never errors.
#[derive(Debug, Error)]
pub enum ProfileError {
    // === Grid Errors ===
    #[error("Subdivision count mismatch on {axis} axis: expected {expected} gaps, got {actual}")]
    DimensionMismatch {
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    #[error("Ragged grid: row {row} has {actual} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },

    // === Color Errors ===
    #[error("Degenerate color range: min {min} must be below max {max}")]
    RangeDegenerate { min: f64, max: f64 },

    // === Data Errors ===
    #[error("Inconsistent observation at index {index}: {message}")]
    InconsistentObservation { index: usize, message: String },

    // === Raster Errors ===
    #[error("Raster buffer too small: need {required} bytes, got {actual}")]
    BufferTooSmall { required: usize, actual: usize },

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Output Errors ===
    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProfileError {
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        ProfileError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ProfileError {
    fn from(err: std::io::Error) -> Self {
        ProfileError::Encode(err.to_string())
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        ProfileError::Config(format!("JSON error: {}", err))
    }
}
