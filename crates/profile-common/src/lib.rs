//! Common types and utilities shared across the temperature profile crates.

pub mod error;
pub mod grid;
pub mod observation;
pub mod style;

pub use error::{ProfileError, ProfileResult};
pub use grid::SampleGrid;
pub use observation::{Observation, ObservationSeries};
pub use style::{ColorRange, OverlayStyle, ProfileConfig, Rgba};
