//! Frost-probe temperature profile charts.
//!
//! Loads probe data and a chart configuration, draws the profile layer and
//! its frame onto an RGBA surface and encodes it as PNG.

pub mod chart;
pub mod config;
pub mod input;

pub use chart::{
    profile_chart, Chart, ChartLayer, DrawOrder, FrameLayer, ProfileLayer, RenderedChart,
    TimeWindow,
};
pub use config::{load_chart_file, ChartFile, ChartLayout};
pub use input::{load_series, parse_probe_json};
