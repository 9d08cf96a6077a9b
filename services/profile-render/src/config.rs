//! Chart configuration loading.
//!
//! A chart file is YAML with two optional sections:
//!
//! ```yaml
//! profile:
//!   min_range: -10
//!   max_range: 10
//!   show_invalid_data: true
//!   overlay: { size: 8, stroke_width: 2.0, color: "#ffffff" }
//! chart:
//!   width: 900
//!   height: 360
//!   pixel_ratio: 2
//!   margin: { top: 10, right: 10, bottom: 30, left: 50 }
//!   background: "#f4f4f4"
//!   frame: { color: "#333333", width: 1 }
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use profile_common::{ProfileConfig, Rgba};
use serde::Deserialize;
use tracing::{debug, info};

/// Root configuration loaded from a chart YAML file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartFile {
    pub profile: ProfileConfig,
    pub chart: ChartLayout,
}

/// Surface size and plot-area placement, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    /// Device pixels per CSS pixel.
    pub pixel_ratio: f64,
    pub margin: Margin,
    pub background: Rgba,
    pub frame: FrameStyle,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            pixel_ratio: 1.0,
            margin: Margin::default(),
            background: Rgba::WHITE,
            frame: FrameStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 10.0,
            bottom: 30.0,
            left: 50.0,
        }
    }
}

/// Outline drawn around the plot area. A width of 0 disables it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrameStyle {
    pub color: Rgba,
    pub width: u32,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            width: 1,
        }
    }
}

impl ChartLayout {
    /// Plot width and height in CSS pixels.
    pub fn plot_size(&self) -> (f64, f64) {
        (
            self.width as f64 - self.margin.left - self.margin.right,
            self.height as f64 - self.margin.top - self.margin.bottom,
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("chart size {}x{} is empty", self.width, self.height);
        }
        if !(self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0) {
            bail!("pixel_ratio must be positive, got {}", self.pixel_ratio);
        }
        let m = &self.margin;
        if [m.top, m.right, m.bottom, m.left].iter().any(|v| !v.is_finite() || *v < 0.0) {
            bail!("margins must be non-negative");
        }
        let (w, h) = self.plot_size();
        if w <= 0.0 || h <= 0.0 {
            bail!(
                "margins leave no plot area on a {}x{} chart",
                self.width,
                self.height
            );
        }
        Ok(())
    }
}

impl ChartFile {
    pub fn validate(&self) -> Result<()> {
        self.profile.validate().context("invalid profile section")?;
        self.chart.validate().context("invalid chart section")
    }
}

/// Load a chart file.
pub fn load_chart_file(path: &Path) -> Result<ChartFile> {
    debug!(path = %path.display(), "Loading chart configuration");

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read chart config {}", path.display()))?;
    let file: ChartFile = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse chart config {}", path.display()))?;

    info!(
        path = %path.display(),
        width = file.chart.width,
        height = file.chart.height,
        show_invalid_data = file.profile.show_invalid_data,
        "Loaded chart configuration"
    );
    Ok(file)
}
