//! Frost-probe temperature profile renderer.
//!
//! Reads probe observations (JSON) and an optional chart file (YAML),
//! draws the temperature profile with bilinear gap filling and the
//! thermal color ramp, and writes the chart as a PNG.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use profile_render::{load_chart_file, load_series, profile_chart, ChartFile, TimeWindow};

#[derive(Parser, Debug)]
#[command(name = "profile-render")]
#[command(about = "Render a frost-probe temperature profile chart to PNG")]
struct Args {
    /// Probe data file (JSON)
    input: PathBuf,

    /// Chart configuration file (YAML)
    #[arg(short, long, env = "PROFILE_CHART_CONFIG")]
    config: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "profile.png")]
    output: PathBuf,

    /// Chart width in CSS pixels
    #[arg(long)]
    width: Option<u32>,

    /// Chart height in CSS pixels
    #[arg(long)]
    height: Option<u32>,

    /// Device pixels per CSS pixel
    #[arg(long, env = "PIXEL_RATIO")]
    pixel_ratio: Option<f64>,

    /// Start of the visible window (RFC 3339), defaults to the first observation
    #[arg(long)]
    from: Option<DateTime<Utc>>,

    /// End of the visible window (RFC 3339), defaults to the last observation
    #[arg(long)]
    to: Option<DateTime<Utc>>,

    /// Temperature mapped to the cold end of the ramp
    #[arg(long, env = "PROFILE_MIN_RANGE", allow_hyphen_values = true)]
    min_range: Option<f64>,

    /// Temperature mapped to the warm end of the ramp
    #[arg(long, env = "PROFILE_MAX_RANGE", allow_hyphen_values = true)]
    max_range: Option<f64>,

    /// Keep invalid readings and hatch them
    #[arg(long, env = "PROFILE_SHOW_INVALID_DATA")]
    show_invalid_data: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    /// Apply command-line overrides on top of the chart file.
    fn apply_overrides(&self, file: &mut ChartFile) {
        if let Some(width) = self.width {
            file.chart.width = width;
        }
        if let Some(height) = self.height {
            file.chart.height = height;
        }
        if let Some(ratio) = self.pixel_ratio {
            file.chart.pixel_ratio = ratio;
        }
        if let Some(min) = self.min_range {
            file.profile.min_range = min;
        }
        if let Some(max) = self.max_range {
            file.profile.max_range = max;
        }
        if self.show_invalid_data {
            file.profile.show_invalid_data = true;
        }
    }
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);
    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    info!("Starting profile renderer");

    let mut file = match &args.config {
        Some(path) => load_chart_file(path)?,
        None => ChartFile::default(),
    };
    args.apply_overrides(&mut file);
    file.validate()?;

    let series = load_series(&args.input)?;
    let window = TimeWindow::resolve(&series, args.from, args.to)?;
    info!(
        from = %window.from.to_rfc3339(),
        to = %window.to.to_rfc3339(),
        "Resolved time window"
    );

    let rendered = profile_chart(&file, series, window)?.render()?;
    let png = rendered.to_png()?;
    std::fs::write(&args.output, &png)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!(
        path = %args.output.display(),
        width = rendered.width,
        height = rendered.height,
        bytes = png.len(),
        "Wrote profile chart"
    );
    Ok(())
}
