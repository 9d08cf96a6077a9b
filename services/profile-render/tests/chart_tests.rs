//! Tests for loading probe data and rendering profile charts.

use chrono::{DateTime, Duration, Utc};
use profile_common::{ObservationSeries, ProfileConfig, Rgba};
use profile_render::config::{FrameStyle, Margin};
use profile_render::{
    load_chart_file, load_series, parse_probe_json, profile_chart, Chart, ChartFile, ChartLayout,
    DrawOrder, FrameLayer, ProfileLayer, TimeWindow,
};
use test_utils::{fixtures, uniform_series};

const BACKGROUND: Rgba = Rgba::opaque(200, 200, 200);
const FRAME: [u8; 4] = [0, 0, 0, 255];

fn t(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

/// 40 × 20 chart with a 30 × 10 plot area at (5, 5).
fn layout() -> ChartLayout {
    ChartLayout {
        width: 40,
        height: 20,
        pixel_ratio: 1.0,
        margin: Margin {
            top: 5.0,
            right: 5.0,
            bottom: 5.0,
            left: 5.0,
        },
        background: BACKGROUND,
        frame: FrameStyle::default(),
    }
}

fn series() -> ObservationSeries {
    uniform_series(&[0.0, 1.0], 4, fixtures::reference_time(), 60)
}

fn config() -> ProfileConfig {
    ProfileConfig {
        min_range: 0.0,
        max_range: 40.0,
        ..ProfileConfig::default()
    }
}

fn window(series: &ObservationSeries) -> TimeWindow {
    TimeWindow::resolve(series, None, None).unwrap()
}

fn pixel(pixels: &[u8], width: usize, x: usize, y: usize) -> [u8; 4] {
    let i = (y * width + x) * 4;
    [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
}

// ============================================================================
// Probe data
// ============================================================================

#[test]
fn test_confidence_marks_invalid_readings() {
    let json = r#"{
        "depths": [0.0, 0.5],
        "records": [
            { "timestamp": "2023-01-10T00:00:00Z", "readings": [1.0, 2.0], "confidence": [1, -1] },
            { "timestamp": "2023-01-10T01:00:00Z", "readings": [3.0, 4.0] }
        ]
    }"#;
    let series = parse_probe_json(json).unwrap();
    assert_eq!(series.len(), 2);
    assert!(!series.observations[0].is_invalid(0));
    assert!(series.observations[0].is_invalid(1));
    assert!(!series.observations[1].is_invalid(1));
}

#[test]
fn test_reading_count_mismatch_is_rejected() {
    let json = r#"{
        "depths": [0.0, 0.5],
        "records": [{ "timestamp": "2023-01-10T00:00:00Z", "readings": [1.0] }]
    }"#;
    assert!(parse_probe_json(json).is_err());
}

#[test]
fn test_load_series_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("probe.json");
    std::fs::write(
        &path,
        r#"{
            "depths": [0.0],
            "records": [{ "timestamp": "2023-01-10T00:00:00Z", "readings": [1.5] }]
        }"#,
    )
    .unwrap();
    let series = load_series(&path).unwrap();
    assert_eq!(series.observations[0].readings, vec![1.5]);
    assert!(load_series(&dir.path().join("missing.json")).is_err());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_load_chart_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.yaml");
    std::fs::write(
        &path,
        "profile:\n  min_range: -5\n  max_range: 5\n  show_invalid_data: true\n\
         chart:\n  width: 640\n  background: \"#102030\"\n  frame: { width: 2 }\n",
    )
    .unwrap();

    let file = load_chart_file(&path).unwrap();
    assert_eq!(file.profile.min_range, -5.0);
    assert!(file.profile.show_invalid_data);
    assert_eq!(file.chart.width, 640);
    assert_eq!(file.chart.background, Rgba::opaque(0x10, 0x20, 0x30));
    assert_eq!(file.chart.frame.width, 2);
    assert_eq!(file.chart.frame.color, Rgba::BLACK);
    assert!(file.validate().is_ok());
}

#[test]
fn test_degenerate_range_fails_validation() {
    let file = ChartFile {
        profile: ProfileConfig {
            min_range: 1.0,
            max_range: 1.0,
            ..ProfileConfig::default()
        },
        ..ChartFile::default()
    };
    assert!(file.validate().is_err());
}

// ============================================================================
// Time window
// ============================================================================

#[test]
fn test_window_defaults_to_series_bounds() {
    let w = window(&series());
    assert_eq!(w.from, fixtures::reference_time());
    assert_eq!(w.to, fixtures::reference_time() + Duration::hours(3));
}

#[test]
fn test_window_overrides() {
    let from = t("2023-01-10T01:00:00Z");
    let w = TimeWindow::resolve(&series(), Some(from), None).unwrap();
    assert_eq!(w.from, from);
    assert_eq!(w.to, fixtures::reference_time() + Duration::hours(3));
}

#[test]
fn test_single_observation_window_is_padded() {
    let single = uniform_series(&[0.0], 1, fixtures::reference_time(), 60);
    let w = window(&single);
    assert_eq!(w.to - w.from, Duration::hours(2));
}

#[test]
fn test_empty_series_needs_explicit_window() {
    let empty = ObservationSeries::new(vec![0.0], Vec::new());
    assert!(TimeWindow::resolve(&empty, None, None).is_err());
    let w = TimeWindow::resolve(
        &empty,
        Some(t("2023-01-10T00:00:00Z")),
        Some(t("2023-01-11T00:00:00Z")),
    );
    assert!(w.is_ok());
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_profile_chart_layout() {
    let series = series();
    let file = ChartFile {
        profile: config(),
        chart: layout(),
    };
    let chart = profile_chart(&file, series.clone(), window(&series)).unwrap();
    let rendered = chart.render().unwrap();

    assert_eq!((rendered.width, rendered.height), (40, 20));
    assert_eq!(rendered.pixels.len(), 40 * 20 * 4);

    let bg = [BACKGROUND.r, BACKGROUND.g, BACKGROUND.b, BACKGROUND.a];
    // Margins keep the background
    assert_eq!(pixel(&rendered.pixels, 40, 0, 0), bg);
    assert_eq!(pixel(&rendered.pixels, 40, 39, 19), bg);
    // Frame runs along the plot edges
    assert_eq!(pixel(&rendered.pixels, 40, 5, 5), FRAME);
    assert_eq!(pixel(&rendered.pixels, 40, 34, 14), FRAME);
    // Interior shows the profile
    let inside = pixel(&rendered.pixels, 40, 12, 9);
    assert_ne!(inside, bg);
    assert_ne!(inside, FRAME);
}

#[test]
fn test_frame_draws_over_profile_regardless_of_insertion() {
    let series = series();
    let chart = Chart::new(layout(), window(&series), (0.0, 1.0))
        .with_layer(FrameLayer::new(FrameStyle::default()))
        .with_layer(ProfileLayer::new(series.clone(), config()));
    let rendered = chart.render().unwrap();
    assert_eq!(pixel(&rendered.pixels, 40, 5, 5), FRAME);
}

#[test]
fn test_bottom_layers_keep_insertion_order() {
    let series = series();
    let chart = Chart::new(layout(), window(&series), (0.0, 1.0))
        .with_layer(FrameLayer::new(FrameStyle::default()).with_order(DrawOrder::Bottom))
        .with_layer(ProfileLayer::new(series.clone(), config()));
    let rendered = chart.render().unwrap();
    // The profile is drawn second and covers the frame corner
    assert_ne!(pixel(&rendered.pixels, 40, 5, 5), FRAME);
}

#[test]
fn test_pixel_ratio_scales_surface() {
    let series = series();
    let file = ChartFile {
        profile: config(),
        chart: ChartLayout {
            pixel_ratio: 2.0,
            ..layout()
        },
    };
    let rendered = profile_chart(&file, series.clone(), window(&series))
        .unwrap()
        .render()
        .unwrap();
    assert_eq!((rendered.width, rendered.height), (80, 40));
    assert_eq!(pixel(&rendered.pixels, 80, 10, 10), FRAME);
    assert_eq!(pixel(&rendered.pixels, 80, 9, 9), [200, 200, 200, 255]);
}

#[test]
fn test_invalid_data_overlay_renders() {
    let series = test_utils::with_invalid(series(), &[(1, 0)]);
    let file = ChartFile {
        profile: ProfileConfig {
            show_invalid_data: true,
            ..config()
        },
        chart: layout(),
    };
    let plain = ChartFile {
        profile: config(),
        chart: layout(),
    };
    let hatched = profile_chart(&file, series.clone(), window(&series)).unwrap().render().unwrap();
    let hidden = profile_chart(&plain, series.clone(), window(&series)).unwrap().render().unwrap();
    assert_ne!(hatched.pixels, hidden.pixels);
}

#[test]
fn test_png_output() {
    let series = series();
    let file = ChartFile {
        profile: config(),
        chart: layout(),
    };
    let png = profile_chart(&file, series.clone(), window(&series))
        .unwrap()
        .render()
        .unwrap()
        .to_png()
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.png");
    std::fs::write(&path, &png).unwrap();
    let written = std::fs::read(&path).unwrap();
    assert_eq!(&written[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    // IHDR width and height
    assert_eq!(&written[16..24], &[0, 0, 0, 40, 0, 0, 0, 20]);
}
