//! Tests for the shared data model: observations, colors and configuration.

use chrono::{Duration, TimeZone, Utc};
use profile_common::{
    ColorRange, Observation, ObservationSeries, OverlayStyle, ProfileConfig, ProfileError, Rgba,
};

// ============================================================================
// Observation tests
// ============================================================================

#[test]
fn test_from_confidence_marks_negative_levels_invalid() {
    let t = Utc.with_ymd_and_hms(2023, 1, 10, 0, 0, 0).unwrap();
    let obs = Observation::from_confidence(t, vec![1.0, 2.0, 3.0], &[1.0, -1.0, 0.0]);
    assert_eq!(obs.invalid, vec![false, true, false]);
    assert!(obs.is_invalid(1));
    assert!(!obs.is_invalid(7));
}

#[test]
fn test_time_value_is_epoch_millis() {
    let t = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 1).unwrap();
    let obs = Observation::valid(t, vec![0.0]);
    assert_eq!(obs.time_value(), 1000.0);
}

#[test]
fn test_series_validate_accepts_consistent_data() {
    let t0 = Utc.with_ymd_and_hms(2023, 1, 10, 0, 0, 0).unwrap();
    let series = ObservationSeries::new(
        vec![0.0, 0.5],
        vec![
            Observation::valid(t0, vec![1.0, 2.0]),
            Observation::valid(t0 + Duration::hours(1), vec![1.5, 2.5]),
        ],
    );
    assert!(series.validate().is_ok());
    assert_eq!(series.time_bounds(), Some((t0, t0 + Duration::hours(1))));
    assert_eq!(series.depth_bounds(), Some((0.0, 0.5)));
}

#[test]
fn test_series_validate_rejects_reading_count_mismatch() {
    let t0 = Utc.with_ymd_and_hms(2023, 1, 10, 0, 0, 0).unwrap();
    let series = ObservationSeries::new(
        vec![0.0, 0.5],
        vec![
            Observation::valid(t0, vec![1.0, 2.0]),
            Observation::valid(t0 + Duration::hours(1), vec![1.5]),
        ],
    );
    let err = series.validate().unwrap_err();
    assert!(matches!(err, ProfileError::InconsistentObservation { index: 1, .. }));
}

#[test]
fn test_series_validate_rejects_unordered_depths() {
    let t0 = Utc.with_ymd_and_hms(2023, 1, 10, 0, 0, 0).unwrap();
    let reversed = ObservationSeries::new(
        vec![0.5, 0.0],
        vec![Observation::valid(t0, vec![1.0, 2.0])],
    );
    let err = reversed.validate().unwrap_err();
    assert!(matches!(err, ProfileError::InvalidParameter { ref param, .. } if param == "depths"));

    let repeated = ObservationSeries::new(vec![0.0, 0.2, 0.2], Vec::new());
    assert!(repeated.validate().is_err());
}

#[test]
fn test_series_validate_rejects_unordered_timestamps() {
    let t0 = Utc.with_ymd_and_hms(2023, 1, 10, 0, 0, 0).unwrap();
    let series = ObservationSeries::new(
        vec![0.0],
        vec![
            Observation::valid(t0, vec![1.0]),
            Observation::valid(t0 - Duration::hours(1), vec![1.5]),
        ],
    );
    assert!(series.validate().is_err());
}

#[test]
fn test_series_json_roundtrip_shape() {
    let json = r#"{
        "depths": [0.0, 0.25],
        "observations": [
            {"timestamp": "2023-01-10T00:00:00Z", "readings": [1.0, -2.0], "invalid": [false, true]}
        ]
    }"#;
    let series: ObservationSeries = serde_json::from_str(json).unwrap();
    assert_eq!(series.len(), 1);
    assert!(series.observations[0].is_invalid(1));
}

// ============================================================================
// Color tests
// ============================================================================

#[test]
fn test_hex_parsing() {
    assert_eq!(Rgba::from_hex("#ffffff").unwrap(), Rgba::WHITE);
    assert_eq!(Rgba::from_hex("ff000080").unwrap(), Rgba::new(255, 0, 0, 128));
    assert!(Rgba::from_hex("#fff").is_err());
    assert!(Rgba::from_hex("#gggggg").is_err());
    assert_eq!(Rgba::new(1, 2, 3, 255).to_hex(), "#010203");
}

#[test]
fn test_color_range_rejects_degenerate_bounds() {
    assert!(matches!(
        ColorRange::new(1.0, 1.0),
        Err(ProfileError::RangeDegenerate { .. })
    ));
    assert!(ColorRange::new(2.0, 1.0).is_err());
    assert!(ColorRange::new(f64::NAN, 1.0).is_err());
    assert!(ColorRange::new(-1.0, 1.0).is_ok());
}

#[test]
fn test_color_range_normalize_clamps() {
    let range = ColorRange::new(-10.0, 10.0).unwrap();
    assert_eq!(range.normalize(0.0), 0.5);
    assert_eq!(range.normalize(-50.0), 0.0);
    assert_eq!(range.normalize(50.0), 1.0);
}

// ============================================================================
// Configuration tests
// ============================================================================

#[test]
fn test_config_defaults() {
    let config = ProfileConfig::default();
    assert_eq!(config.min_range, -1.0);
    assert_eq!(config.max_range, 1.0);
    assert!(!config.show_invalid_data);
    assert_eq!(config.overlay, OverlayStyle::default());
    assert_eq!(config.overlay.size, 8);
    assert_eq!(config.overlay.stroke_width, 2.0);
    assert_eq!(config.overlay.color, Rgba::WHITE);
}

#[test]
fn test_config_from_yaml_partial() {
    let yaml = "min_range: -5\nmax_range: 5\nshow_invalid_data: true\n\
                overlay:\n  color: '#00000080'\n";
    let config: ProfileConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.min_range, -5.0);
    assert!(config.show_invalid_data);
    assert_eq!(config.overlay.size, 8);
    assert_eq!(config.overlay.color, Rgba::new(0, 0, 0, 128));
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validate_rejects_bad_overlay() {
    let mut config = ProfileConfig::default();
    config.overlay.size = 0;
    assert!(matches!(
        config.validate(),
        Err(ProfileError::InvalidParameter { .. })
    ));

    let mut config = ProfileConfig::default();
    config.max_range = config.min_range;
    assert!(matches!(
        config.validate(),
        Err(ProfileError::RangeDegenerate { .. })
    ));
}
