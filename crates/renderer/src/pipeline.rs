//! One redraw of the temperature profile layer.

use profile_common::{ObservationSeries, ProfileConfig, ProfileResult};

use crate::interpolate::interpolate_from;
use crate::mapping::{PixelMapper, PixelScale, Placement};
use crate::overlay::{draw_overlay, invalid_regions};
use crate::paint::{paint, RasterBuffer};

/// What a redraw produced, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub sample_rows: usize,
    pub sample_cols: usize,
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub painted: usize,
    pub invalid_samples: usize,
    pub overlay_pixels: usize,
}

/// Map, interpolate and paint `series` into `buffer`, then hatch invalid
/// readings when `config.show_invalid_data` is set.
///
/// Everything is recomputed from the inputs; nothing is retained between
/// calls except the cached hatch tile.
pub fn render_profile<T, D>(
    buffer: &mut RasterBuffer<'_>,
    series: &ObservationSeries,
    mapper: &PixelMapper<T, D>,
    config: &ProfileConfig,
) -> ProfileResult<RenderSummary>
where
    T: PixelScale,
    D: PixelScale,
{
    let range = config.color_range()?;
    if config.show_invalid_data {
        config.overlay.validate()?;
    }

    let mapped = mapper.map(series, config.show_invalid_data)?;

    // Grid columns left of the plot are never painted, so don't build them
    let skip_cols = (-mapped.placement.offset_x).max(0) as usize;
    let grid = interpolate_from(&mapped.grid, &mapped.d_col, &mapped.d_row, skip_cols)?;
    let placement = Placement {
        start_x: mapped.placement.start_x + skip_cols as i64,
        offset_x: 0,
        ..mapped.placement
    };
    let painted = paint(buffer, &grid, &placement, &range);

    let mut summary = RenderSummary {
        sample_rows: mapped.grid.row_count(),
        sample_cols: mapped.grid.col_count(),
        grid_rows: grid.row_count(),
        grid_cols: grid.col_count(),
        painted,
        invalid_samples: mapped.invalid.len(),
        overlay_pixels: 0,
    };

    if config.show_invalid_data && !mapped.invalid.is_empty() {
        let regions = invalid_regions(&mapped.invalid, &mapped.d_col, &mapped.d_row);
        summary.overlay_pixels = draw_overlay(buffer, &regions, &config.overlay)?;
    }

    if summary.sample_cols == 0 {
        tracing::warn!(
            observations = series.len(),
            "Nothing to draw: no observations in the visible window"
        );
    }
    tracing::debug!(
        grid_rows = summary.grid_rows,
        grid_cols = summary.grid_cols,
        skipped_cols = skip_cols,
        painted = summary.painted,
        overlay_pixels = summary.overlay_pixels,
        "Rendered temperature profile"
    );

    Ok(summary)
}
