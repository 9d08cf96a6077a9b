//! Hatched overlay marking invalid probe readings.
//!
//! Each invalid reading kept in the grid gets a rectangle covering its own
//! pixel plus the interpolated halo of the segments around it. The
//! rectangles are filled with a repeating 45° hatch tile on a transparent
//! surface the size of the plot, which is then blended once onto the raster.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;
use profile_common::{OverlayStyle, ProfileError, ProfileResult, Rgba};
use tiny_skia::{
    FilterQuality, LineCap, Paint, PathBuilder, Pattern, Pixmap, Rect, SpreadMode, Stroke,
    Transform,
};

use crate::mapping::InvalidSample;
use crate::paint::RasterBuffer;

/// Raster rectangle around one invalid reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRegion {
    pub x: i64,
    pub y: i64,
    pub width: usize,
    pub height: usize,
}

/// Rectangles bracketing each invalid sample and its interpolated halo.
///
/// Horizontally the rectangle spans `x - left_gap ..= x + right_gap`,
/// vertically `y - upper_gap .. y + lower_gap`, where the gaps are the
/// subdivision counts of the adjoining segments (0 at a grid edge).
pub fn invalid_regions(
    invalid: &[InvalidSample],
    d_col: &[usize],
    d_row: &[usize],
) -> Vec<InvalidRegion> {
    let before = |counts: &[usize], i: usize| {
        if i > 0 {
            counts.get(i - 1).copied().unwrap_or(0)
        } else {
            0
        }
    };
    let after = |counts: &[usize], i: usize| counts.get(i).copied().unwrap_or(0);

    invalid
        .iter()
        .map(|s| {
            let (left, right) = (before(d_col, s.col), after(d_col, s.col));
            let (upper, lower) = (before(d_row, s.row), after(d_row, s.row));
            InvalidRegion {
                x: s.x - left as i64,
                y: s.y - upper as i64,
                width: left + right + 1,
                height: upper + lower,
            }
        })
        .collect()
}

// ============================================================================
// Hatch tile
// ============================================================================

type TileKey = (u32, u32, Rgba);

/// Rendered tiles keyed by (size, stroke width bits, color).
static TILE_CACHE: Lazy<RwLock<HashMap<TileKey, Arc<Pixmap>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

fn tile_key(style: &OverlayStyle) -> TileKey {
    (style.size, style.stroke_width.to_bits(), style.color)
}

/// Render a square hatch tile: three parallel diagonal strokes that join
/// up seamlessly when the tile is repeated.
pub fn render_hatch_tile(style: &OverlayStyle) -> ProfileResult<Pixmap> {
    style.validate()?;

    let mut tile = Pixmap::new(style.size, style.size).ok_or_else(|| {
        ProfileError::invalid_parameter(
            "overlay.size",
            format!("cannot allocate {0}x{0} tile", style.size),
        )
    })?;

    let s = style.size as f32;
    let mut pb = PathBuilder::new();
    for i in 0..3 {
        let a = s / 2.0 * (i as f32 - 1.0);
        pb.move_to(a, s - 1.0 + a);
        pb.line_to(s - 1.0 + a, a);
    }

    // Degenerate 1px tiles have no drawable path; they stay transparent.
    if let Some(path) = pb.finish() {
        let Rgba { r, g, b, a } = style.color;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: style.stroke_width,
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        tile.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    Ok(tile)
}

/// Hatch tile for `style`, rendered once per distinct style and cached.
pub fn hatch_tile(style: &OverlayStyle) -> ProfileResult<Arc<Pixmap>> {
    let key = tile_key(style);

    {
        let cache = TILE_CACHE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(tile) = cache.get(&key) {
            return Ok(Arc::clone(tile));
        }
    }

    let mut cache = TILE_CACHE.write().unwrap_or_else(PoisonError::into_inner);

    // Another thread may have rendered it while we waited for the lock
    if let Some(tile) = cache.get(&key) {
        return Ok(Arc::clone(tile));
    }

    let tile = Arc::new(render_hatch_tile(style)?);
    tracing::debug!(size = style.size, stroke_width = style.stroke_width, "Rendered hatch tile");
    cache.insert(key, Arc::clone(&tile));
    Ok(tile)
}

// ============================================================================
// Overlay
// ============================================================================

/// Clip a region to a `width` × `height` surface.
fn clip(region: &InvalidRegion, width: usize, height: usize) -> Option<Rect> {
    let x0 = region.x.max(0);
    let y0 = region.y.max(0);
    let x1 = (region.x + region.width as i64).min(width as i64);
    let y1 = (region.y + region.height as i64).min(height as i64);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Rect::from_ltrb(x0 as f32, y0 as f32, x1 as f32, y1 as f32)
}

/// Fill `regions` with the hatch pattern on a transparent surface the size
/// of `buffer`, then blend that surface onto `buffer` at its origin.
///
/// Returns the number of raster pixels the overlay touched.
pub fn draw_overlay(
    buffer: &mut RasterBuffer<'_>,
    regions: &[InvalidRegion],
    style: &OverlayStyle,
) -> ProfileResult<usize> {
    let (width, height) = (buffer.width(), buffer.height());
    let rects: Vec<Rect> = regions.iter().filter_map(|r| clip(r, width, height)).collect();
    if rects.is_empty() {
        return Ok(0);
    }

    let tile = hatch_tile(style)?;
    let mut surface = Pixmap::new(width as u32, height as u32).ok_or_else(|| {
        ProfileError::invalid_parameter(
            "overlay",
            format!("cannot allocate {}x{} surface", width, height),
        )
    })?;

    let paint = Paint {
        shader: Pattern::new(
            (*tile).as_ref(),
            SpreadMode::Repeat,
            FilterQuality::Nearest,
            1.0,
            Transform::identity(),
        ),
        anti_alias: false,
        ..Paint::default()
    };
    for rect in &rects {
        surface.fill_rect(*rect, &paint, Transform::identity(), None);
    }

    let mut touched = 0;
    for (i, px) in surface.pixels().iter().enumerate() {
        if px.alpha() == 0 {
            continue;
        }
        let c = px.demultiply();
        let rgba = Rgba::new(c.red(), c.green(), c.blue(), c.alpha());
        buffer.blend_pixel(i % width, i / width, rgba);
        touched += 1;
    }

    tracing::debug!(regions = rects.len(), touched, "Composited invalid-data overlay");

    Ok(touched)
}
