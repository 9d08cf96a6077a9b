//! Writing interpolated profile grids into an RGBA raster.

use profile_common::{ColorRange, ProfileError, ProfileResult, Rgba, SampleGrid};

use crate::gradient::encode;
use crate::mapping::{PixelRect, Placement};

/// Mutable view of one rectangular region of a caller-owned RGBA surface.
///
/// The surface is row-major with 4 bytes per pixel (straight alpha).
/// Coordinates passed to the view are relative to the region's top-left
/// corner; nothing outside the region is ever written.
#[derive(Debug)]
pub struct RasterBuffer<'a> {
    data: &'a mut [u8],
    stride: usize,
    region: PixelRect,
}

impl<'a> RasterBuffer<'a> {
    /// View `region` of a surface `surface_width` pixels wide.
    pub fn new(data: &'a mut [u8], surface_width: usize, region: PixelRect) -> ProfileResult<Self> {
        if region.left < 0 || region.top < 0 {
            return Err(ProfileError::invalid_parameter(
                "region",
                format!("origin ({}, {}) lies outside the surface", region.left, region.top),
            ));
        }
        let (left, top) = (region.left as usize, region.top as usize);
        if left + region.width > surface_width {
            return Err(ProfileError::invalid_parameter(
                "region",
                format!(
                    "columns {}..{} exceed surface width {}",
                    left,
                    left + region.width,
                    surface_width
                ),
            ));
        }

        let required = if region.width == 0 || region.height == 0 {
            0
        } else {
            ((top + region.height - 1) * surface_width + left + region.width) * 4
        };
        if data.len() < required {
            return Err(ProfileError::BufferTooSmall {
                required,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            stride: surface_width,
            region,
        })
    }

    /// View covering a whole `width` × `height` surface.
    pub fn full(data: &'a mut [u8], width: usize, height: usize) -> ProfileResult<Self> {
        Self::new(data, width, PixelRect::new(0, 0, width, height))
    }

    pub fn width(&self) -> usize {
        self.region.width
    }

    pub fn height(&self) -> usize {
        self.region.height
    }

    pub fn region(&self) -> PixelRect {
        self.region
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        ((self.region.top as usize + y) * self.stride + self.region.left as usize + x) * 4
    }

    /// RGBA bytes at region coordinates, `None` outside the region.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let i = self.offset(x, y);
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[i..i + 4]);
        Some(px)
    }

    /// Overwrite one pixel; coordinates outside the region are ignored.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Source-over blend of a straight-alpha color onto one pixel.
    pub fn blend_pixel(&mut self, x: usize, y: usize, src: Rgba) {
        if src.a == 0 || x >= self.width() || y >= self.height() {
            return;
        }
        let i = self.offset(x, y);
        let dst = &mut self.data[i..i + 4];

        let sa = src.a as f32 / 255.0;
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let blend = |s: u8, d: u8| {
            let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };

        dst[0] = blend(src.r, dst[0]);
        dst[1] = blend(src.g, dst[1]);
        dst[2] = blend(src.b, dst[2]);
        dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    /// Fill the whole region with one color.
    pub fn fill(&mut self, color: Rgba) {
        let rgba = [color.r, color.g, color.b, color.a];
        for y in 0..self.height() {
            let start = self.offset(0, y);
            let end = start + self.width() * 4;
            for px in self.data[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }
}

/// Paint an interpolated grid onto the raster.
///
/// Grid cell `(row, col)` lands on raster pixel
/// `(placement.start_x + col, placement.start_y + row)`. Absent cells are
/// skipped so the existing background shows through; present cells are
/// written as opaque ramp colors. Cells falling outside the region are
/// clipped. Returns the number of pixels written.
pub fn paint(
    buffer: &mut RasterBuffer<'_>,
    grid: &SampleGrid,
    placement: &Placement,
    range: &ColorRange,
) -> usize {
    let width = buffer.width() as i64;
    let height = buffer.height() as i64;
    let start_x = placement.start_x;
    let mut written = 0;

    let x_begin = (-placement.offset_x).max(-start_x).max(0);

    for (gy, row) in grid.rows().iter().enumerate() {
        let y = placement.start_y + gy as i64;
        if y < 0 {
            continue;
        }
        if y >= height {
            break;
        }

        let x_end = (row.len() as i64).min(width - start_x);
        for gx in x_begin..x_end {
            if let Some(value) = row[gx as usize] {
                let rgba = encode(value, range).to_rgba_bytes();
                buffer.put_pixel((start_x + gx) as usize, y as usize, rgba);
                written += 1;
            }
        }
    }

    tracing::debug!(
        rows = grid.row_count(),
        cols = grid.col_count(),
        written,
        "Painted profile grid"
    );

    written
}
