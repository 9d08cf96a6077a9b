//! Mapping of probe observations onto raster pixels.
//!
//! Converts an observation series plus the chart's value↔pixel scales into
//! the sparse sample grid, the per-axis subdivision counts that fill the
//! pixel gaps between samples, the raster placement of the grid, and the
//! raster positions of invalid readings.

use profile_common::{ObservationSeries, Observation, ProfileError, ProfileResult, SampleGrid};

/// Monotonic value→pixel mapping supplied by the host chart.
///
/// Pixels are CSS pixels; the mapper applies the device pixel ratio.
pub trait PixelScale {
    fn pixel_for_value(&self, value: f64) -> f64;

    /// Lowest visible domain value.
    fn min(&self) -> f64;

    /// Highest visible domain value.
    fn max(&self) -> f64;
}

impl<S: PixelScale + ?Sized> PixelScale for &S {
    fn pixel_for_value(&self, value: f64) -> f64 {
        (**self).pixel_for_value(value)
    }

    fn min(&self) -> f64 {
        (**self).min()
    }

    fn max(&self) -> f64 {
        (**self).max()
    }
}

/// Linear scale from a value domain onto a pixel span.
///
/// The pixel span may be inverted (`pixel_start > pixel_end`), e.g. for a
/// depth axis growing downwards from a chart whose values grow upwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_min: f64,
        domain_max: f64,
        pixel_start: f64,
        pixel_end: f64,
    ) -> ProfileResult<Self> {
        if !(domain_min.is_finite() && domain_max.is_finite()) || domain_min >= domain_max {
            return Err(ProfileError::invalid_parameter(
                "scale.domain",
                format!("domain [{}, {}] is empty", domain_min, domain_max),
            ));
        }
        if !(pixel_start.is_finite() && pixel_end.is_finite()) {
            return Err(ProfileError::invalid_parameter(
                "scale.pixels",
                "pixel span must be finite",
            ));
        }
        Ok(Self {
            domain_min,
            domain_max,
            pixel_start,
            pixel_end,
        })
    }
}

impl PixelScale for LinearScale {
    fn pixel_for_value(&self, value: f64) -> f64 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.pixel_start + t * (self.pixel_end - self.pixel_start)
    }

    fn min(&self) -> f64 {
        self.domain_min
    }

    fn max(&self) -> f64 {
        self.domain_max
    }
}

/// Plot area of the chart in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Device-pixel rectangle for the given pixel ratio, each edge rounded.
    pub fn to_device(&self, pixel_ratio: f64) -> ProfileResult<PixelRect> {
        check_pixel_ratio(pixel_ratio)?;
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ProfileError::invalid_parameter(
                "plot_area",
                format!("negative size {}x{}", self.width, self.height),
            ));
        }
        Ok(PixelRect {
            left: (self.left * pixel_ratio).round() as i64,
            top: (self.top * pixel_ratio).round() as i64,
            width: (self.width * pixel_ratio).round() as usize,
            height: (self.height * pixel_ratio).round() as usize,
        })
    }
}

/// Rectangle in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub left: i64,
    pub top: i64,
    pub width: usize,
    pub height: usize,
}

impl PixelRect {
    pub fn new(left: i64, top: i64, width: usize, height: usize) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

fn check_pixel_ratio(pixel_ratio: f64) -> ProfileResult<()> {
    if !(pixel_ratio.is_finite() && pixel_ratio > 0.0) {
        return Err(ProfileError::invalid_parameter(
            "pixel_ratio",
            format!("must be positive, got {}", pixel_ratio),
        ));
    }
    Ok(())
}

/// Where the interpolated grid lands on the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    /// Raster column of grid column 0. Negative when a left-context
    /// observation lies outside the plot.
    pub start_x: i64,
    /// Raster row of the topmost depth level.
    pub start_y: i64,
    /// `min(start_x, 0)`: grid columns before `-offset_x` are off-raster.
    pub offset_x: i64,
}

/// An invalid reading kept in the grid for overlay marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSample {
    /// Raster column of the observation.
    pub x: i64,
    /// Raster row of the depth level.
    pub y: i64,
    /// Grid column of the observation.
    pub col: usize,
    /// Grid row (depth level index).
    pub row: usize,
}

/// Result of mapping a series onto the raster.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedSamples {
    pub grid: SampleGrid,
    /// Interpolated columns between consecutive grid columns.
    pub d_col: Vec<usize>,
    /// Interpolated rows between consecutive depth levels.
    pub d_row: Vec<usize>,
    pub placement: Placement,
    pub invalid: Vec<InvalidSample>,
}

/// Number of pixels strictly between two sample positions.
#[inline]
fn pixel_gap(from: i64, to: i64) -> usize {
    (to - from - 1).max(0) as usize
}

/// Maps observation series through the chart scales onto a plot raster.
#[derive(Debug, Clone, Copy)]
pub struct PixelMapper<T, D> {
    time_scale: T,
    depth_scale: D,
    plot: PixelRect,
    pixel_ratio: f64,
}

impl<T: PixelScale, D: PixelScale> PixelMapper<T, D> {
    /// `plot` is the plot area in device pixels, as from [`PlotArea::to_device`].
    pub fn new(
        time_scale: T,
        depth_scale: D,
        plot: PixelRect,
        pixel_ratio: f64,
    ) -> ProfileResult<Self> {
        check_pixel_ratio(pixel_ratio)?;
        Ok(Self {
            time_scale,
            depth_scale,
            plot,
            pixel_ratio,
        })
    }

    /// Raster column of a time value.
    pub fn column_for(&self, time_value: f64) -> i64 {
        let x = self.time_scale.pixel_for_value(time_value) * self.pixel_ratio;
        (x - self.plot.left as f64).round() as i64
    }

    /// Raster row of a depth.
    pub fn row_for(&self, depth: f64) -> i64 {
        let y = self.depth_scale.pixel_for_value(depth) * self.pixel_ratio;
        (y - self.plot.top as f64).round() as i64
    }

    /// Build the sparse grid for the visible part of `series`.
    ///
    /// Observations before the visible time window are skipped and the walk
    /// stops at the first observation past its end. When the first visible
    /// observation sits strictly right of the raster's left edge, the one
    /// before it is prepended so the leading segment interpolates from real
    /// data.
    ///
    /// Invalid readings become absent cells unless `show_invalid_data` is
    /// set, in which case they keep their value and are listed in
    /// `MappedSamples::invalid`.
    pub fn map(
        &self,
        series: &ObservationSeries,
        show_invalid_data: bool,
    ) -> ProfileResult<MappedSamples> {
        series.validate()?;

        let ys: Vec<i64> = series.depths.iter().map(|&d| self.row_for(d)).collect();
        let d_row: Vec<usize> = ys.windows(2).map(|w| pixel_gap(w[0], w[1])).collect();

        let mut mapped = MappedSamples {
            grid: SampleGrid::with_empty_rows(ys.len()),
            d_col: Vec::new(),
            d_row,
            placement: Placement {
                start_y: ys.first().copied().unwrap_or(0),
                ..Placement::default()
            },
            invalid: Vec::new(),
        };

        let observations = &series.observations;
        let (t_min, t_max) = (self.time_scale.min(), self.time_scale.max());
        let Some(first) = observations.iter().position(|o| o.time_value() >= t_min) else {
            tracing::debug!(
                observations = observations.len(),
                "No observations inside the time window"
            );
            return Ok(mapped);
        };
        let end = observations[first..]
            .iter()
            .position(|o| o.time_value() > t_max)
            .map_or(observations.len(), |p| first + p);
        if end == first {
            tracing::debug!(
                observations = observations.len(),
                "No observations inside the time window"
            );
            return Ok(mapped);
        }

        let mut prev_x: Option<i64> = None;

        let first_x = self.column_for(observations[first].time_value());
        if first > 0 && first_x > 0 {
            let context = &observations[first - 1];
            let x = self.column_for(context.time_value());
            self.push_observation(&mut mapped, context, x, &ys, show_invalid_data);
            mapped.placement.start_x = x;
            prev_x = Some(x);
        }

        for obs in &observations[first..end] {
            let x = self.column_for(obs.time_value());
            match prev_x {
                Some(prev) => mapped.d_col.push(pixel_gap(prev, x)),
                None => mapped.placement.start_x = x,
            }
            self.push_observation(&mut mapped, obs, x, &ys, show_invalid_data);
            prev_x = Some(x);
        }

        mapped.placement.offset_x = mapped.placement.start_x.min(0);

        tracing::debug!(
            rows = mapped.grid.row_count(),
            cols = mapped.grid.col_count(),
            start_x = mapped.placement.start_x,
            start_y = mapped.placement.start_y,
            invalid = mapped.invalid.len(),
            "Mapped observations to sample grid"
        );

        Ok(mapped)
    }

    fn push_observation(
        &self,
        mapped: &mut MappedSamples,
        obs: &Observation,
        x: i64,
        ys: &[i64],
        show_invalid_data: bool,
    ) {
        let col = mapped.grid.col_count();
        let mut column = Vec::with_capacity(ys.len());

        for (row, (&value, &y)) in obs.readings.iter().zip(ys).enumerate() {
            if !obs.is_invalid(row) {
                column.push(Some(value));
            } else if show_invalid_data {
                mapped.invalid.push(InvalidSample { x, y, col, row });
                column.push(Some(value));
            } else {
                column.push(None);
            }
        }

        mapped.grid.push_column(column);
    }
}
