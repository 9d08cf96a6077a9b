//! Chart assembly: surface layout, scales and layers drawn in order.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use profile_common::{ObservationSeries, ProfileConfig};
use renderer::mapping::{LinearScale, PixelMapper, PixelRect, PlotArea};
use renderer::paint::RasterBuffer;
use renderer::{png, render_profile};
use tracing::{debug, info};

use crate::config::{ChartFile, ChartLayout, FrameStyle};

/// Position of a layer in the drawing sequence.
///
/// `Bottom` sorts before every `Index`, so it is drawn first and ends up
/// underneath everything else. Indexed layers draw in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawOrder {
    Bottom,
    Index(i32),
}

/// Visible time range of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self> {
        if from >= to {
            bail!("time window {} .. {} is empty", from.to_rfc3339(), to.to_rfc3339());
        }
        Ok(Self { from, to })
    }

    /// Window from explicit bounds, falling back to the series' first and
    /// last timestamps. A series with a single timestamp is padded by an
    /// hour on each side.
    pub fn resolve(
        series: &ObservationSeries,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        let bounds = series.time_bounds();
        let (from, to) = match (from, to, bounds) {
            (Some(f), Some(t), _) => (f, t),
            (f, t, Some((first, last))) => {
                let (first, last) = if first == last {
                    (first - Duration::hours(1), last + Duration::hours(1))
                } else {
                    (first, last)
                };
                (f.unwrap_or(first), t.unwrap_or(last))
            }
            _ => bail!("no observations to derive the time window from; pass --from and --to"),
        };
        Self::new(from, to)
    }

    fn millis(&self) -> (f64, f64) {
        (
            self.from.timestamp_millis() as f64,
            self.to.timestamp_millis() as f64,
        )
    }
}

/// What a layer draws into.
pub struct DrawContext<'a> {
    /// Whole RGBA surface, row-major, straight alpha.
    pub pixels: &'a mut [u8],
    pub width: usize,
    pub height: usize,
    /// Plot area in device pixels.
    pub plot: PixelRect,
    pub mapper: &'a PixelMapper<LinearScale, LinearScale>,
}

pub trait ChartLayer {
    fn name(&self) -> &str;
    fn order(&self) -> DrawOrder;
    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()>;
}

/// The temperature profile, drawn beneath everything else.
pub struct ProfileLayer {
    series: ObservationSeries,
    config: ProfileConfig,
}

impl ProfileLayer {
    pub fn new(series: ObservationSeries, config: ProfileConfig) -> Self {
        Self { series, config }
    }
}

impl ChartLayer for ProfileLayer {
    fn name(&self) -> &str {
        "temperature-profile"
    }

    fn order(&self) -> DrawOrder {
        DrawOrder::Bottom
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let mut buffer = RasterBuffer::new(&mut *ctx.pixels, ctx.width, ctx.plot)?;
        let summary = render_profile(&mut buffer, &self.series, ctx.mapper, &self.config)?;
        debug!(
            samples = summary.sample_cols,
            painted = summary.painted,
            invalid = summary.invalid_samples,
            "Drew temperature profile"
        );
        Ok(())
    }
}

/// Outline around the plot area, drawn just inside its edges.
pub struct FrameLayer {
    style: FrameStyle,
    order: DrawOrder,
}

impl FrameLayer {
    pub fn new(style: FrameStyle) -> Self {
        Self {
            style,
            order: DrawOrder::Index(0),
        }
    }

    pub fn with_order(mut self, order: DrawOrder) -> Self {
        self.order = order;
        self
    }
}

impl ChartLayer for FrameLayer {
    fn name(&self) -> &str {
        "frame"
    }

    fn order(&self) -> DrawOrder {
        self.order
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) -> Result<()> {
        let mut buffer = RasterBuffer::new(&mut *ctx.pixels, ctx.width, ctx.plot)?;
        let (w, h) = (buffer.width(), buffer.height());

        for ring in 0..self.style.width as usize {
            if 2 * ring >= w || 2 * ring >= h {
                break;
            }
            let (right, bottom) = (w - 1 - ring, h - 1 - ring);
            for x in ring..=right {
                buffer.blend_pixel(x, ring, self.style.color);
                buffer.blend_pixel(x, bottom, self.style.color);
            }
            for y in ring + 1..bottom {
                buffer.blend_pixel(ring, y, self.style.color);
                buffer.blend_pixel(right, y, self.style.color);
            }
        }
        Ok(())
    }
}

/// A rendered RGBA surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl RenderedChart {
    pub fn to_png(&self) -> Result<Vec<u8>> {
        png::create_png(&self.pixels, self.width, self.height).context("PNG encoding failed")
    }
}

/// Layout, scale domains and layers of one chart.
pub struct Chart {
    layout: ChartLayout,
    window: TimeWindow,
    depths: (f64, f64),
    layers: Vec<Box<dyn ChartLayer>>,
}

impl Chart {
    /// `depths` is the (shallowest, deepest) depth shown top to bottom.
    pub fn new(layout: ChartLayout, window: TimeWindow, depths: (f64, f64)) -> Self {
        Self {
            layout,
            window,
            depths,
            layers: Vec::new(),
        }
    }

    pub fn with_layer(mut self, layer: impl ChartLayer + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Device size of the surface.
    pub fn surface_size(&self) -> (usize, usize) {
        let ratio = self.layout.pixel_ratio;
        (
            (self.layout.width as f64 * ratio).round() as usize,
            (self.layout.height as f64 * ratio).round() as usize,
        )
    }

    /// Plot area in device pixels, kept inside the surface.
    pub fn plot_rect(&self) -> Result<PixelRect> {
        let (pw, ph) = self.layout.plot_size();
        let m = &self.layout.margin;
        let mut rect = PlotArea::new(m.left, m.top, pw, ph).to_device(self.layout.pixel_ratio)?;

        let (sw, sh) = self.surface_size();
        rect.width = rect.width.min(sw.saturating_sub(rect.left as usize));
        rect.height = rect.height.min(sh.saturating_sub(rect.top as usize));
        Ok(rect)
    }

    fn mapper(&self, plot: PixelRect) -> Result<PixelMapper<LinearScale, LinearScale>> {
        let (pw, ph) = self.layout.plot_size();
        let m = &self.layout.margin;
        let (t0, t1) = self.window.millis();
        let time = LinearScale::new(t0, t1, m.left, m.left + pw)?;

        let (mut shallow, mut deep) = self.depths;
        if shallow == deep {
            shallow -= 0.5;
            deep += 0.5;
        }
        let depth = LinearScale::new(shallow, deep, m.top, m.top + ph)?;

        Ok(PixelMapper::new(time, depth, plot, self.layout.pixel_ratio)?)
    }

    /// Fill the background, then draw every layer in draw order.
    pub fn render(&self) -> Result<RenderedChart> {
        self.layout.validate()?;

        let (width, height) = self.surface_size();
        let plot = self.plot_rect()?;
        let mapper = self.mapper(plot)?;

        let bg = self.layout.background;
        let mut pixels = [bg.r, bg.g, bg.b, bg.a].repeat(width * height);

        let mut layers: Vec<&dyn ChartLayer> = self.layers.iter().map(|l| l.as_ref()).collect();
        layers.sort_by_key(|l| l.order());

        let mut ctx = DrawContext {
            pixels: &mut pixels,
            width,
            height,
            plot,
            mapper: &mapper,
        };
        for layer in layers {
            layer
                .draw(&mut ctx)
                .with_context(|| format!("Failed to draw layer '{}'", layer.name()))?;
            debug!(layer = layer.name(), order = ?layer.order(), "Drew layer");
        }

        info!(width, height, layers = self.layers.len(), "Rendered chart");
        Ok(RenderedChart {
            pixels,
            width,
            height,
        })
    }
}

/// Standard profile chart: the temperature profile plus a frame.
pub fn profile_chart(
    file: &ChartFile,
    series: ObservationSeries,
    window: TimeWindow,
) -> Result<Chart> {
    let depths = series
        .depth_bounds()
        .context("probe data has no depth levels")?;

    let mut chart = Chart::new(file.chart.clone(), window, depths)
        .with_layer(ProfileLayer::new(series, file.profile.clone()));
    if file.chart.frame.width > 0 {
        chart = chart.with_layer(FrameLayer::new(file.chart.frame));
    }
    Ok(chart)
}
