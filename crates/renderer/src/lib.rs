//! Rasterization of frost-probe temperature profiles.
//!
//! The pipeline for one redraw:
//! - [`mapping`]: observations + chart scales → sparse grid and pixel gaps
//! - [`interpolate`]: bilinear gap filling with null propagation
//! - [`paint`]: thermal-ramp colors written into the caller's RGBA region
//! - [`overlay`]: hatching over invalid readings
//!
//! [`pipeline::render_profile`] runs all of them in order.

pub mod gradient;
pub mod interpolate;
pub mod mapping;
pub mod overlay;
pub mod paint;
pub mod pipeline;
pub mod png;

pub use gradient::{encode, encode_value, thermal_color, Rgb};
pub use interpolate::{interpolate, interpolate_from};
pub use mapping::{
    InvalidSample, LinearScale, MappedSamples, PixelMapper, PixelRect, PixelScale, Placement,
    PlotArea,
};
pub use overlay::{draw_overlay, hatch_tile, invalid_regions, InvalidRegion};
pub use paint::{paint, RasterBuffer};
pub use pipeline::{render_profile, RenderSummary};
