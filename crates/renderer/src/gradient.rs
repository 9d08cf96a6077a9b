//! Thermal color ramp for temperature profiles.
//!
//! The ramp is a fixed set of per-channel polynomials of the normalized
//! value `v` in [0, 1], running from dark blue through green and yellow to
//! red. It is not configurable; only the value range mapped onto it is.

use profile_common::{ColorRange, ProfileResult, Rgba};

/// Opaque RGB color produced by the ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// RGBA bytes with full alpha.
    #[inline]
    pub fn to_rgba_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        Rgba::opaque(c.r, c.g, c.b)
    }
}

/// Round and clamp a channel value into a byte.
#[inline(always)]
fn channel(x: f64) -> u8 {
    x.round().clamp(0.0, 255.0) as u8
}

/// Ramp color for a normalized value; `v` is clamped to [0, 1] first.
#[inline]
pub fn thermal_color(v: f64) -> Rgb {
    let v = v.clamp(0.0, 1.0);
    let v2 = v * v;
    let v3 = v2 * v;

    Rgb {
        r: channel(575.23 * v3 - 357.03 * v2 - 34.577 * v + 70.85),
        g: channel(-126.32 * v2 + 360.17 * v),
        b: channel(-339.05 * v2 + 277.41 * v + 86.0),
    }
}

/// Map a temperature onto the ramp using a validated range.
#[inline]
pub fn encode(value: f64, range: &ColorRange) -> Rgb {
    thermal_color(range.normalize(value))
}

/// Map a temperature onto the ramp, validating the range bounds.
///
/// Fails with `RangeDegenerate` if `min_range >= max_range`.
pub fn encode_value(value: f64, min_range: f64, max_range: f64) -> ProfileResult<Rgb> {
    let range = ColorRange::new(min_range, max_range)?;
    Ok(encode(value, &range))
}
