//! Color range, overlay style and rendering configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, ProfileResult};

/// Straight (non-premultiplied) RGBA color.
///
/// Serialized as a hex string: "#RRGGBB" or "#RRGGBBAA".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse "#RRGGBB" or "#RRGGBBAA" (leading '#' optional).
    pub fn from_hex(hex: &str) -> ProfileResult<Self> {
        let s = hex.trim().trim_start_matches('#');
        let channel = |i: usize| {
            s.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .ok_or_else(|| ProfileError::Config(format!("invalid hex color '{}'", hex)))
        };

        match s.len() {
            6 => Ok(Self::opaque(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(ProfileError::Config(format!("invalid hex color '{}'", hex))),
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = ProfileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgba::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

/// Domain `[min, max]` mapped onto the thermal color ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRange {
    min: f64,
    max: f64,
}

impl ColorRange {
    /// Fails with `RangeDegenerate` unless `min < max` and both are finite.
    pub fn new(min: f64, max: f64) -> ProfileResult<Self> {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return Err(ProfileError::RangeDegenerate { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Scale `value` so the range maps to [0, 1], clamping outside values.
    pub fn normalize(&self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

impl Default for ColorRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_RANGE,
            max: DEFAULT_MAX_RANGE,
        }
    }
}

const DEFAULT_MIN_RANGE: f64 = -1.0;
const DEFAULT_MAX_RANGE: f64 = 1.0;

/// Hatch pattern used to mark invalid readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Side of the square pattern tile in device pixels.
    pub size: u32,
    pub stroke_width: f32,
    pub color: Rgba,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            size: 8,
            stroke_width: 2.0,
            color: Rgba::WHITE,
        }
    }
}

impl OverlayStyle {
    pub fn validate(&self) -> ProfileResult<()> {
        if self.size == 0 {
            return Err(ProfileError::invalid_parameter(
                "overlay.size",
                "tile size must be at least 1 pixel",
            ));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(ProfileError::invalid_parameter(
                "overlay.stroke_width",
                format!("stroke width must be positive, got {}", self.stroke_width),
            ));
        }
        Ok(())
    }
}

/// Rendering options of the temperature profile layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub min_range: f64,
    pub max_range: f64,
    /// Keep invalid readings and hatch them instead of discarding them.
    pub show_invalid_data: bool,
    pub overlay: OverlayStyle,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            min_range: DEFAULT_MIN_RANGE,
            max_range: DEFAULT_MAX_RANGE,
            show_invalid_data: false,
            overlay: OverlayStyle::default(),
        }
    }
}

impl ProfileConfig {
    pub fn color_range(&self) -> ProfileResult<ColorRange> {
        ColorRange::new(self.min_range, self.max_range)
    }

    /// Validate every field that has a precondition.
    pub fn validate(&self) -> ProfileResult<()> {
        self.color_range()?;
        self.overlay.validate()
    }
}
