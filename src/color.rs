//! RGB colors, alpha compositing and the conversions the generators need.

use std::fmt;

use rand::Rng;

use crate::error::{Error, Result};

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

    /// Parse a `#RRGGBB` string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| Error::InvalidHexColor(hex.to_string()))?;
        let n = u32::from_str_radix(digits, 16)
            .map_err(|_| Error::InvalidHexColor(hex.to_string()))?;
        Ok(Self::new((n >> 16) as u8, (n >> 8) as u8, n as u8))
    }

    /// Convert hue, saturation and lightness (all in `[0, 1]`) to RGB.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let a = s * l.min(1.0 - l);
        let channel = |n: f64| {
            let k = (n + h * 12.0) % 12.0;
            let v = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
            to_channel(255.0 * v)
        };
        Self::new(channel(0.0), channel(8.0), channel(4.0))
    }

    /// A saturated, mid-light color with a random hue.
    pub fn random_bright<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let h = rng.gen::<f64>();
        let s = 0.7 + rng.gen::<f64>() * 0.3;
        let l = 0.5 + rng.gen::<f64>() * 0.2;
        Self::from_hsl(h, s, l)
    }

    /// Channel-wise linear interpolation, rounded to the nearest integer.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| to_channel(a as f64 + (b as f64 - a as f64) * t);
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba::new(self, alpha)
    }

    pub fn opaque(self) -> Rgba {
        Rgba::new(self, 1.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

fn to_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// A color plus a separate alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgba {
    pub fn new(rgb: Rgb, alpha: f64) -> Self {
        Self {
            rgb,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb { r, g, b } = self.rgb;
        write!(f, "rgba({}, {}, {}, {})", r, g, b, self.alpha)
    }
}

/// One entry of a user supplied palette.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteEntry {
    Rgb([u8; 3]),
    Css(String),
}

impl PaletteEntry {
    /// Resolve the entry, or `None` when the string is not `#RRGGBB`.
    pub fn to_rgb(&self) -> Option<Rgb> {
        match self {
            Self::Rgb([r, g, b]) => Some(Rgb::new(*r, *g, *b)),
            Self::Css(s) => Rgb::from_hex(s).ok(),
        }
    }
}

impl From<&str> for PaletteEntry {
    fn from(s: &str) -> Self {
        Self::Css(s.to_string())
    }
}

impl From<[u8; 3]> for PaletteEntry {
    fn from(rgb: [u8; 3]) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<Rgb> for PaletteEntry {
    fn from(c: Rgb) -> Self {
        Self::Rgb([c.r, c.g, c.b])
    }
}
