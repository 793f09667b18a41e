//! Cyclic color ramps shared by the fade family.

use crate::color::Rgb;
use crate::error::{Error, Result};

/// Red, orange, yellow, green, cyan, blue, purple.
pub const RAINBOW: [Rgb; 7] = [
    Rgb::new(255, 0, 0),
    Rgb::new(255, 165, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 255, 255),
    Rgb::new(0, 0, 255),
    Rgb::new(128, 0, 128),
];

/// A palette spread evenly over a distance domain of length `band`, wrapping
/// from the last color back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    colors: Vec<Rgb>,
    band: f64,
}

impl ColorRamp {
    /// Fails on an empty palette or a band that is not a positive, finite
    /// length.
    pub fn new(colors: impl Into<Vec<Rgb>>, band: f64) -> Result<Self> {
        let colors = colors.into();
        if colors.is_empty() || !band.is_finite() || band <= 0.0 {
            return Err(Error::InvalidRamp {
                colors: colors.len(),
                band,
            });
        }
        Ok(Self { colors, band })
    }

    /// The seven-color rainbow over `band`. A degenerate band samples as
    /// the first color.
    pub fn rainbow(band: f64) -> Self {
        Self {
            colors: RAINBOW.to_vec(),
            band,
        }
    }

    pub fn band(&self) -> f64 {
        self.band
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Color at distance `s`. Negative distances wrap like positive ones.
    pub fn color_at(&self, s: f64) -> Rgb {
        let count = self.colors.len();
        let t = s.rem_euclid(self.band) / self.band;
        // degenerate bands and non-finite distances sample the first color
        let t = if t.is_finite() { t } else { 0.0 };
        let scaled = t * count as f64;
        // rem_euclid can round up to `band` itself for tiny negative inputs
        let index = (scaled.floor() as usize) % count;
        let next = (index + 1) % count;
        self.colors[index].lerp(self.colors[next], scaled.fract())
    }
}
