//! Rainbow color cycling: over time, or as bands sweeping across the grid.
//!
//! Every variant samples the same [`ColorRamp`]; they differ only in how a
//! cell's distance along the ramp is measured.

use std::f64::consts::SQRT_2;
use std::marker::PhantomData;

use super::{Canvas, Effect};
use crate::color::Rgb;
use crate::layout::Layout;
use crate::ramp::ColorRamp;

#[derive(Debug, Clone, PartialEq)]
pub struct FadeConfig {
    /// Milliseconds for one trip around the ramp.
    pub duration: f64,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self { duration: 4000.0 }
    }
}

/// Whole canvas in one color, cycling through the ramp over time.
pub struct Fade {
    layout: Layout,
    ramp: ColorRamp,
    started: f64,
}

impl Fade {
    pub fn new(layout: Layout) -> Self {
        Self::with_config(layout, FadeConfig::default())
    }

    pub fn with_config(layout: Layout, config: FadeConfig) -> Self {
        Self {
            layout,
            ramp: ColorRamp::rainbow(config.duration),
            started: 0.0,
        }
    }

    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    pub fn color_at_time(&self, now: f64) -> Rgb {
        self.ramp.color_at(now - self.started)
    }
}

impl Effect for Fade {
    fn name(&self) -> &'static str {
        "fade"
    }

    fn reset(&mut self, now: f64) {
        self.started = now;
    }

    fn frame(&mut self, canvas: &mut Canvas<'_>, now: f64) {
        let color = self.color_at_time(now).opaque();
        let cell = self.layout.cell_size();
        canvas.surface.clear();
        for (r, c) in self.layout.cells() {
            canvas
                .surface
                .fill_rect(c as f64 * cell, r as f64 * cell, cell, cell, color);
        }
        canvas.draw_grid_lines();
    }
}

/// How a sweep measures distance along the ramp.
pub trait Sweep {
    const NAME: &'static str;

    /// Sign of the per-frame offset change.
    const DIRECTION: f64 = 1.0;

    /// Every cell in a row shares one color.
    const ROW_BANDS: bool = false;

    fn band_height(layout: &Layout) -> f64;

    /// Distance of a cell before the scrolling offset is added.
    fn distance(layout: &Layout, row: u32, col: u32) -> f64;
}

/// Vertical bands scrolling upward.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scroll;

impl Sweep for Scroll {
    const NAME: &'static str = "scroll-fade";
    const ROW_BANDS: bool = true;

    fn band_height(layout: &Layout) -> f64 {
        layout.canvas_size().floor()
    }

    fn distance(layout: &Layout, row: u32, _col: u32) -> f64 {
        row as f64 * layout.cell_size()
    }
}

/// Bands at 45 degrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagonal;

impl Sweep for Diagonal {
    const NAME: &'static str = "diagonal-fade";

    fn band_height(layout: &Layout) -> f64 {
        layout.canvas_size().floor()
    }

    fn distance(layout: &Layout, row: u32, col: u32) -> f64 {
        let cell = layout.cell_size();
        col as f64 * cell + row as f64 * cell
    }
}

/// Columns mirrored about the vertical centerline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Symmetric;

impl Sweep for Symmetric {
    const NAME: &'static str = "symmetric-fade";
    const DIRECTION: f64 = -1.0;

    fn band_height(layout: &Layout) -> f64 {
        (layout.canvas_size() / 0.8).floor()
    }

    fn distance(layout: &Layout, _row: u32, col: u32) -> f64 {
        let cols = layout.cols();
        let from_edge = if col < cols / 2 { col } else { cols - 1 - col };
        from_edge as f64 * layout.cell_size()
    }
}

/// Concentric rings around the canvas center.
#[derive(Debug, Clone, Copy, Default)]
pub struct Circle;

impl Circle {
    /// Distance from `(x, y)` to the canvas center.
    pub fn radial_distance(layout: &Layout, x: f64, y: f64) -> f64 {
        let center = layout.canvas_size() / 2.0;
        (x - center).hypot(y - center)
    }
}

impl Sweep for Circle {
    const NAME: &'static str = "circle-fade";

    /// Half the canvas diagonal.
    fn band_height(layout: &Layout) -> f64 {
        (layout.canvas_size() / 2.0 * SQRT_2).floor()
    }

    fn distance(layout: &Layout, row: u32, col: u32) -> f64 {
        let cell = layout.cell_size();
        let x = col as f64 * cell + cell / 2.0;
        let y = row as f64 * cell + cell / 2.0;
        Self::radial_distance(layout, x, y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// Pixels per frame.
    pub speed: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

/// A ramp scrolled across the grid by a per-frame offset.
pub struct SweepFade<S> {
    layout: Layout,
    ramp: ColorRamp,
    speed: f64,
    offset: f64,
    _sweep: PhantomData<S>,
}

pub type ScrollFade = SweepFade<Scroll>;
pub type DiagonalFade = SweepFade<Diagonal>;
pub type SymmetricFade = SweepFade<Symmetric>;
pub type CircleFade = SweepFade<Circle>;

impl<S: Sweep> SweepFade<S> {
    pub fn new(layout: Layout) -> Self {
        Self::with_config(layout, SweepConfig::default())
    }

    pub fn with_config(layout: Layout, config: SweepConfig) -> Self {
        Self {
            ramp: ColorRamp::rainbow(S::band_height(&layout)),
            layout,
            speed: config.speed,
            offset: 0.0,
            _sweep: PhantomData,
        }
    }

    pub fn band_height(&self) -> f64 {
        self.ramp.band()
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    pub fn color_at_cell(&self, row: u32, col: u32) -> Rgb {
        self.ramp
            .color_at(S::distance(&self.layout, row, col) + self.offset)
    }

    /// Move the offset one frame along, wrapping within the band.
    pub fn advance(&mut self) {
        self.offset = (self.offset + S::DIRECTION * self.speed) % self.ramp.band();
    }

    fn paint(&self, canvas: &mut Canvas<'_>) {
        let cell = self.layout.cell_size();
        if S::ROW_BANDS {
            let width = self.layout.canvas_size();
            for r in 0..self.layout.rows() {
                let color = self.color_at_cell(r, 0).opaque();
                canvas.surface.fill_rect(0.0, r as f64 * cell, width, cell, color);
            }
            return;
        }
        for (r, c) in self.layout.cells() {
            let color = self.color_at_cell(r, c).opaque();
            canvas
                .surface
                .fill_rect(c as f64 * cell, r as f64 * cell, cell, cell, color);
        }
    }
}

impl<S: Sweep> Effect for SweepFade<S> {
    fn name(&self) -> &'static str {
        S::NAME
    }

    fn reset(&mut self, _now: f64) {
        self.offset = 0.0;
    }

    fn frame(&mut self, canvas: &mut Canvas<'_>, _now: f64) {
        self.advance();
        canvas.surface.clear();
        self.paint(canvas);
        canvas.draw_grid_lines();
    }
}
