//! A square outline that grows and fades, then reappears elsewhere.

use log::trace;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{Canvas, Effect};
use crate::color::{PaletteEntry, Rgb};
use crate::layout::Layout;

#[derive(Debug, Clone, PartialEq)]
pub struct SquareConfig {
    /// Milliseconds from appearing to fully faded.
    pub duration: f64,
    pub initial_size_cells: u32,
    /// Scale at the start of the cycle; grows by one over the cycle.
    pub base_scale: f64,
    /// Colors to pick from. Empty means random bright colors.
    pub palette: Vec<PaletteEntry>,
}

impl Default for SquareConfig {
    fn default() -> Self {
        Self {
            duration: 500.0,
            initial_size_cells: 5,
            base_scale: 1.5,
            palette: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub cx: f64,
    pub cy: f64,
    /// Unscaled edge length in pixels.
    pub size: f64,
    pub color: Rgb,
}

pub struct ExpandingSquare {
    layout: Layout,
    config: SquareConfig,
    square: Square,
    started: f64,
    rng: SmallRng,
}

impl ExpandingSquare {
    pub fn new(layout: Layout) -> Self {
        Self::with_config(layout, SquareConfig::default())
    }

    pub fn with_config(layout: Layout, config: SquareConfig) -> Self {
        let mut effect = Self {
            layout,
            config,
            square: Square {
                cx: 0.0,
                cy: 0.0,
                size: 0.0,
                color: Rgb::new(0, 0, 0),
            },
            started: 0.0,
            rng: SmallRng::from_entropy(),
        };
        effect.square = effect.create_square();
        effect
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self.square = self.create_square();
        self
    }

    pub fn square(&self) -> &Square {
        &self.square
    }

    pub fn started(&self) -> f64 {
        self.started
    }

    /// Fraction of the cycle elapsed at `now`, in `[0, 1]`.
    pub fn progress(&self, now: f64) -> f64 {
        ((now - self.started) / self.config.duration).clamp(0.0, 1.0)
    }

    pub fn scale_at(&self, t: f64) -> f64 {
        self.config.base_scale + t
    }

    pub fn alpha_at(&self, t: f64) -> f64 {
        1.0 - t
    }

    pub fn edge_at(&self, t: f64) -> f64 {
        self.square.size * self.scale_at(t)
    }

    fn create_square(&mut self) -> Square {
        let cell = self.layout.cell_size();
        let size = self.config.initial_size_cells as f64 * cell;
        let free_cells = ((self.layout.canvas_size() - size) / cell).max(0.0);
        let x = (self.rng.gen::<f64>() * free_cells).floor() * cell;
        let y = (self.rng.gen::<f64>() * free_cells).floor() * cell;
        Square {
            cx: x + size / 2.0,
            cy: y + size / 2.0,
            size,
            color: self.pick_color(),
        }
    }

    fn pick_color(&mut self) -> Rgb {
        if self.config.palette.is_empty() {
            return Rgb::random_bright(&mut self.rng);
        }
        let idx = self.rng.gen_range(0..self.config.palette.len());
        match self.config.palette[idx].to_rgb() {
            Some(c) => c,
            None => Rgb::random_bright(&mut self.rng),
        }
    }

    fn reseed(&mut self, now: f64) {
        self.square = self.create_square();
        self.started = now;
        trace!("square reseeded at ({}, {})", self.square.cx, self.square.cy);
    }

    /// Four non-overlapping border strips, each one cell thick.
    fn draw(&self, canvas: &mut Canvas<'_>, t: f64) {
        let size = self.edge_at(t);
        let x = self.square.cx - size / 2.0;
        let y = self.square.cy - size / 2.0;
        let sw = self.layout.cell_size();
        let color = self.square.color.with_alpha(self.alpha_at(t));
        let surface = &mut *canvas.surface;

        surface.set_smoothing(false);
        surface.fill_rect(x, y, size, sw, color);
        surface.fill_rect(x, y + size - sw, size, sw, color);
        surface.fill_rect(x, y + sw, sw, size - 2.0 * sw, color);
        surface.fill_rect(x + size - sw, y + sw, sw, size - 2.0 * sw, color);
    }
}

impl Effect for ExpandingSquare {
    fn name(&self) -> &'static str {
        "expanding-square"
    }

    fn reset(&mut self, now: f64) {
        self.reseed(now);
    }

    fn frame(&mut self, canvas: &mut Canvas<'_>, now: f64) {
        canvas.draw_background();
        let t = self.progress(now);
        self.draw(canvas, t);
        if t >= 1.0 {
            self.reseed(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    fn layout() -> Layout {
        Layout::new(300.0, 30, 30).unwrap()
    }

    #[test]
    fn test_square_is_cell_aligned_and_inside() {
        let mut effect = ExpandingSquare::new(layout()).with_seed(5);
        for i in 0..100 {
            effect.reset(i as f64);
            let sq = *effect.square();
            assert_eq!(sq.size, 50.0);
            let left = sq.cx - 25.0;
            let top = sq.cy - 25.0;
            assert_eq!(left % 10.0, 0.0);
            assert_eq!(top % 10.0, 0.0);
            assert!(left >= 0.0 && left + 50.0 <= 300.0);
            assert!(top >= 0.0 && top + 50.0 <= 300.0);
        }
    }

    #[test]
    fn test_scale_and_alpha_over_cycle() {
        let effect = ExpandingSquare::new(layout()).with_seed(1);
        let mut last_edge = 0.0;
        let mut last_alpha = 2.0;
        for step in 0..=10 {
            let t = step as f64 / 10.0;
            let edge = effect.edge_at(t);
            let alpha = effect.alpha_at(t);
            assert_eq!(edge, (1.5 + t) * 50.0);
            assert_eq!(alpha, 1.0 - t);
            assert!(edge > last_edge);
            assert!(alpha < last_alpha);
            last_edge = edge;
            last_alpha = alpha;
        }
    }

    #[test]
    fn test_progress_clamps() {
        let mut effect = ExpandingSquare::new(layout()).with_seed(1);
        effect.reset(1000.0);
        assert_eq!(effect.progress(1000.0), 0.0);
        assert_eq!(effect.progress(1250.0), 0.5);
        assert_eq!(effect.progress(9000.0), 1.0);
    }

    #[test]
    fn test_reseeds_when_cycle_completes() {
        let mut effect = ExpandingSquare::new(layout()).with_seed(9);
        effect.reset(0.0);
        let mut surface = RecordingSurface::new();

        effect.frame(&mut Canvas::new(&mut surface, None), 250.0);
        assert_eq!(effect.started(), 0.0);

        effect.frame(&mut Canvas::new(&mut surface, None), 500.0);
        assert_eq!(effect.started(), 500.0);
        assert_eq!(effect.square().size, 50.0);
        assert_eq!(effect.progress(500.0), 0.0);
    }

    #[test]
    fn test_border_strips_do_not_overlap() {
        let mut effect = ExpandingSquare::new(layout()).with_seed(2);
        effect.reset(0.0);
        let mut surface = RecordingSurface::new();
        effect.frame(&mut Canvas::new(&mut surface, None), 0.0);

        let area: f64 = surface
            .fills()
            .map(|op| match op {
                DrawOp::FillRect { width, height, .. } => width * height,
                _ => 0.0,
            })
            .sum();
        // 75px edge, 10px border: 75^2 - 55^2
        assert_eq!(area, 75.0 * 75.0 - 55.0 * 55.0);
        assert_eq!(surface.fills().count(), 4);
    }

    #[test]
    fn test_palette_colors_are_used() {
        let config = SquareConfig {
            palette: vec!["#ff6b6b".into(), [1, 2, 3].into()],
            ..SquareConfig::default()
        };
        let mut effect = ExpandingSquare::with_config(layout(), config).with_seed(4);
        for i in 0..50 {
            effect.reset(i as f64);
            let c = effect.square().color;
            assert!(c == Rgb::new(255, 107, 107) || c == Rgb::new(1, 2, 3), "{c}");
        }
    }

    #[test]
    fn test_bad_palette_entry_falls_back() {
        let config = SquareConfig {
            palette: vec!["not-a-color".into()],
            ..SquareConfig::default()
        };
        let mut effect = ExpandingSquare::with_config(layout(), config).with_seed(4);
        effect.reset(0.0);
        let c = effect.square().color;
        assert!(c.r.max(c.g).max(c.b) >= 127);
    }
}
