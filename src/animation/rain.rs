//! Falling drops with fading trails.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{Canvas, Effect};
use crate::color::Rgb;
use crate::layout::Layout;

#[derive(Debug, Clone, PartialEq)]
pub struct RainConfig {
    pub count: usize,
    /// Cells per frame.
    pub base_speed: f64,
    pub speed_range: f64,
    pub tail_length: u32,
    pub color: Rgb,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            count: 50,
            base_speed: 0.5,
            speed_range: 0.3,
            tail_length: 9,
            color: Rgb::new(74, 158, 255),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainDrop {
    pub column: u32,
    /// Top edge of the head, in pixels.
    pub y: f64,
    pub speed: f64,
    pub size: f64,
}

pub struct Rain {
    layout: Layout,
    config: RainConfig,
    drops: Vec<RainDrop>,
    rng: SmallRng,
}

impl Rain {
    pub fn new(layout: Layout) -> Self {
        Self::with_config(layout, RainConfig::default())
    }

    pub fn with_config(layout: Layout, config: RainConfig) -> Self {
        Self {
            layout,
            config,
            drops: Vec::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn drops(&self) -> &[RainDrop] {
        &self.drops
    }

    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    fn spawn(&mut self) -> RainDrop {
        let cell = self.layout.cell_size();
        RainDrop {
            column: self.rng.gen_range(0..self.layout.cols()),
            y: -(self.rng.gen_range(0..self.layout.rows()) as f64) * cell,
            speed: self.config.base_speed + self.rng.gen::<f64>() * self.config.speed_range,
            size: cell,
        }
    }

    /// Move every drop down by its speed, respawning those past the bottom.
    pub fn advance(&mut self) {
        let cell = self.layout.cell_size();
        let Self {
            layout, drops, rng, ..
        } = self;
        for drop in drops.iter_mut() {
            drop.y += drop.speed * cell;
            if drop.y > layout.canvas_size() {
                drop.column = rng.gen_range(0..layout.cols());
                // strictly above the canvas, staggered by whole cells
                drop.y = -((rng.gen_range(0..layout.rows()) + 1) as f64) * cell;
            }
        }
    }

    fn draw(&self, canvas: &mut Canvas<'_>) {
        let cell = self.layout.cell_size();
        let tail = self.config.tail_length;
        for drop in &self.drops {
            let x = drop.column as f64 * cell + 0.5;
            for i in 0..tail {
                let alpha = 1.0 - i as f64 / tail as f64;
                if alpha < 0.05 {
                    break;
                }
                let y = drop.y - i as f64 * cell + 0.5;
                canvas
                    .surface
                    .fill_rect(x, y, drop.size, drop.size, self.config.color.with_alpha(alpha));
            }
            canvas
                .surface
                .fill_rect(x, drop.y + 0.5, drop.size, drop.size, self.config.color.opaque());
        }
    }
}

impl Effect for Rain {
    fn name(&self) -> &'static str {
        "rain"
    }

    fn reset(&mut self, _now: f64) {
        let drops = (0..self.config.count).map(|_| self.spawn()).collect();
        self.drops = drops;
    }

    fn frame(&mut self, canvas: &mut Canvas<'_>, _now: f64) {
        canvas.draw_background();
        self.advance();
        self.draw(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    fn rain() -> Rain {
        let mut rain = Rain::new(Layout::new(300.0, 30, 30).unwrap()).with_seed(42);
        rain.reset(0.0);
        rain
    }

    #[test]
    fn test_reset_spawns_drops_above_canvas() {
        let rain = rain();
        assert_eq!(rain.drops().len(), 50);
        for drop in rain.drops() {
            assert!(drop.column < 30);
            assert!(drop.y <= 0.0);
            assert!(drop.speed >= 0.5 && drop.speed < 0.8);
            assert_eq!(drop.size, 10.0);
            assert_eq!(drop.y % 10.0, 0.0);
        }
    }

    #[test]
    fn test_drops_fall_or_respawn() {
        let mut rain = rain();
        for _ in 0..500 {
            let before = rain.drops().to_vec();
            rain.advance();
            for (old, new) in before.iter().zip(rain.drops()) {
                let fallen = old.y + old.speed * 10.0;
                if fallen > 300.0 {
                    assert!(new.y < 0.0 && new.y >= -300.0);
                    assert!(new.column < 30);
                } else {
                    assert!(new.y > old.y);
                    assert_eq!(new.column, old.column);
                }
                assert_eq!(new.speed, old.speed);
            }
        }
    }

    #[test]
    fn test_reset_regenerates() {
        let mut rain = rain();
        for _ in 0..100 {
            rain.advance();
        }
        rain.reset(0.0);
        assert_eq!(rain.drops().len(), 50);
        assert!(rain.drops().iter().all(|d| d.y <= 0.0));
    }

    #[test]
    fn test_draws_trail_then_head() {
        let layout = Layout::new(300.0, 30, 30).unwrap();
        let config = RainConfig {
            count: 1,
            ..RainConfig::default()
        };
        let mut rain = Rain::with_config(layout, config).with_seed(1);
        rain.reset(0.0);
        let drop = rain.drops()[0];

        let mut surface = RecordingSurface::new();
        rain.draw(&mut Canvas::new(&mut surface, None));

        let fills: Vec<_> = surface.fills().cloned().collect();
        assert_eq!(fills.len(), 10);
        let alphas: Vec<f64> = fills
            .iter()
            .map(|op| match op {
                DrawOp::FillRect { color, .. } => color.alpha,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(alphas[0], 1.0);
        assert!(alphas[..9].windows(2).all(|w| w[0] > w[1]));
        assert_eq!(alphas[9], 1.0);

        match &fills[1] {
            DrawOp::FillRect { x, y, width, .. } => {
                assert_eq!(*x, drop.column as f64 * 10.0 + 0.5);
                assert_eq!(*y, drop.y - 10.0 + 0.5);
                assert_eq!(*width, 10.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_faint_trail_steps_are_skipped() {
        let layout = Layout::new(300.0, 30, 30).unwrap();
        let config = RainConfig {
            count: 1,
            tail_length: 40,
            ..RainConfig::default()
        };
        let mut rain = Rain::with_config(layout, config).with_seed(3);
        rain.reset(0.0);
        let mut surface = RecordingSurface::new();
        rain.draw(&mut Canvas::new(&mut surface, None));
        // alpha = 1 - i/40 stays >= 0.05 for i <= 38
        assert_eq!(surface.fills().count(), 39 + 1);
    }
}
