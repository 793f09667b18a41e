//! A Pac-Man style disc crossing the grid, mouth open toward its heading.

use std::f64::consts::{FRAC_PI_4, TAU};

use super::{Canvas, Effect};
use crate::color::Rgb;
use crate::layout::Layout;

/// Body spans these angles; everything else inside the radius is mouth.
const BODY_START: f64 = FRAC_PI_4;
const BODY_END: f64 = 7.0 * FRAC_PI_4;

#[derive(Debug, Clone, PartialEq)]
pub struct MuncherConfig {
    /// In cells.
    pub radius: f64,
    /// Milliseconds for one crossing.
    pub duration: f64,
    pub color: Rgb,
}

impl Default for MuncherConfig {
    fn default() -> Self {
        Self {
            radius: 6.0,
            duration: 2000.0,
            color: Rgb::new(0x00, 0x00, 0xfe),
        }
    }
}

pub struct Muncher {
    layout: Layout,
    config: MuncherConfig,
    started: f64,
}

impl Muncher {
    pub fn new(layout: Layout) -> Self {
        Self::with_config(layout, MuncherConfig::default())
    }

    pub fn with_config(layout: Layout, config: MuncherConfig) -> Self {
        Self {
            layout,
            config,
            started: 0.0,
        }
    }

    pub fn progress(&self, now: f64) -> f64 {
        (now - self.started).rem_euclid(self.config.duration) / self.config.duration
    }

    /// Center column at progress `p`, from just off the left edge to just
    /// off the right one.
    pub fn position_at(&self, p: f64) -> f64 {
        let start = -self.config.radius;
        let end = self.layout.cols() as f64 + self.config.radius;
        start + (end - start) * p
    }

    pub fn center_row(&self) -> f64 {
        (self.layout.rows() / 2) as f64
    }

    /// Whether the cell at `(row, col)` is part of the shape centered at `x`.
    pub fn covers(&self, x: f64, row: u32, col: u32) -> bool {
        let dx = col as f64 - x;
        let dy = row as f64 - self.center_row();
        if dx * dx + dy * dy > self.config.radius * self.config.radius {
            return false;
        }
        let mut angle = dy.atan2(dx);
        if angle < 0.0 {
            angle += TAU;
        }
        (BODY_START..=BODY_END).contains(&angle)
    }

    fn draw_at(&self, canvas: &mut Canvas<'_>, x: f64) {
        let cell = self.layout.cell_size();
        let color = self.config.color.opaque();
        for (r, c) in self.layout.cells() {
            if self.covers(x, r, c) {
                canvas
                    .surface
                    .fill_rect(c as f64 * cell, r as f64 * cell, cell, cell, color);
            }
        }
    }
}

impl Effect for Muncher {
    fn name(&self) -> &'static str {
        "muncher"
    }

    fn reset(&mut self, now: f64) {
        self.started = now;
    }

    fn frame(&mut self, canvas: &mut Canvas<'_>, now: f64) {
        let x = self.position_at(self.progress(now));
        canvas.surface.clear();
        canvas.draw_background();
        self.draw_at(canvas, x);
    }

    /// Static pose halfway along the path, over grid lines only.
    fn preview(&mut self, canvas: &mut Canvas<'_>, _now: f64) {
        let x = self.position_at(0.5);
        canvas.surface.clear();
        canvas.draw_grid_lines();
        self.draw_at(canvas, x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};

    fn muncher() -> Muncher {
        Muncher::new(Layout::new(300.0, 30, 30).unwrap())
    }

    #[test]
    fn test_position_over_time() {
        let mut m = muncher();
        m.reset(500.0);
        assert_eq!(m.progress(500.0), 0.0);
        assert_eq!(m.progress(1500.0), 0.5);
        assert_eq!(m.position_at(m.progress(1500.0)), 15.0);
        assert_eq!(m.position_at(0.0), -6.0);
        assert_eq!(m.position_at(1.0), 36.0);
        // loops
        assert_eq!(m.progress(2500.0), 0.0);
    }

    #[test]
    fn test_mouth_faces_travel_direction() {
        let m = muncher();
        // straight ahead (+x) is inside the mouth
        assert!(!m.covers(15.0, 15, 20));
        assert!(!m.covers(15.0, 15, 16));
        // straight behind, above and below are body
        assert!(m.covers(15.0, 15, 10));
        assert!(m.covers(15.0, 10, 15));
        assert!(m.covers(15.0, 20, 15));
        // outside the radius
        assert!(!m.covers(15.0, 15, 8));
        assert!(!m.covers(15.0, 0, 15));
    }

    #[test]
    fn test_mouth_wedge_is_ninety_degrees() {
        let m = muncher();
        // atan2(1, 3) is inside the 45 degree half-wedge, atan2(4, 3) is not
        assert!(!m.covers(15.0, 16, 18));
        assert!(!m.covers(15.0, 14, 18));
        assert!(m.covers(15.0, 19, 18));
        assert!(m.covers(15.0, 11, 18));
    }

    #[test]
    fn test_offscreen_draws_nothing() {
        let mut m = muncher();
        m.reset(0.0);
        let mut surface = RecordingSurface::new();
        m.frame(&mut Canvas::new(&mut surface, None), 0.0);
        assert_eq!(surface.ops(), &[DrawOp::Clear]);
    }

    #[test]
    fn test_preview_draws_midpoint() {
        let mut m = muncher();
        let mut surface = RecordingSurface::new();
        m.preview(&mut Canvas::new(&mut surface, None), 12345.0);
        let cells: Vec<(f64, f64)> = surface
            .fills()
            .map(|op| match op {
                DrawOp::FillRect { x, y, .. } => (*x, *y),
                _ => unreachable!(),
            })
            .collect();
        assert!(!cells.is_empty());
        assert!(cells.contains(&(100.0, 150.0)));
        assert!(!cells.contains(&(200.0, 150.0)));
    }
}
