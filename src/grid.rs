//! Background fill and line grid.

use std::cell::RefCell;
use std::rc::Rc;

use crate::color::Rgb;
use crate::error::Result;
use crate::layout::Layout;
use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub canvas_size: f64,
    pub rows: u32,
    pub cols: u32,
    pub color: Rgb,
    pub bg_color: Rgb,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            canvas_size: 300.0,
            rows: 30,
            cols: 30,
            color: Rgb::new(0x4a, 0x9e, 0xff),
            bg_color: Rgb::new(0x0a, 0x0e, 0x21),
        }
    }
}

impl GridConfig {
    pub fn layout(&self) -> Result<Layout> {
        Layout::new(self.canvas_size, self.rows, self.cols)
    }
}

/// What to do with the surface before the grid lines go on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    /// Clear and fill with the grid's configured background color.
    Default,
    /// Clear and fill with the given color.
    Fill(Rgb),
    /// Keep whatever is already drawn and only add the lines.
    Keep,
}

#[derive(Debug, Clone)]
pub struct GridRenderer {
    layout: Layout,
    color: Rgb,
    bg_color: Rgb,
    visible: bool,
}

pub type SharedGrid = Rc<RefCell<GridRenderer>>;

impl GridRenderer {
    pub fn new(config: &GridConfig) -> Result<Self> {
        Ok(Self {
            layout: config.layout()?,
            color: config.color,
            bg_color: config.bg_color,
            visible: true,
        })
    }

    pub fn shared(self) -> SharedGrid {
        Rc::new(RefCell::new(self))
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn draw(&self, surface: &mut dyn Surface, background: Background) {
        let size = self.layout.canvas_size();
        let fill = match background {
            Background::Default => Some(self.bg_color),
            Background::Fill(c) => Some(c),
            Background::Keep => None,
        };
        if let Some(fill) = fill {
            surface.clear();
            surface.fill_rect(0.0, 0.0, size, size, fill.opaque());
        }

        if !self.visible {
            return;
        }

        let line = self.color.opaque();
        surface.set_smoothing(false);
        let offsets = self.line_offsets();
        for &i in &offsets {
            surface.stroke_line((i + 0.5, 0.0), (i + 0.5, size), 1.0, line);
        }
        for &i in &offsets {
            surface.stroke_line((0.0, i + 0.5), (size, i + 0.5), 1.0, line);
        }
    }

    /// Every multiple of the cell size from 0 up to the canvas edge, inclusive.
    /// The closing line sits exactly on the edge even when the cell size is
    /// not representable.
    fn line_offsets(&self) -> Vec<f64> {
        let size = self.layout.canvas_size();
        let cell = self.layout.cell_size();
        let cols = self.layout.cols();
        (0..=cols)
            .map(|k| if k == cols { size } else { k as f64 * cell })
            .collect()
    }
}
