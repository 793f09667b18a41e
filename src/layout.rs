use crate::error::{Error, Result};

/// Square canvas split into `rows` × `cols` equal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    canvas_size: f64,
    rows: u32,
    cols: u32,
}

impl Layout {
    pub fn new(canvas_size: f64, rows: u32, cols: u32) -> Result<Self> {
        if !canvas_size.is_finite() || canvas_size <= 0.0 || rows == 0 || cols == 0 {
            return Err(Error::InvalidLayout {
                canvas_size,
                rows,
                cols,
            });
        }
        Ok(Self {
            canvas_size,
            rows,
            cols,
        })
    }

    pub fn canvas_size(&self) -> f64 {
        self.canvas_size
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Edge length of one cell. Cells are square, so only `cols` matters.
    pub fn cell_size(&self) -> f64 {
        self.canvas_size / self.cols as f64
    }

    /// Iterate over every `(row, col)` pair, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| (r, c)))
    }
}
