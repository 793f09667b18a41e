//! The immediate-mode drawing surface the engine paints on.

use std::cell::RefCell;
use std::rc::Rc;

use crate::color::Rgba;

/// 2D immediate-mode drawing primitives, in layout units.
pub trait Surface {
    /// Wipe the entire surface, independent of any scaling.
    fn clear(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba);

    fn set_smoothing(&mut self, enabled: bool);
}

pub type SharedSurface = Rc<RefCell<dyn Surface>>;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    },
    StrokeLine {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Rgba,
    },
    Smoothing(bool),
}

/// Records every call for headless inspection.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Operations recorded since the most recent clear (or all of them).
    pub fn since_last_clear(&self) -> &[DrawOp] {
        match self.ops.iter().rposition(|op| *op == DrawOp::Clear) {
            Some(i) => &self.ops[i + 1..],
            None => &self.ops,
        }
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillRect { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::StrokeLine { .. }))
    }

    pub fn clear_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == DrawOp::Clear).count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba) {
        self.ops.push(DrawOp::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn set_smoothing(&mut self, enabled: bool) {
        self.ops.push(DrawOp::Smoothing(enabled));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_since_last_clear() {
        let mut s = RecordingSurface::new();
        let c = Rgb::new(1, 2, 3).opaque();
        s.fill_rect(0.0, 0.0, 1.0, 1.0, c);
        s.clear();
        s.fill_rect(1.0, 1.0, 1.0, 1.0, c);
        assert_eq!(s.since_last_clear().len(), 1);
        assert_eq!(s.fills().count(), 2);
        assert_eq!(s.clear_count(), 1);
        assert_eq!(s.take_ops().len(), 3);
        assert!(s.ops().is_empty());
    }
}
