use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::color::Rgba;
use crate::surface::Surface;

/// [`Surface`] backed by a 2D canvas context, scaled for the device pixel
/// ratio so callers draw in layout units.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d canvas not supported")?
            .dyn_into()?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Size the backing store to `size` CSS pixels times the device pixel
    /// ratio and scale the context to match.
    pub fn apply_device_pixel_ratio(&self, size: f64) -> Result<(), JsValue> {
        let dpr = window()
            .map(|w| w.device_pixel_ratio())
            .filter(|r| *r > 0.0)
            .unwrap_or(1.0);
        let px = (size * dpr).round() as u32;
        self.canvas.set_width(px);
        self.canvas.set_height(px);

        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", size))?;
        style.set_property("height", &format!("{}px", size))?;

        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.ctx.scale(dpr, dpr)?;
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        // wipe the whole backing store, whatever the current scale
        self.ctx.save();
        if let Err(err) = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0) {
            warn!("set_transform failed: {:?}", err);
        }
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        self.ctx.restore();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(x, y, width, height);
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
    }

    fn set_smoothing(&mut self, enabled: bool) {
        self.ctx.set_image_smoothing_enabled(enabled);
    }
}
