//! Looping pixel-grid animations for a square canvas.
//!
//! The engine (grid, color ramps, animations, host) is plain Rust and runs
//! anywhere; it draws through the [`surface::Surface`] trait and is driven by
//! a [`scheduler::FrameScheduler`]. The browser binding lives in `wasm`.

pub mod animation;
pub mod color;
pub mod error;
pub mod grid;
pub mod host;
pub mod layout;
pub mod ramp;
pub mod scheduler;
pub mod surface;

pub use error::{Error, Result};
pub use grid::{Background, GridConfig, GridRenderer};
pub use host::{AnimationHost, AnimationKind, Selection};
pub use layout::Layout;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    mod console;
    mod frames;
    mod page;
    mod render;

    pub use frames::{AnimationFrames, PerformanceClock};
    pub use page::{mount, Page};
    pub use render::CanvasSurface;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console::init(log::LevelFilter::Debug);

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let page = mount(&document)?;
        // the page lives as long as the document
        std::mem::forget(page);
        Ok(())
    }
}
