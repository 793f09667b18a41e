//! `requestAnimationFrame` scheduling and `performance.now()` time.

use log::warn;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, Performance, Window};

use crate::scheduler::{Clock, FrameCallback, FrameHandle, FrameScheduler};

/// Schedules frames on the browser's animation-frame queue.
pub struct AnimationFrames {
    window: Window,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
        // Freed by wasm-bindgen once invoked. A cancelled frame keeps its
        // closure, but the animation's generation guard leaves it inert.
        let closure = Closure::once_into_js(move || callback());
        match self
            .window
            .request_animation_frame(closure.unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(err) => {
                warn!("requestAnimationFrame failed: {:?}", err);
                None
            }
        }
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if let Err(err) = self.window.cancel_animation_frame(handle.0) {
            warn!("cancelAnimationFrame({}) failed: {:?}", handle.0, err);
        }
    }
}

/// Milliseconds from `performance.now()`, falling back to `Date.now()`.
pub struct PerformanceClock {
    performance: Option<Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: window().and_then(|w| w.performance()),
        }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PerformanceClock {
    fn now(&self) -> f64 {
        match &self.performance {
            Some(p) => p.now(),
            None => js_sys::Date::now(),
        }
    }
}
