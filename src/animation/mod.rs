//! Frame-driven animations sharing one start/stop lifecycle.
//!
//! Each generator implements [`Effect`]: it owns its per-frame state and knows
//! how to reset, advance and draw it. [`Animation`] wraps an effect with the
//! self-rescheduling frame loop, and exposes it through [`Lifecycle`] so the
//! host can switch between variants without knowing their state.
//!
//! The loop is guarded by an armed flag plus a generation counter. Every
//! scheduled callback carries the generation it was armed with and does
//! nothing if the loop has since been stopped or restarted, so a stale frame
//! can never draw even if the scheduler fails to cancel it.

pub mod fade;
pub mod muncher;
pub mod rain;
pub mod square;

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use log::{debug, trace, warn};

use crate::grid::{Background, GridRenderer, SharedGrid};
use crate::scheduler::{Clock, FrameHandle, FrameScheduler};
use crate::surface::{SharedSurface, Surface};

pub use fade::{
    Circle, CircleFade, Diagonal, DiagonalFade, Fade, FadeConfig, Scroll, ScrollFade, Sweep,
    SweepConfig, SweepFade, Symmetric, SymmetricFade,
};
pub use muncher::{Muncher, MuncherConfig};
pub use rain::{Rain, RainConfig, RainDrop};
pub use square::{ExpandingSquare, Square, SquareConfig};

/// Drawing target handed to an effect for one frame.
pub struct Canvas<'a> {
    pub surface: &'a mut dyn Surface,
    background: Option<&'a GridRenderer>,
}

impl<'a> Canvas<'a> {
    pub fn new(surface: &'a mut dyn Surface, background: Option<&'a GridRenderer>) -> Self {
        Self {
            surface,
            background,
        }
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Clear to the grid's background color and draw its lines.
    pub fn draw_background(&mut self) {
        if let Some(grid) = self.background {
            grid.draw(&mut *self.surface, Background::Default);
        }
    }

    /// Draw grid lines over whatever is already on the surface.
    pub fn draw_grid_lines(&mut self) {
        if let Some(grid) = self.background {
            grid.draw(&mut *self.surface, Background::Keep);
        }
    }
}

/// Per-kind animation state.
pub trait Effect {
    fn name(&self) -> &'static str;

    /// Re-initialize state; `now` is the start timestamp in milliseconds.
    fn reset(&mut self, now: f64);

    /// Advance one tick and draw the result.
    fn frame(&mut self, canvas: &mut Canvas<'_>, now: f64);

    /// Draw a single frame outside the loop.
    fn preview(&mut self, canvas: &mut Canvas<'_>, now: f64) {
        self.frame(canvas, now);
    }
}

/// Start/stop control shared by every animation variant.
pub trait Lifecycle {
    fn name(&self) -> &'static str;

    /// Wire in the grid, or `None` to draw with no background at all.
    fn set_background_renderer(&self, renderer: Option<SharedGrid>);

    /// Reset state and schedule the first frame, cancelling any running loop.
    fn start(&self);

    /// Cancel the loop and leave the static grid on the surface.
    fn stop(&self);

    /// Draw one frame without scheduling another.
    fn render_frame(&self);

    fn is_running(&self) -> bool;
}

#[derive(Debug, Default)]
struct FrameLoop {
    handle: Option<FrameHandle>,
    armed: bool,
    generation: u64,
}

impl FrameLoop {
    fn arm(&mut self) -> u64 {
        self.armed = true;
        self.generation += 1;
        self.generation
    }

    fn disarm(&mut self) -> Option<FrameHandle> {
        self.armed = false;
        self.generation += 1;
        self.handle.take()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.armed && self.generation == generation
    }
}

struct Inner<E> {
    effect: RefCell<E>,
    surface: SharedSurface,
    scheduler: Rc<dyn FrameScheduler>,
    clock: Rc<dyn Clock>,
    background: RefCell<Option<SharedGrid>>,
    frame_loop: RefCell<FrameLoop>,
}

impl<E: Effect> Inner<E> {
    fn paint(&self, f: impl FnOnce(&mut E, &mut Canvas<'_>)) {
        let background = self.background.borrow().clone();
        let grid = background.as_ref().map(|g| g.borrow());
        let mut surface = self.surface.borrow_mut();
        let mut canvas = Canvas::new(&mut *surface, grid.as_deref());
        let mut effect = self.effect.borrow_mut();
        f(&mut *effect, &mut canvas);
    }

    fn cancel(&self) {
        let handle = self.frame_loop.borrow_mut().disarm();
        if let Some(handle) = handle {
            self.scheduler.cancel_frame(handle);
        }
    }
}

fn schedule<E: Effect + 'static>(inner: &Rc<Inner<E>>, generation: u64) {
    let next = Rc::clone(inner);
    let handle = inner
        .scheduler
        .request_frame(Box::new(move || on_frame(&next, generation)));
    let mut frame_loop = inner.frame_loop.borrow_mut();
    match handle {
        Some(handle) => frame_loop.handle = Some(handle),
        None => {
            // nothing will ever fire, so the loop is over
            warn!("frame request refused, stopping generation {}", generation);
            frame_loop.disarm();
        }
    }
}

fn on_frame<E: Effect + 'static>(inner: &Rc<Inner<E>>, generation: u64) {
    if !inner.frame_loop.borrow().is_current(generation) {
        trace!("dropping stale frame for generation {}", generation);
        return;
    }
    let now = inner.clock.now();
    inner.paint(|effect, canvas| effect.frame(canvas, now));
    schedule(inner, generation);
}

/// An [`Effect`] bound to a surface, a frame scheduler and a clock.
pub struct Animation<E> {
    inner: Rc<Inner<E>>,
}

impl<E: Effect + 'static> Animation<E> {
    pub fn new(
        effect: E,
        surface: SharedSurface,
        scheduler: Rc<dyn FrameScheduler>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                effect: RefCell::new(effect),
                surface,
                scheduler,
                clock,
                background: RefCell::new(None),
                frame_loop: RefCell::new(FrameLoop::default()),
            }),
        }
    }

    pub fn effect(&self) -> Ref<'_, E> {
        self.inner.effect.borrow()
    }

    /// Handle of the frame currently waiting to fire, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.inner.frame_loop.borrow().handle
    }
}

impl<E: Effect + 'static> Lifecycle for Animation<E> {
    fn name(&self) -> &'static str {
        self.inner.effect.borrow().name()
    }

    fn set_background_renderer(&self, renderer: Option<SharedGrid>) {
        *self.inner.background.borrow_mut() = renderer;
    }

    fn start(&self) {
        let inner = &self.inner;
        inner.cancel();
        let generation = inner.frame_loop.borrow_mut().arm();
        inner.effect.borrow_mut().reset(inner.clock.now());
        debug!("{} started (generation {})", self.name(), generation);
        schedule(inner, generation);
    }

    fn stop(&self) {
        let was_running = self.is_running();
        self.inner.cancel();
        if was_running {
            debug!("{} stopped", self.name());
        }
        if let Some(grid) = self.inner.background.borrow().as_ref() {
            grid.borrow()
                .draw(&mut *self.inner.surface.borrow_mut(), Background::Default);
        }
    }

    fn render_frame(&self) {
        let now = self.inner.clock.now();
        self.inner.paint(|effect, canvas| effect.preview(canvas, now));
    }

    fn is_running(&self) -> bool {
        self.inner.frame_loop.borrow().armed
    }
}
