//! Owns one instance of every animation and switches between them.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use log::debug;

use crate::animation::{
    Animation, CircleFade, DiagonalFade, ExpandingSquare, Fade, Lifecycle, Muncher, Rain,
    ScrollFade, SquareConfig, SymmetricFade,
};
use crate::color::PaletteEntry;
use crate::error::{Error, Result};
use crate::grid::{Background, GridConfig, GridRenderer, SharedGrid};
use crate::scheduler::{Clock, FrameScheduler};
use crate::surface::SharedSurface;

/// Outline colors offered to the expanding square.
pub const SQUARE_PALETTE: [&str; 4] = ["#ff6b6b", "#ffd93d", "#6bcB77", "#4a9eff"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Rain,
    ExpandingSquare,
    Fade,
    ScrollFade,
    DiagonalFade,
    SymmetricFade,
    CircleFade,
    Muncher,
}

impl AnimationKind {
    /// In selector order.
    pub const ALL: [AnimationKind; 8] = [
        Self::Rain,
        Self::ExpandingSquare,
        Self::Fade,
        Self::ScrollFade,
        Self::DiagonalFade,
        Self::SymmetricFade,
        Self::CircleFade,
        Self::Muncher,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Rain => "Falling Object",
            Self::ExpandingSquare => "Expanding Object",
            Self::Fade => "Fade",
            Self::ScrollFade => "Scrolling Fade",
            Self::DiagonalFade => "Diagonally Fade",
            Self::SymmetricFade => "Symmetric Fade",
            Self::CircleFade => "Circle Fade",
            Self::Muncher => "PacMan",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A value of the animation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    None,
    Animation(AnimationKind),
}

impl Selection {
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Animation(kind) => kind.label(),
        }
    }
}

impl FromStr for Selection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "none" {
            return Ok(Self::None);
        }
        AnimationKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .map(Self::Animation)
            .ok_or_else(|| Error::UnknownSelection(s.to_string()))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct AnimationHost {
    grid: SharedGrid,
    surface: SharedSurface,
    animations: Vec<Box<dyn Lifecycle>>,
    current: Option<AnimationKind>,
}

impl AnimationHost {
    pub fn new(
        config: &GridConfig,
        surface: SharedSurface,
        scheduler: Rc<dyn FrameScheduler>,
        clock: Rc<dyn Clock>,
    ) -> Result<Self> {
        let layout = config.layout()?;
        let grid = GridRenderer::new(config)?.shared();

        let square_config = SquareConfig {
            palette: SQUARE_PALETTE.iter().map(|&c| PaletteEntry::from(c)).collect(),
            ..SquareConfig::default()
        };

        let animations: Vec<Box<dyn Lifecycle>> = AnimationKind::ALL
            .into_iter()
            .map(|kind| {
                let surface = surface.clone();
                let scheduler = scheduler.clone();
                let clock = clock.clone();
                let animation: Box<dyn Lifecycle> = match kind {
                    AnimationKind::Rain => {
                        Box::new(Animation::new(Rain::new(layout), surface, scheduler, clock))
                    }
                    AnimationKind::ExpandingSquare => Box::new(Animation::new(
                        ExpandingSquare::with_config(layout, square_config.clone()),
                        surface,
                        scheduler,
                        clock,
                    )),
                    AnimationKind::Fade => {
                        Box::new(Animation::new(Fade::new(layout), surface, scheduler, clock))
                    }
                    AnimationKind::ScrollFade => Box::new(Animation::new(
                        ScrollFade::new(layout),
                        surface,
                        scheduler,
                        clock,
                    )),
                    AnimationKind::DiagonalFade => Box::new(Animation::new(
                        DiagonalFade::new(layout),
                        surface,
                        scheduler,
                        clock,
                    )),
                    AnimationKind::SymmetricFade => Box::new(Animation::new(
                        SymmetricFade::new(layout),
                        surface,
                        scheduler,
                        clock,
                    )),
                    AnimationKind::CircleFade => Box::new(Animation::new(
                        CircleFade::new(layout),
                        surface,
                        scheduler,
                        clock,
                    )),
                    AnimationKind::Muncher => {
                        Box::new(Animation::new(Muncher::new(layout), surface, scheduler, clock))
                    }
                };
                animation.set_background_renderer(Some(grid.clone()));
                animation
            })
            .collect();

        Ok(Self {
            grid,
            surface,
            animations,
            current: None,
        })
    }

    pub fn grid(&self) -> &SharedGrid {
        &self.grid
    }

    pub fn animation(&self, kind: AnimationKind) -> &dyn Lifecycle {
        self.animations[kind.index()].as_ref()
    }

    pub fn current(&self) -> Option<AnimationKind> {
        self.current
    }

    pub fn is_running(&self) -> bool {
        self.current
            .map(|kind| self.animation(kind).is_running())
            .unwrap_or(false)
    }

    /// Stop whatever runs and start the selected animation, if any.
    pub fn select(&mut self, selection: Selection) {
        debug!("selected {}", selection);
        if let Some(kind) = self.current.take() {
            self.animation(kind).stop();
        }
        if let Selection::Animation(kind) = selection {
            self.animation(kind).start();
            self.current = Some(kind);
        }
    }

    /// Like [`select`](Self::select) for a raw selector value; unknown
    /// values leave the current animation untouched.
    pub fn select_label(&mut self, label: &str) {
        match label.parse::<Selection>() {
            Ok(selection) => self.select(selection),
            Err(err) => debug!("ignoring selection: {}", err),
        }
    }

    /// Flip grid visibility and return the new state.
    pub fn toggle_grid(&mut self) -> bool {
        let visible = {
            let mut grid = self.grid.borrow_mut();
            grid.toggle();
            grid.is_visible()
        };
        debug!("grid {}", if visible { "shown" } else { "hidden" });
        if !self.is_running() {
            self.redraw();
        }
        visible
    }

    pub fn grid_button_label(&self) -> &'static str {
        if self.grid.borrow().is_visible() {
            "Hide grid"
        } else {
            "Show grid"
        }
    }

    /// Restart the running animation against the new surface, or redraw the
    /// idle grid.
    pub fn on_resize(&mut self) {
        match self.current.filter(|_| self.is_running()) {
            Some(kind) => {
                let animation = self.animation(kind);
                animation.stop();
                animation.start();
            }
            None => self.redraw(),
        }
    }

    /// Draw the static grid frame.
    pub fn redraw(&self) {
        self.grid
            .borrow()
            .draw(&mut *self.surface.borrow_mut(), Background::Default);
    }
}
