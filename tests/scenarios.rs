//! End-to-end runs of individual animations on a 300px, 30x30 grid.

use std::cell::RefCell;
use std::rc::Rc;

use gridfx_wasm::animation::{
    Animation, Circle, CircleFade, ExpandingSquare, Lifecycle, Muncher, Rain, SquareConfig,
};
use gridfx_wasm::color::{PaletteEntry, Rgb};
use gridfx_wasm::host::SQUARE_PALETTE;
use gridfx_wasm::scheduler::{ManualClock, ManualScheduler};
use gridfx_wasm::surface::{DrawOp, RecordingSurface};
use gridfx_wasm::{GridConfig, GridRenderer, Layout};

struct Rig {
    surface: Rc<RefCell<RecordingSurface>>,
    scheduler: Rc<ManualScheduler>,
    clock: Rc<ManualClock>,
}

impl Rig {
    fn new() -> Self {
        Self {
            surface: Rc::new(RefCell::new(RecordingSurface::new())),
            scheduler: Rc::new(ManualScheduler::new()),
            clock: Rc::new(ManualClock::new(0.0)),
        }
    }

    fn bind<E: gridfx_wasm::animation::Effect + 'static>(&self, effect: E) -> Animation<E> {
        let anim = Animation::new(
            effect,
            self.surface.clone(),
            self.scheduler.clone(),
            self.clock.clone(),
        );
        let grid = GridRenderer::new(&GridConfig::default()).unwrap().shared();
        anim.set_background_renderer(Some(grid));
        anim
    }
}

fn layout() -> Layout {
    Layout::new(300.0, 30, 30).unwrap()
}

fn fill_at(ops: &[DrawOp], at: (f64, f64)) -> Option<Rgb> {
    ops.iter().rev().find_map(|op| match op {
        DrawOp::FillRect { x, y, color, .. } if (*x, *y) == at => Some(color.rgb),
        _ => None,
    })
}

#[test]
fn test_rain_start_spawns_all_drops_above_canvas() {
    let rig = Rig::new();
    let rain = rig.bind(Rain::new(layout()).with_seed(42));
    assert_eq!(layout().cell_size(), 10.0);

    rain.start();
    let effect = rain.effect();
    assert_eq!(effect.drops().len(), 50);
    for drop in effect.drops() {
        assert!(drop.column < 30);
        assert!(drop.y <= 0.0);
        assert!(drop.speed >= 0.5 && drop.speed < 0.8);
    }
}

#[test]
fn test_rain_keeps_falling_across_frames() {
    let rig = Rig::new();
    let rain = rig.bind(Rain::new(layout()).with_seed(3));
    rain.start();
    for _ in 0..500 {
        rig.scheduler.run_frame();
    }

    let effect = rain.effect();
    assert_eq!(effect.drops().len(), 50);
    for drop in effect.drops() {
        assert!(drop.y <= 300.0);
        assert!(drop.column < 30);
    }
    assert!(rain.is_running());
}

#[test]
fn test_circle_fade_center_samples_offset() {
    let rig = Rig::new();
    let fade = rig.bind(CircleFade::new(layout()));
    fade.start();
    rig.scheduler.run_frames(10);

    let effect = fade.effect();
    assert_eq!(effect.band_height(), 212.0);
    assert_eq!(effect.offset(), 10.0);

    let center = Circle::radial_distance(&layout(), 150.0, 150.0);
    assert_eq!(center, 0.0);
    assert_eq!(
        effect.ramp().color_at(center + effect.offset()),
        effect.ramp().color_at(effect.offset())
    );

    let surface = rig.surface.borrow();
    let painted = fill_at(surface.since_last_clear(), (140.0, 140.0)).unwrap();
    assert_eq!(painted, effect.color_at_cell(14, 14));
}

#[test]
fn test_circle_fade_paints_center_cell_with_offset_color() {
    let rig = Rig::new();
    let layout = Layout::new(310.0, 31, 31).unwrap();
    let fade = rig.bind(CircleFade::new(layout));
    fade.start();
    rig.scheduler.run_frames(25);

    let effect = fade.effect();
    assert_eq!(effect.offset(), 25.0);
    let expected = effect.ramp().color_at(effect.offset());
    assert_eq!(effect.color_at_cell(15, 15), expected);

    let surface = rig.surface.borrow();
    assert_eq!(fill_at(surface.since_last_clear(), (150.0, 150.0)), Some(expected));
}

#[test]
fn test_muncher_halfway_at_one_second() {
    let rig = Rig::new();
    let muncher = rig.bind(Muncher::new(layout()));
    muncher.start();
    rig.clock.set(1000.0);
    rig.scheduler.run_frame();

    {
        let effect = muncher.effect();
        let p = effect.progress(1000.0);
        assert_eq!(p, 0.5);
        assert_eq!(effect.position_at(p), 15.0);
    }

    let body = Rgb::new(0x00, 0x00, 0xfe);
    let surface = rig.surface.borrow();
    let ops = surface.since_last_clear();
    // behind the center is body, straight ahead is the open mouth
    assert_eq!(fill_at(ops, (100.0, 150.0)), Some(body));
    assert_ne!(fill_at(ops, (200.0, 150.0)), Some(body));
    // well outside the radius
    assert_ne!(fill_at(ops, (0.0, 0.0)), Some(body));
}

#[test]
fn test_square_uses_palette_and_reseeds_after_cycle() {
    let rig = Rig::new();
    let config = SquareConfig {
        palette: SQUARE_PALETTE.iter().map(|&c| PaletteEntry::from(c)).collect(),
        ..SquareConfig::default()
    };
    let palette: Vec<Rgb> = config.palette.iter().filter_map(|c| c.to_rgb()).collect();
    let square = rig.bind(ExpandingSquare::with_config(layout(), config).with_seed(11));

    square.start();
    assert_eq!(square.effect().started(), 0.0);
    assert!(palette.contains(&square.effect().square().color));

    rig.clock.set(250.0);
    rig.scheduler.run_frame();
    assert_eq!(square.effect().started(), 0.0);

    rig.clock.set(600.0);
    rig.scheduler.run_frame();
    assert_eq!(square.effect().started(), 600.0);
    assert!(palette.contains(&square.effect().square().color));
}

#[test]
fn test_render_frame_draws_once_without_scheduling() {
    let rig = Rig::new();
    let muncher = rig.bind(Muncher::new(layout()));
    muncher.render_frame();

    assert!(rig.scheduler.pending().is_empty());
    assert!(rig.surface.borrow().fills().count() > 0);
    assert!(!muncher.is_running());
}
