//! Binds the host to the page's canvas, selector and grid toggle.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, HtmlButtonElement, HtmlCanvasElement, HtmlSelectElement};

use super::frames::{AnimationFrames, PerformanceClock};
use super::render::CanvasSurface;
use crate::grid::GridConfig;
use crate::host::AnimationHost;
use crate::surface::SharedSurface;

pub const CANVAS_ID: &str = "canvas";
pub const SELECT_ID: &str = "select";
pub const GRID_TOGGLE_ID: &str = "gridToggle";

/// A mounted page. Dropping it removes nothing from the DOM, but the event
/// closures die with it, so keep it alive for as long as the page is.
pub struct Page {
    host: Rc<RefCell<AnimationHost>>,
    _change_closure: Closure<dyn FnMut()>,
    _click_closure: Closure<dyn FnMut()>,
    _resize_closure: Closure<dyn FnMut()>,
}

impl Page {
    pub fn host(&self) -> &Rc<RefCell<AnimationHost>> {
        &self.host
    }
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{} has the wrong element type", id)))
}

/// Wire the default grid and all animations to the elements of `document`.
pub fn mount(document: &Document) -> Result<Page, JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let canvas: HtmlCanvasElement = element(document, CANVAS_ID)?;
    let select: HtmlSelectElement = element(document, SELECT_ID)?;
    let toggle: HtmlButtonElement = element(document, GRID_TOGGLE_ID)?;

    let config = GridConfig::default();
    let canvas_surface = Rc::new(RefCell::new(CanvasSurface::new(canvas)?));
    canvas_surface
        .borrow()
        .apply_device_pixel_ratio(config.canvas_size)?;
    let surface: SharedSurface = canvas_surface.clone();

    let host = AnimationHost::new(
        &config,
        surface,
        Rc::new(AnimationFrames::new(window.clone())),
        Rc::new(PerformanceClock::new()),
    )
    .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let host = Rc::new(RefCell::new(host));

    host.borrow().redraw();
    toggle.set_text_content(Some(host.borrow().grid_button_label()));

    let change_closure = {
        let host = host.clone();
        let select = select.clone();
        Closure::wrap(Box::new(move || {
            host.borrow_mut().select_label(&select.value());
        }) as Box<dyn FnMut()>)
    };
    select.add_event_listener_with_callback("change", change_closure.as_ref().unchecked_ref())?;

    let click_closure = {
        let host = host.clone();
        let button = toggle.clone();
        Closure::wrap(Box::new(move || {
            let mut host = host.borrow_mut();
            host.toggle_grid();
            button.set_text_content(Some(host.grid_button_label()));
        }) as Box<dyn FnMut()>)
    };
    toggle.add_event_listener_with_callback("click", click_closure.as_ref().unchecked_ref())?;

    let resize_closure = {
        let host = host.clone();
        let canvas_surface = canvas_surface.clone();
        let size = config.canvas_size;
        Closure::wrap(Box::new(move || {
            if let Err(err) = canvas_surface.borrow().apply_device_pixel_ratio(size) {
                warn!("resizing canvas failed: {:?}", err);
            }
            host.borrow_mut().on_resize();
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;

    info!(
        "mounted {}x{} grid on a {}px canvas",
        config.rows, config.cols, config.canvas_size
    );

    Ok(Page {
        host,
        _change_closure: change_closure,
        _click_closure: click_closure,
        _resize_closure: resize_closure,
    })
}
