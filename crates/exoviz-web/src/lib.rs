pub mod dom;
pub mod http;
pub mod runner;

pub use dom::{DomBindings, FrameGuard, FrameLoop};
pub use http::HttpCatalog;
pub use runner::{UiState, ViewerRunner};

use std::cell::RefCell;
use std::rc::Rc;

use exoviz::{CatalogClient, CustomPlanetForm, InputEvent, ViewerConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

struct Surface {
    frames: FrameLoop,
    dom: DomBindings,
}

thread_local! {
    static RUNNER: RefCell<Option<ViewerRunner>> = const { RefCell::new(None) };
    static SURFACE: RefCell<Option<Surface>> = const { RefCell::new(None) };
    static CATALOG: RefCell<Option<Rc<CatalogClient<HttpCatalog>>>> = const { RefCell::new(None) };
    static FRAME: FrameGuard = FrameGuard::default();
}

fn with_runner<R>(f: impl FnOnce(&mut ViewerRunner) -> R) -> Option<R> {
    runner::with_runner(&RUNNER, f)
}

fn catalog() -> Result<Rc<CatalogClient<HttpCatalog>>, JsValue> {
    CATALOG
        .with(|cell| cell.borrow().clone())
        .ok_or_else(|| JsValue::from_str("catalog not initialized"))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

// ---- Lifecycle ----

/// Mount the viewer on `canvas_id`. `on_frame` runs after every tick so the
/// page can render from the exported buffers.
#[wasm_bindgen]
pub fn viewer_init(
    canvas_id: &str,
    api_base: &str,
    config_json: Option<String>,
    on_frame: Option<js_sys::Function>,
) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if FRAME.with(FrameGuard::in_frame) {
        log::warn!("viewer_init called from a frame callback, ignored");
        return false;
    }

    let config = match config_json.as_deref().map(ViewerConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            log::warn!("ignoring viewer config: {err}");
            ViewerConfig::default()
        }
        None => ViewerConfig::default(),
    };

    let Some(window) = web_sys::window() else {
        log::warn!("no window, viewer not mounted");
        return false;
    };
    let canvas = window
        .document()
        .and_then(|doc| doc.get_element_by_id(canvas_id))
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
    let Some(canvas) = canvas else {
        log::warn!("canvas #{canvas_id} not found, viewer not mounted");
        return false;
    };

    // A second init replaces the first.
    viewer_teardown();

    CATALOG.with(|cell| *cell.borrow_mut() = Some(Rc::new(CatalogClient::new(HttpCatalog::new(api_base)))));

    let sink: Rc<dyn Fn(InputEvent)> = Rc::new(|event| {
        with_runner(|r| r.push_input(event));
    });
    let dom = match DomBindings::attach(&window, canvas, sink) {
        Ok(dom) => dom,
        Err(err) => {
            log::error!("failed to bind canvas events: {err:?}");
            return false;
        }
    };
    let (width, height) = dom.surface_size();
    RUNNER.with(|cell| {
        let mut slot = cell.borrow_mut();
        match slot.as_mut() {
            Some(runner) => runner.remount(config, width, height),
            None => *slot = Some(ViewerRunner::new(config, width, height)),
        }
    });

    let frames = FrameLoop::start(window, move |dt| {
        let keep_going = FRAME.with(|guard| {
            guard.run(|| {
                let Some(cursor) = with_runner(|r| r.tick(dt)) else {
                    return false;
                };
                if let Some(cursor) = cursor {
                    SURFACE.with(|cell| {
                        if let Some(surface) = cell.borrow().as_ref() {
                            surface.dom.set_cursor(cursor);
                        }
                    });
                }
                if let Some(callback) = &on_frame {
                    if let Err(err) = callback.call0(&JsValue::NULL) {
                        log::error!("frame callback failed: {err:?}");
                    }
                }
                true
            })
        });
        if FRAME.with(FrameGuard::take_deferred) {
            // The loop's closure is running; drop it once this callback returns.
            wasm_bindgen_futures::spawn_local(async { viewer_teardown() });
            return false;
        }
        keep_going
    });
    let frames = match frames {
        Ok(frames) => frames,
        Err(err) => {
            log::error!("failed to start frame loop: {err:?}");
            with_runner(ViewerRunner::teardown);
            return false;
        }
    };
    SURFACE.with(|cell| *cell.borrow_mut() = Some(Surface { frames, dom }));

    log::info!("exoviz: viewer mounted on #{canvas_id} ({width}x{height})");
    true
}

/// Stop the frame loop, unbind listeners and release the scene.
/// Selection and custom planets survive for the next `viewer_init`.
/// Called from inside a frame callback, it runs once that frame returns.
#[wasm_bindgen]
pub fn viewer_teardown() {
    if FRAME.with(FrameGuard::defer) {
        return;
    }
    if let Some(mut surface) = SURFACE.with(|cell| cell.borrow_mut().take()) {
        surface.frames.stop();
        surface.dom.detach();
    }
    RUNNER.with(|cell| {
        if let Some(runner) = cell.borrow_mut().as_mut() {
            runner.teardown();
            log::info!("exoviz: viewer torn down");
        }
    });
}

// ---- Catalog ----

/// Planet listing, custom planets first, filtered by `query`. Returns JSON.
#[wasm_bindgen]
pub async fn catalog_list(query: String) -> Result<JsValue, JsValue> {
    let client = catalog()?;
    let listing = runner::list_planets(&RUNNER, &client, &query)
        .await
        .ok_or_else(|| JsValue::from_str("viewer not initialized"))?;
    Ok(JsValue::from_str(&to_json(&listing)?))
}

/// Fetch the planet's details and add it to the selection.
/// Resolves `false` when the selection is full, the planet is already
/// shown, or no details could be fetched.
#[wasm_bindgen]
pub async fn catalog_add_planet(id: String) -> Result<bool, JsValue> {
    let client = catalog()?;
    Ok(runner::add_planet(&RUNNER, &client, &id).await)
}

/// Validate and register a custom planet. Resolves to its new id, or
/// rejects with the validation message.
#[wasm_bindgen]
pub fn catalog_submit_custom(form_json: &str) -> Result<String, JsValue> {
    let form: CustomPlanetForm = serde_json::from_str(form_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let now_ms = js_sys::Date::now() as u64;
    with_runner(|r| r.app_mut().submit_custom_planet(&form, now_ms))
        .ok_or_else(|| JsValue::from_str("viewer not initialized"))?
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Drop every custom planet, deselecting any that are shown.
#[wasm_bindgen]
pub fn catalog_clear_custom() -> u32 {
    with_runner(|r| r.app_mut().clear_custom_planets() as u32).unwrap_or(0)
}

// ---- Selection ----

#[wasm_bindgen]
pub fn selection_remove(id: &str) -> bool {
    with_runner(|r| r.app_mut().remove_planet(id).is_some()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn selection_focus(id: Option<String>) {
    with_runner(|r| r.app_mut().focus_planet(id.as_deref()));
}

#[wasm_bindgen]
pub fn selection_select_info(id: Option<String>) {
    with_runner(|r| r.app_mut().select_info(id.as_deref()));
}

/// The info affordance. Routed through the viewer like a canvas event.
#[wasm_bindgen]
pub fn selection_toggle_info() {
    with_runner(|r| r.push_input(InputEvent::InfoPressed));
}

#[wasm_bindgen]
pub fn selection_show_all() {
    with_runner(|r| r.push_input(InputEvent::ShowAllSystems));
}

// ---- UI state ----

#[wasm_bindgen]
pub fn ui_state() -> Result<String, JsValue> {
    with_runner(|r| to_json(&r.ui_state())).unwrap_or_else(|| Err(JsValue::from_str("viewer not initialized")))
}

/// True once after every selection, focus or popover change.
#[wasm_bindgen]
pub fn take_ui_dirty() -> bool {
    with_runner(|r| r.take_ui_dirty()).unwrap_or(false)
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_camera_ptr() -> *const f32 {
    with_runner(|r| r.camera_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_meshes_ptr() -> *const f32 {
    with_runner(|r| r.meshes_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_rings_ptr() -> *const f32 {
    with_runner(|r| r.rings_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_stars_ptr() -> *const f32 {
    with_runner(|r| r.stars_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_lights_ptr() -> *const f32 {
    with_runner(|r| r.lights_ptr()).unwrap_or(std::ptr::null())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.layout().buffer_total_floats as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.layout().max_instances as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_ring_vertices() -> u32 {
    with_runner(|r| r.layout().max_ring_vertices as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_lights() -> u32 {
    with_runner(|r| r.layout().max_lights as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_stars() -> u32 {
    with_runner(|r| r.layout().max_stars as u32).unwrap_or(0)
}
