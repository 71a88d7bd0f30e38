use std::cell::RefCell;
use std::thread::LocalKey;

use serde::Serialize;

use exoviz::bridge::protocol::HEADER_FLOATS;
use exoviz::renderer::camera::CameraUniform;
use exoviz::{
    filter_listing, CatalogClient, CatalogSource, CursorStyle, ExoplanetApp, InputEvent, InputQueue, PlanetSummary,
    PopoverContent, ProtocolLayout, ViewerConfig,
};

/// Snapshot of everything the page's UI panels render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub selected: Vec<PlanetSummary>,
    pub focused: Option<String>,
    pub popover_open: bool,
    pub popover: PopoverContent,
    /// False once the selection is full.
    pub can_add: bool,
}

/// Wires the application to the browser loop.
///
/// The page owns one of these through a `thread_local!`, because
/// wasm-bindgen exports free functions, not methods on a long-lived value.
pub struct ViewerRunner {
    app: ExoplanetApp,
    input: InputQueue,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    camera: CameraUniform,
    cursor: CursorStyle,
    ui_dirty: bool,
}

impl ViewerRunner {
    pub fn new(config: ViewerConfig, width: f32, height: f32) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        let mut app = ExoplanetApp::new(config);
        app.attach_viewer(width, height);
        let mut runner = Self {
            app,
            input: InputQueue::new(),
            layout,
            header: [0.0; HEADER_FLOATS],
            camera: bytemuck::Zeroable::zeroed(),
            cursor: CursorStyle::Default,
            ui_dirty: true,
        };
        runner.refresh();
        runner
    }

    /// Mount a fresh viewer with `config`. Selection and custom planets
    /// carry over from the previous mount.
    pub fn remount(&mut self, config: ViewerConfig, width: f32, height: f32) {
        self.layout = ProtocolLayout::from_config(&config);
        self.app.set_config(config);
        self.app.attach_viewer(width, height);
        self.input.drain();
        self.cursor = CursorStyle::Default;
        self.ui_dirty = true;
        self.refresh();
    }

    pub fn app(&self) -> &ExoplanetApp {
        &self.app
    }

    /// Mutable access for UI-driven changes. Marks the UI state dirty.
    pub fn app_mut(&mut self) -> &mut ExoplanetApp {
        self.ui_dirty = true;
        &mut self.app
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one animation frame. Returns the new cursor if it changed.
    pub fn tick(&mut self, dt: f32) -> Option<CursorStyle> {
        let before = self.ui_key();
        self.app.tick(dt, &mut self.input);
        if self.ui_key() != before {
            self.ui_dirty = true;
        }
        self.refresh();

        let cursor = self.app.viewer().map_or(CursorStyle::Default, |v| v.cursor());
        if cursor != self.cursor {
            self.cursor = cursor;
            Some(cursor)
        } else {
            None
        }
    }

    fn ui_key(&self) -> (Option<String>, bool, Option<String>, usize) {
        let selection = self.app.selection();
        (
            selection.focused().map(str::to_string),
            selection.popover().open,
            selection.popover().info_id.clone(),
            selection.len(),
        )
    }

    fn refresh(&mut self) {
        if let Some(viewer) = self.app.viewer() {
            self.header = viewer.header(&self.layout);
            self.camera = viewer.camera().uniform();
        }
    }

    /// True once after every change the UI should re-render for.
    pub fn take_ui_dirty(&mut self) -> bool {
        std::mem::take(&mut self.ui_dirty)
    }

    pub fn ui_state(&self) -> UiState {
        let selection = self.app.selection();
        UiState {
            selected: selection.selected().iter().map(|r| r.summary()).collect(),
            focused: selection.focused().map(str::to_string),
            popover_open: selection.popover().open,
            popover: self.app.popover_content(),
            can_add: !selection.is_full(),
        }
    }

    /// Dispose the viewer and its resources. Selection state is kept.
    pub fn teardown(&mut self) {
        self.app.detach_viewer();
        self.input.drain();
        self.header = [0.0; HEADER_FLOATS];
    }

    // ---- Pointer accessors for the renderer ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<CameraUniform, f32>(std::slice::from_ref(&self.camera)).as_ptr()
    }

    pub fn meshes_ptr(&self) -> *const f32 {
        self.app.viewer().map_or(std::ptr::null(), |v| v.buffers().meshes_ptr())
    }

    pub fn rings_ptr(&self) -> *const f32 {
        self.app.viewer().map_or(std::ptr::null(), |v| v.buffers().rings_ptr())
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.app.viewer().map_or(std::ptr::null(), |v| v.buffers().stars_ptr())
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.app.viewer().map_or(std::ptr::null(), |v| v.lights().buffer_ptr())
    }

    // ---- Capacity accessors ----

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }
}

// ---- Shared slot ----

/// Where the page's runner lives. The exports reach it only through here.
pub type RunnerSlot = LocalKey<RefCell<Option<ViewerRunner>>>;

pub fn with_runner<R>(slot: &'static RunnerSlot, f: impl FnOnce(&mut ViewerRunner) -> R) -> Option<R> {
    slot.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => Some(f(runner)),
        None => {
            log::warn!("viewer not initialized, call viewer_init() first");
            None
        }
    })
}

/// Planet listing, custom planets first, filtered by `query`.
pub async fn list_planets<S: CatalogSource>(
    slot: &'static RunnerSlot,
    client: &CatalogClient<S>,
    query: &str,
) -> Option<Vec<PlanetSummary>> {
    let store = with_runner(slot, |r| r.app().store().clone())?;
    let listing = client.list_planets(&store).await;
    Some(filter_listing(&listing, query).into_iter().cloned().collect())
}

/// Look `id` up and add it to the selection. The slot is only borrowed
/// before and after the await, never across it.
pub async fn add_planet<S: CatalogSource>(slot: &'static RunnerSlot, client: &CatalogClient<S>, id: &str) -> bool {
    let Some(request) = with_runner(slot, |r| r.app_mut().request_planet(id)).flatten() else {
        return false;
    };
    let record = request.resolve(client).await;
    if record.is_none() {
        log::warn!("no details for {id}, not added");
    }
    with_runner(slot, |r| r.app_mut().land_planet(request, record)).unwrap_or(false)
}
