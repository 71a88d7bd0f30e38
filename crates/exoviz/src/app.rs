//! Application root: owns the selection, the custom-planet store and the
//! viewer, and keeps the viewer in sync after every state change.
//!
//! The viewer never touches selection state. It raises [`ViewerEvent`]s,
//! which are applied here and fed back through the next sync.

use log::info;

use crate::api::config::ViewerConfig;
use crate::api::types::ViewerEvent;
use crate::catalog::client::CatalogClient;
use crate::catalog::error::FormError;
use crate::catalog::form::CustomPlanetForm;
use crate::catalog::record::PlanetRecord;
use crate::catalog::source::CatalogSource;
use crate::catalog::store::CustomPlanetStore;
use crate::input::queue::InputQueue;
use crate::mapping::params::VisualizationParams;
use crate::state::popover::PopoverContent;
use crate::state::selection::{FetchTicket, SelectionState};
use crate::viewer::{SceneInput, SceneManager, SyncReport};

pub struct ExoplanetApp {
    config: ViewerConfig,
    selection: SelectionState,
    store: CustomPlanetStore,
    viewer: Option<SceneManager>,
}

impl ExoplanetApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            selection: SelectionState::new(),
            store: CustomPlanetStore::new(),
            viewer: None,
        }
    }

    // ── Viewer lifecycle ──

    /// Create the viewer for a `width` × `height` surface and show the
    /// current selection in it. Replaces (and disposes) any previous viewer.
    pub fn attach_viewer(&mut self, width: f32, height: f32) {
        self.detach_viewer();
        self.viewer = Some(SceneManager::new(self.config.clone(), width, height));
        self.sync();
    }

    /// Dispose the viewer. Selection and custom planets are kept.
    pub fn detach_viewer(&mut self) {
        if let Some(mut viewer) = self.viewer.take() {
            viewer.dispose();
        }
    }

    /// Replace the configuration. Takes effect at the next `attach_viewer`.
    pub fn set_config(&mut self, config: ViewerConfig) {
        self.config = config;
    }

    pub fn viewer(&self) -> Option<&SceneManager> {
        self.viewer.as_ref()
    }

    /// Run one animation frame and apply whatever the viewer asked for.
    pub fn tick(&mut self, frame_dt: f32, input: &mut InputQueue) -> u32 {
        let Some(viewer) = self.viewer.as_mut() else {
            input.drain();
            return 0;
        };
        let steps = viewer.tick(frame_dt, input);
        if self.apply_viewer_events() {
            self.sync();
        }
        steps
    }

    fn sync(&mut self) -> Option<SyncReport> {
        let params = self.visualization_params();
        let viewer = self.viewer.as_mut()?;
        let report = viewer.sync(SceneInput {
            planets: &params,
            focused: self.selection.focused(),
            popover_open: self.selection.popover().open,
        });
        // Events raised by a sync only ever clear focus, so one more pass settles.
        if self.apply_viewer_events() {
            let viewer = self.viewer.as_mut()?;
            viewer.sync(SceneInput {
                planets: &params,
                focused: self.selection.focused(),
                popover_open: self.selection.popover().open,
            });
        }
        Some(report)
    }

    fn apply_viewer_events(&mut self) -> bool {
        let Some(viewer) = self.viewer.as_mut() else { return false };
        let events = viewer.drain_events();
        let changed = !events.is_empty();
        for event in events {
            match event {
                ViewerEvent::FocusRequested { id: Some(id) } => self.selection.focus_planet(Some(&id)),
                ViewerEvent::FocusRequested { id: None } => self.selection.show_all(),
                ViewerEvent::FocusCleared { id } => {
                    if self.selection.focused() == Some(id.as_str()) {
                        self.selection.set_focus(None);
                    }
                }
                ViewerEvent::PopoverRequested { open: true } => self.selection.set_popover_open(true),
                ViewerEvent::PopoverRequested { open: false } => self.selection.select_info(None),
            }
        }
        changed
    }

    // ── Selection ──

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn add_planet(&mut self, record: PlanetRecord) -> bool {
        let added = self.selection.add(record);
        if added {
            self.sync();
        }
        added
    }

    pub fn remove_planet(&mut self, id: &str) -> Option<PlanetRecord> {
        let removed = self.selection.remove(id);
        self.sync();
        removed
    }

    /// Focus from the planet list; also opens the popover on it.
    pub fn focus_planet(&mut self, id: Option<&str>) {
        self.selection.focus_planet(id);
        self.sync();
    }

    pub fn show_all_systems(&mut self) {
        self.selection.show_all();
        self.sync();
    }

    pub fn select_info(&mut self, id: Option<&str>) {
        self.selection.select_info(id);
        self.sync();
    }

    /// The info affordance: closes (and clears) an open popover, opens a
    /// closed one.
    pub fn toggle_info(&mut self) {
        if self.selection.popover().open {
            self.selection.select_info(None);
        } else {
            self.selection.set_popover_open(true);
        }
        self.sync();
    }

    pub fn popover_content(&self) -> PopoverContent {
        PopoverContent::from_selection(&self.selection, self.config.distance_conversion)
    }

    pub fn visualization_params(&self) -> Vec<VisualizationParams> {
        self.selection.visualization_params(self.config.distance_conversion, &self.config.tuning)
    }

    // ── Catalog ──

    pub fn store(&self) -> &CustomPlanetStore {
        &self.store
    }

    /// Reserve a selection slot for `id` and snapshot what the lookup needs.
    /// `None` when the planet is already shown, already requested, or the
    /// selection is full.
    pub fn request_planet(&mut self, id: &str) -> Option<PlanetRequest> {
        let ticket = self.selection.begin_fetch(id)?;
        Some(PlanetRequest { ticket, store: self.store.clone() })
    }

    /// Land a resolved request. Requests for planets removed (or
    /// re-requested) in the meantime are discarded.
    pub fn land_planet(&mut self, request: PlanetRequest, record: Option<PlanetRecord>) -> bool {
        let added = self.selection.complete_fetch(request.ticket, record);
        if added {
            self.sync();
        }
        added
    }

    /// Validate the form and register the planet under a fresh custom id.
    /// It is also selected when there is room. On error nothing changes.
    pub fn submit_custom_planet(&mut self, form: &CustomPlanetForm, now_ms: u64) -> Result<String, FormError> {
        let id = self.store.next_identifier(now_ms);
        let record = form.validate(id.clone())?;
        info!("custom planet {} ({}) added", record.display_name(), id);
        self.store.add(record.clone());
        if !self.selection.add(record) {
            log::debug!("custom planet {id} not selected, selection full");
        }
        self.sync();
        Ok(id)
    }

    /// Forget every custom planet. Any of them still selected is removed
    /// from the view. Returns how many were dropped.
    pub fn clear_custom_planets(&mut self) -> usize {
        let ids: Vec<String> = self.store.iter().map(|r| r.kepoi_name.clone()).collect();
        for id in &ids {
            self.selection.remove(id);
        }
        self.store.clear();
        info!("cleared {} custom planets", ids.len());
        self.sync();
        ids.len()
    }
}

/// A detail lookup holding a reserved selection slot.
///
/// Carries its own copy of the custom store so it can be resolved without
/// borrowing the app across the await.
#[derive(Debug)]
pub struct PlanetRequest {
    ticket: FetchTicket,
    store: CustomPlanetStore,
}

impl PlanetRequest {
    pub fn id(&self) -> &str {
        self.ticket.id()
    }

    /// Custom planets first, then the catalog source.
    pub async fn resolve<S: CatalogSource>(&self, client: &CatalogClient<S>) -> Option<PlanetRecord> {
        client.get_planet_details(&self.store, self.id()).await
    }
}
