//! The 3D viewer: keeps a scene of planetary systems in step with the
//! selection, animates it at a fixed rate and fills the frame buffers the
//! renderer reads.
//!
//! The host drives it with three calls:
//! - [`SceneManager::sync`] whenever the selection, focus or popover flag changes
//! - [`SceneManager::tick`] once per animation frame
//! - [`SceneManager::drain_events`] to collect focus/popover requests

pub mod entry;
pub mod framing;
pub mod picking;
pub mod reconcile;
pub mod styling;

use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::api::config::ViewerConfig;
use crate::api::types::{CursorStyle, EntityId, ViewerEvent};
use crate::assets::registry::ResourceRegistry;
use crate::bridge::protocol::{write_header, FrameCounts, ProtocolLayout, HEADER_FLOATS};
use crate::core::scene::Scene;
use crate::core::time::FixedTimestep;
use crate::extensions::transform::TransformGraph;
use crate::input::queue::{InputEvent, InputQueue};
use crate::mapping::params::VisualizationParams;
use crate::renderer::camera::{CameraTransition, PerspectiveCamera};
use crate::renderer::instance::FrameBuffers;
use crate::systems::lighting::{DirectionalLight, LightState};
use crate::systems::render::{build_frame_buffers, collect_lights};
use crate::systems::starfield::Starfield;
use crate::systems::tessellate::ShapeTessellator;

use self::entry::{EntryIds, SceneEntry, SystemLayout};
use self::framing::{camera_position, framing_distance};
use self::picking::pick_planet;
use self::reconcile::plan_reconcile;
use self::styling::{apply_style, ring_opacity, style_for};

/// What the viewer should show.
#[derive(Debug, Clone, Copy)]
pub struct SceneInput<'a> {
    /// Selected systems, in display order.
    pub planets: &'a [VisualizationParams],
    pub focused: Option<&'a str>,
    pub popover_open: bool,
}

/// Entries touched by one [`SceneManager::sync`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    pub destroyed: usize,
}

impl SyncReport {
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.updated == 0 && self.destroyed == 0
    }
}

pub struct SceneManager {
    config: ViewerConfig,
    scene: Scene,
    graph: TransformGraph,
    resources: ResourceRegistry,
    tessellator: ShapeTessellator,
    entries: Vec<SceneEntry>,
    /// Orbital phase per identifier. Survives updates, dropped on removal.
    angles: HashMap<String, f32>,
    next_entity: u32,

    camera: PerspectiveCamera,
    transition: Option<CameraTransition>,
    timestep: FixedTimestep,
    clock: f32,

    pointer: Option<Vec2>,
    hovered: Option<String>,
    cursor: CursorStyle,
    focused: Option<String>,
    popover_open: bool,
    needs_restyle: bool,

    starfield: Starfield,
    lights: LightState,
    buffers: FrameBuffers,
    events: Vec<ViewerEvent>,
    frame: u64,
    disposed: bool,
}

impl SceneManager {
    /// Build an empty scene (starfield only) for a `width` × `height`
    /// surface. The camera starts at the default distance.
    pub fn new(config: ViewerConfig, width: f32, height: f32) -> Self {
        let tuning = &config.tuning;
        let aspect = if width > 0.0 && height > 0.0 { width / height } else { 1.0 };
        let mut camera = PerspectiveCamera::new(tuning.camera_fov_deg, aspect, tuning.camera_near, tuning.camera_far);
        camera.position = camera_position(tuning.default_camera_distance, tuning);

        let mut resources = ResourceRegistry::new();
        let mut tessellator = ShapeTessellator::new();
        let starfield = Starfield::new(
            config.background_stars,
            tuning.starfield_extent,
            config.starfield_seed,
            &mut tessellator,
            &mut resources,
        );

        let mut lights = LightState::with_capacity(config.max_lights);
        lights.set_ambient(tuning.ambient_intensity);
        lights.set_directional(DirectionalLight {
            position: tuning.directional_position,
            intensity: tuning.directional_intensity,
        });

        log::info!(
            "viewer ready: {}x{}, {} background stars",
            width,
            height,
            starfield.len()
        );

        let mut manager = Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            resources,
            tessellator,
            entries: Vec::new(),
            angles: HashMap::new(),
            next_entity: 0,
            camera,
            transition: None,
            timestep: FixedTimestep::new(config.fixed_dt),
            clock: 0.0,
            pointer: None,
            hovered: None,
            cursor: CursorStyle::Default,
            focused: None,
            popover_open: false,
            needs_restyle: false,
            starfield,
            lights,
            buffers: FrameBuffers::with_capacity(config.max_instances, config.max_ring_vertices, config.background_stars),
            events: Vec::with_capacity(config.max_events),
            frame: 0,
            disposed: false,
            config,
        };
        manager.build_frame();
        manager
    }

    // ── Reconciliation ──

    /// Bring the scene in line with `input`.
    ///
    /// Systems that disappeared are torn down, new ones are built, and
    /// changed ones are patched in place. A focus on a system that is not
    /// in the scene afterwards is dropped and reported as
    /// [`ViewerEvent::FocusCleared`]. The camera is retargeted if the
    /// framing changed.
    pub fn sync(&mut self, input: SceneInput<'_>) -> SyncReport {
        if self.disposed {
            return SyncReport::default();
        }
        let plan = plan_reconcile(self.entries.iter().map(|e| (e.id(), &e.params)), input.planets);
        let mut report = SyncReport::default();

        for id in &plan.destroy {
            if let Some(pos) = self.entries.iter().position(|e| e.id() == id) {
                let entry = self.entries.remove(pos);
                entry.destroy(&mut self.scene, &mut self.graph, &mut self.resources);
                self.angles.remove(id);
                if self.hovered.as_deref() == Some(id.as_str()) {
                    self.hovered = None;
                }
                report.destroyed += 1;
            }
        }

        let tuning = &self.config.tuning;
        for &index in &plan.update {
            let params = &input.planets[index];
            if let Some(entry) = self.entries.iter_mut().find(|e| e.id() == params.id) {
                entry.update(params.clone(), tuning, &mut self.scene, &mut self.tessellator, &mut self.resources);
                report.updated += 1;
            }
        }

        let count = input.planets.len().max(1);
        for &index in &plan.create {
            let params = &input.planets[index];
            let angle = *self
                .angles
                .entry(params.id.clone())
                .or_insert(index as f32 * TAU / count as f32);
            let ids = self.allocate_ids();
            let entry = SceneEntry::spawn(
                params.clone(),
                ids,
                angle,
                &self.config.tuning,
                &mut self.scene,
                &mut self.graph,
                &mut self.tessellator,
                &mut self.resources,
            );
            self.entries.push(entry);
            report.created += 1;
        }

        let order: HashMap<&str, usize> = input.planets.iter().enumerate().map(|(i, p)| (p.id.as_str(), i)).collect();
        self.entries
            .sort_by_key(|e| order.get(e.id()).copied().unwrap_or(usize::MAX));

        let requested = input.focused.map(str::to_string);
        let focused = match requested {
            Some(id) if !self.has_entry(&id) => {
                log::debug!("focused system {id} is not in the scene, clearing focus");
                self.push_event(ViewerEvent::FocusCleared { id });
                None
            }
            other => other,
        };
        if focused != self.focused {
            self.focused = focused;
            self.needs_restyle = true;
        }
        if report.created > 0 || report.updated > 0 {
            self.needs_restyle = true;
        }
        self.popover_open = input.popover_open;

        if !report.is_noop() {
            log::debug!(
                "reconciled: {} created, {} updated, {} destroyed, {} live",
                report.created,
                report.updated,
                report.destroyed,
                self.entries.len()
            );
        }
        self.retarget_camera();
        self.graph.propagate(&mut self.scene);
        report
    }

    fn allocate_ids(&mut self) -> EntryIds {
        let mut next = || {
            self.next_entity += 1;
            EntityId(self.next_entity)
        };
        EntryIds { group: next(), star: next(), planet: next(), orbit: next() }
    }

    fn has_entry(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id() == id)
    }

    /// Where the camera should be for the current scene and focus.
    pub fn framing_target(&self) -> Vec3 {
        let layouts = self.entries.iter().map(|e| (e.id(), &e.layout));
        let distance = framing_distance(layouts, self.focused.as_deref(), &self.config.tuning);
        camera_position(distance, &self.config.tuning)
    }

    fn retarget_camera(&mut self) {
        let target = self.framing_target();
        let epsilon = self.config.tuning.retarget_epsilon;
        if let Some(transition) = &self.transition {
            if transition.to.distance(target) <= epsilon {
                return;
            }
        } else if self.camera.position.distance(target) <= epsilon {
            return;
        }
        log::debug!("camera retarget to {:.1} units", target.length());
        self.transition = Some(CameraTransition::new(
            self.camera.position,
            target,
            self.config.tuning.transition_easing,
        ));
    }

    // ── Frame loop ──

    /// Apply queued input, run as many fixed ticks as `frame_dt` seconds
    /// allow and rebuild the frame buffers. Returns the number of ticks run.
    pub fn tick(&mut self, frame_dt: f32, input: &mut InputQueue) -> u32 {
        if self.disposed {
            input.drain();
            return 0;
        }
        for event in input.drain() {
            self.handle_input(event);
        }
        let steps = self.timestep.accumulate(frame_dt);
        for _ in 0..steps {
            self.step();
        }
        self.build_frame();
        steps
    }

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } => self.pointer = Some(Vec2::new(x, y)),
            InputEvent::PointerLeave => self.pointer = None,
            InputEvent::Click { x, y } => {
                self.pointer = Some(Vec2::new(x, y));
                let ray = self.camera.ray_from_ndc(Vec2::new(x, y));
                if let Some(id) = pick_planet(&ray, &self.entries, &self.scene).map(str::to_string) {
                    self.push_event(ViewerEvent::FocusRequested { id: Some(id) });
                }
            }
            InputEvent::Resize { width, height } => self.camera.resize(width, height),
            InputEvent::InfoPressed => {
                let open = !self.popover_open;
                self.push_event(ViewerEvent::PopoverRequested { open });
            }
            InputEvent::ShowAllSystems => self.push_event(ViewerEvent::FocusRequested { id: None }),
        }
    }

    /// Advance the scene by one fixed tick.
    pub fn step(&mut self) {
        if self.disposed {
            return;
        }
        let dt = self.timestep.dt();
        self.clock += dt;
        let clock = self.clock;

        if let Some(transition) = &mut self.transition {
            self.camera.position = transition.advance(self.config.tuning.transition_step);
            self.camera.target = Vec3::ZERO;
            if transition.is_finished() {
                self.transition = None;
            }
        }

        // Re-picked every tick: the camera can move under a still pointer.
        self.hovered = self.pointer.and_then(|ndc| {
            let ray = self.camera.ray_from_ndc(ndc);
            pick_planet(&ray, &self.entries, &self.scene).map(str::to_string)
        });
        self.cursor = if self.hovered.is_some() { CursorStyle::Pointer } else { CursorStyle::Default };

        let tuning = &self.config.tuning;
        for (index, entry) in self.entries.iter().enumerate() {
            let angle = self.angles.entry(entry.params.id.clone()).or_insert(0.0);
            let paused = self.hovered.as_deref() == Some(entry.id());
            if !paused && entry.params.orbital_period > 0.0 {
                *angle = (*angle + TAU * tuning.time_scale / entry.params.orbital_period * dt) % TAU;
            }
            let orbit = entry.layout.orbit_position(*angle);

            if let Some(local) = self.graph.get_local_mut(entry.ids.planet) {
                local.offset = orbit;
                local.rotation.y = (local.rotation.y + tuning.planet_spin * dt) % TAU;
            }
            if let Some(local) = self.graph.get_local_mut(entry.ids.star) {
                local.rotation.y = (local.rotation.y + tuning.star_spin * dt) % TAU;
                let pulse = 1.0 + tuning.star_pulse_amplitude * (clock * tuning.star_pulse_rate + index as f32).sin();
                local.scale = Vec3::splat(pulse);
            }
        }

        if self.needs_restyle {
            for entry in &self.entries {
                let style = style_for(&entry.params, self.focused.as_deref(), tuning);
                apply_style(entry, &style, &mut self.resources);
            }
            self.needs_restyle = false;
        }

        let dimming = self.focused.is_some();
        for (index, entry) in self.entries.iter().enumerate() {
            let dimmed = dimming && self.focused.as_deref() != Some(entry.id());
            if let Some(material) = self.resources.material_mut(entry.resources.ring_material) {
                material.opacity = ring_opacity(index, clock, dimmed, tuning);
            }
        }

        self.starfield.tick(clock, dt, tuning);
        self.graph.propagate(&mut self.scene);
    }

    fn build_frame(&mut self) {
        self.buffers.clear();
        build_frame_buffers(self.scene.iter(), &self.resources, &mut self.buffers);
        self.starfield.write(&mut self.buffers.stars);
        collect_lights(self.scene.iter(), &mut self.lights);
        self.frame += 1;
    }

    fn push_event(&mut self, event: ViewerEvent) {
        if self.events.len() >= self.config.max_events {
            log::warn!("viewer event queue full, dropping {event:?}");
            return;
        }
        self.events.push(event);
    }

    /// Take every event raised since the last drain.
    pub fn drain_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Teardown ──

    /// Release every geometry and material and empty the scene. After this
    /// `sync`, `step` and `tick` do nothing. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for entry in self.entries.drain(..) {
            entry.destroy(&mut self.scene, &mut self.graph, &mut self.resources);
        }
        self.starfield.dispose(&mut self.resources);
        self.angles.clear();
        self.scene.clear();
        self.graph.clear();
        self.lights.clear();
        self.buffers.clear();
        self.events.clear();
        self.transition = None;
        self.hovered = None;
        self.pointer = None;
        self.cursor = CursorStyle::Default;
        self.disposed = true;
        log::info!(
            "viewer disposed ({} geometries, {} materials left)",
            self.resources.live_geometries(),
            self.resources.live_materials()
        );
    }

    // ── Accessors ──

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }

    pub fn entry(&self, id: &str) -> Option<&SceneEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn layout(&self, id: &str) -> Option<&SystemLayout> {
        self.entry(id).map(|e| &e.layout)
    }

    /// Current orbital phase of a system, radians.
    pub fn angle(&self, id: &str) -> Option<f32> {
        self.angles.get(id).copied()
    }

    /// World position of a system's planet as of the last tick.
    pub fn planet_position(&self, id: &str) -> Option<Vec3> {
        let entry = self.entry(id)?;
        self.scene.get(entry.ids.planet).map(|e| e.pos)
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn transition(&self) -> Option<&CameraTransition> {
        self.transition.as_ref()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn buffers(&self) -> &FrameBuffers {
        &self.buffers
    }

    pub fn lights(&self) -> &LightState {
        &self.lights
    }

    /// Header for the frame most recently built.
    pub fn header(&self, layout: &ProtocolLayout) -> [f32; HEADER_FLOATS] {
        let directional = self.lights.directional();
        let [x, y, z] = directional.position;
        let counts = FrameCounts {
            instances: self.buffers.meshes.len(),
            translucent_start: self.buffers.translucent_start as usize,
            ring_vertices: self.buffers.rings.len(),
            lights: self.lights.count(),
            stars: self.buffers.stars.len(),
            ambient: self.lights.ambient(),
            directional: [x, y, z, directional.intensity],
        };
        write_header(layout, self.frame, &counts)
    }
}
