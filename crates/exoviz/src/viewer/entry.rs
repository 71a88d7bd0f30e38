//! One planetary system in the scene: the grouping node, its star, planet
//! and orbit ring, and the graphics resources they own.

use glam::Vec3;

use crate::api::config::VisualTuning;
use crate::api::types::EntityId;
use crate::assets::registry::{Geometry, GeometryHandle, Material, MaterialHandle, ResourceRegistry};
use crate::components::entity::Entity;
use crate::components::mesh::{MeshComponent, MeshKind};
use crate::core::scene::Scene;
use crate::extensions::transform::{LocalTransform, TransformGraph};
use crate::mapping::params::VisualizationParams;
use crate::systems::lighting::PointLight;
use crate::systems::tessellate::ShapeTessellator;

const SPHERE_SEGMENTS: u32 = 32;
const PLANET_SHININESS: f32 = 30.0;
const STAR_EMISSIVE: f32 = 1.0;
const LAYOUT_EPSILON: f32 = 1e-5;

// ── Layout ──

/// Scene-space sizes of one system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemLayout {
    pub star_radius: f32,
    pub planet_radius: f32,
    /// Orbit radius, floored so the planet never touches the star.
    pub orbital_distance: f32,
}

impl SystemLayout {
    pub fn from_params(params: &VisualizationParams, tuning: &VisualTuning) -> Self {
        let star_radius = params.star_diameter / 2.0;
        let planet_radius = params.planet_diameter / 2.0;
        let floor = tuning.min_separation_factor * (star_radius + planet_radius);
        Self {
            star_radius,
            planet_radius,
            orbital_distance: params.orbital_distance.max(floor),
        }
    }

    /// True if any size-affecting quantity differs.
    pub fn geometry_differs(&self, other: &SystemLayout) -> bool {
        (self.star_radius - other.star_radius).abs() > LAYOUT_EPSILON
            || (self.planet_radius - other.planet_radius).abs() > LAYOUT_EPSILON
            || (self.orbital_distance - other.orbital_distance).abs() > LAYOUT_EPSILON
    }

    /// Planet position on its orbit at `angle`, relative to the system origin.
    pub fn orbit_position(&self, angle: f32) -> Vec3 {
        Vec3::new(angle.cos() * self.orbital_distance, 0.0, angle.sin() * self.orbital_distance)
    }
}

// ── Resources ──

/// Geometry and material handles owned by one system.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemResources {
    pub star_geometry: GeometryHandle,
    pub star_material: MaterialHandle,
    pub planet_geometry: GeometryHandle,
    pub planet_material: MaterialHandle,
    pub ring_geometry: GeometryHandle,
    pub ring_material: MaterialHandle,
}

impl SystemResources {
    pub fn create(
        params: &VisualizationParams,
        layout: &SystemLayout,
        tuning: &VisualTuning,
        tessellator: &mut ShapeTessellator,
        resources: &mut ResourceRegistry,
    ) -> Self {
        let (star_geometry, planet_geometry, ring_geometry) = Self::geometries(layout, tuning, tessellator, resources);
        Self {
            star_geometry,
            star_material: resources.create_material(Material::glowing(params.star_color, STAR_EMISSIVE)),
            planet_geometry,
            planet_material: resources.create_material(Material::phong(params.planet_color, PLANET_SHININESS)),
            ring_geometry,
            ring_material: resources.create_material(Material::basic(params.planet_color, tuning.ring_base_opacity)),
        }
    }

    fn geometries(
        layout: &SystemLayout,
        tuning: &VisualTuning,
        tessellator: &mut ShapeTessellator,
        resources: &mut ResourceRegistry,
    ) -> (GeometryHandle, GeometryHandle, GeometryHandle) {
        let inner = (layout.orbital_distance - tuning.ring_half_width).max(0.0);
        let outer = layout.orbital_distance + tuning.ring_half_width;
        let vertices = tessellator.ring(inner, outer, tuning.ring_tolerance);
        (
            resources.create_geometry(Geometry::Sphere { radius: layout.star_radius, segments: SPHERE_SEGMENTS }),
            resources.create_geometry(Geometry::Sphere { radius: layout.planet_radius, segments: SPHERE_SEGMENTS }),
            resources.create_geometry(Geometry::Ring { inner, outer, vertices }),
        )
    }

    /// Replace the three geometries, releasing the old ones.
    pub fn rebuild_geometry(
        &mut self,
        layout: &SystemLayout,
        tuning: &VisualTuning,
        tessellator: &mut ShapeTessellator,
        resources: &mut ResourceRegistry,
    ) {
        resources.release_geometry(self.star_geometry);
        resources.release_geometry(self.planet_geometry);
        resources.release_geometry(self.ring_geometry);
        let (star, planet, ring) = Self::geometries(layout, tuning, tessellator, resources);
        self.star_geometry = star;
        self.planet_geometry = planet;
        self.ring_geometry = ring;
    }

    pub fn release(&self, resources: &mut ResourceRegistry) {
        resources.release_geometry(self.star_geometry);
        resources.release_geometry(self.planet_geometry);
        resources.release_geometry(self.ring_geometry);
        resources.release_material(self.star_material);
        resources.release_material(self.planet_material);
        resources.release_material(self.ring_material);
    }
}

// ── Entry ──

/// Entity ids reserved for one system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryIds {
    pub group: EntityId,
    pub star: EntityId,
    pub planet: EntityId,
    pub orbit: EntityId,
}

/// A live planetary system.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEntry {
    pub params: VisualizationParams,
    pub layout: SystemLayout,
    pub ids: EntryIds,
    pub resources: SystemResources,
}

impl SceneEntry {
    /// Build the system's entities, attach them under a root group at the
    /// origin and place the planet at `angle` on its orbit.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn(
        params: VisualizationParams,
        ids: EntryIds,
        angle: f32,
        tuning: &VisualTuning,
        scene: &mut Scene,
        graph: &mut TransformGraph,
        tessellator: &mut ShapeTessellator,
        resources: &mut ResourceRegistry,
    ) -> Self {
        let layout = SystemLayout::from_params(&params, tuning);
        let owned = SystemResources::create(&params, &layout, tuning, tessellator, resources);
        let id = &params.id;

        scene.spawn(Entity::new(ids.group).with_tag(format!("system:{id}")));
        scene.spawn(
            Entity::new(ids.star)
                .with_tag(format!("star:{id}"))
                .with_mesh(MeshComponent::new(MeshKind::Star, owned.star_geometry, owned.star_material))
                .with_light(star_light(&params, &layout, tuning)),
        );
        scene.spawn(
            Entity::new(ids.planet)
                .with_tag(format!("planet:{id}"))
                .with_mesh(MeshComponent::new(MeshKind::Planet, owned.planet_geometry, owned.planet_material)),
        );
        scene.spawn(
            Entity::new(ids.orbit)
                .with_tag(format!("orbit:{id}"))
                .with_mesh(MeshComponent::new(MeshKind::OrbitRing, owned.ring_geometry, owned.ring_material)),
        );

        graph.register_with(ids.group, LocalTransform::new());
        graph.attach(ids.star, ids.group, LocalTransform::new());
        graph.attach(ids.planet, ids.group, LocalTransform::new().with_offset(layout.orbit_position(angle)));
        graph.attach(ids.orbit, ids.group, LocalTransform::new());

        Self { params, layout, ids, resources: owned }
    }

    /// Apply new parameters in place. Geometry is rebuilt only when a size
    /// changed; colours and the light always follow the new parameters.
    /// Returns true if geometry was rebuilt.
    pub fn update(
        &mut self,
        params: VisualizationParams,
        tuning: &VisualTuning,
        scene: &mut Scene,
        tessellator: &mut ShapeTessellator,
        resources: &mut ResourceRegistry,
    ) -> bool {
        let layout = SystemLayout::from_params(&params, tuning);
        let rebuilt = layout.geometry_differs(&self.layout);
        if rebuilt {
            self.resources.rebuild_geometry(&layout, tuning, tessellator, resources);
            self.rebind_geometry(scene);
        }

        if let Some(material) = resources.material_mut(self.resources.star_material) {
            material.color = params.star_color;
        }
        if let Some(material) = resources.material_mut(self.resources.planet_material) {
            material.color = params.planet_color;
        }
        if let Some(material) = resources.material_mut(self.resources.ring_material) {
            material.color = params.planet_color;
        }
        if let Some(star) = scene.get_mut(self.ids.star) {
            star.light = Some(star_light(&params, &layout, tuning));
        }

        self.layout = layout;
        self.params = params;
        rebuilt
    }

    fn rebind_geometry(&self, scene: &mut Scene) {
        let pairs = [
            (self.ids.star, self.resources.star_geometry),
            (self.ids.planet, self.resources.planet_geometry),
            (self.ids.orbit, self.resources.ring_geometry),
        ];
        for (id, geometry) in pairs {
            if let Some(mesh) = scene.get_mut(id).and_then(|e| e.mesh.as_mut()) {
                mesh.geometry = geometry;
            }
        }
    }

    /// Detach the system from the graph, despawn its entities and free its
    /// resources.
    pub fn destroy(self, scene: &mut Scene, graph: &mut TransformGraph, resources: &mut ResourceRegistry) {
        let removed = graph.remove_subtree(self.ids.group);
        scene.despawn_many(&removed);
        self.resources.release(resources);
    }

    pub fn id(&self) -> &str {
        &self.params.id
    }
}

fn star_light(params: &VisualizationParams, layout: &SystemLayout, tuning: &VisualTuning) -> PointLight {
    PointLight::new(
        params.star_color.to_array(),
        tuning.light_intensity,
        tuning.light_range_factor * layout.orbital_distance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin::builtin_records;
    use crate::mapping::color::Color;
    use crate::mapping::units::DistanceConversion;

    fn params(i: usize) -> VisualizationParams {
        let tuning = VisualTuning::default();
        VisualizationParams::from_record(&builtin_records()[i], DistanceConversion::Identity, &tuning)
    }

    fn ids() -> EntryIds {
        EntryIds { group: EntityId(1), star: EntityId(2), planet: EntityId(3), orbit: EntityId(4) }
    }

    struct World {
        scene: Scene,
        graph: TransformGraph,
        tessellator: ShapeTessellator,
        resources: ResourceRegistry,
    }

    fn world() -> World {
        World {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            tessellator: ShapeTessellator::new(),
            resources: ResourceRegistry::new(),
        }
    }

    fn spawn(w: &mut World, p: VisualizationParams) -> SceneEntry {
        let tuning = VisualTuning::default();
        SceneEntry::spawn(p, ids(), 0.0, &tuning, &mut w.scene, &mut w.graph, &mut w.tessellator, &mut w.resources)
    }

    #[test]
    fn orbit_clears_star_and_planet() {
        let tuning = VisualTuning::default();
        let mut p = params(0);
        p.orbital_distance = 0.01;
        let layout = SystemLayout::from_params(&p, &tuning);
        let floor = 1.2 * (layout.star_radius + layout.planet_radius);
        assert!(layout.orbital_distance >= floor - 1e-6);
        assert!(layout.star_radius > layout.planet_radius);
    }

    #[test]
    fn spawn_builds_four_entities_under_one_group() {
        let mut w = world();
        let entry = spawn(&mut w, params(0));
        assert_eq!(w.scene.len(), 4);
        assert_eq!(w.graph.get_children(entry.ids.group).map(<[_]>::len), Some(3));
        assert_eq!(w.resources.live_geometries(), 3);
        assert_eq!(w.resources.live_materials(), 3);
        assert!(w.scene.get(entry.ids.star).and_then(|e| e.light).is_some());
    }

    #[test]
    fn color_change_keeps_geometry() {
        let mut w = world();
        let mut entry = spawn(&mut w, params(0));
        let before = entry.resources.clone();

        let mut next = params(0);
        next.planet_color = Color::from_hex(0x00ff00);
        let tuning = VisualTuning::default();
        let rebuilt = entry.update(next, &tuning, &mut w.scene, &mut w.tessellator, &mut w.resources);

        assert!(!rebuilt);
        assert_eq!(entry.resources, before);
        let material = w.resources.material(entry.resources.planet_material).unwrap();
        assert_eq!(material.color, Color::from_hex(0x00ff00));
    }

    #[test]
    fn size_change_rebuilds_geometry_without_leaking() {
        let mut w = world();
        let mut entry = spawn(&mut w, params(0));
        let old_star = entry.resources.star_geometry;

        let mut next = params(0);
        next.star_diameter *= 2.0;
        let tuning = VisualTuning::default();
        assert!(entry.update(next, &tuning, &mut w.scene, &mut w.tessellator, &mut w.resources));

        assert_ne!(entry.resources.star_geometry, old_star);
        assert!(w.resources.geometry(old_star).is_none());
        assert_eq!(w.resources.live_geometries(), 3);
        let mesh = w.scene.get(entry.ids.star).and_then(|e| e.mesh).unwrap();
        assert_eq!(mesh.geometry, entry.resources.star_geometry);
    }

    #[test]
    fn destroy_frees_everything() {
        let mut w = world();
        let entry = spawn(&mut w, params(2));
        entry.destroy(&mut w.scene, &mut w.graph, &mut w.resources);
        assert!(w.scene.is_empty());
        assert!(w.graph.is_empty());
        assert_eq!(w.resources.live_geometries(), 0);
        assert_eq!(w.resources.live_materials(), 0);
    }
}
