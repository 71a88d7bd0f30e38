//! Pointer picking against planet spheres.

use crate::core::scene::Scene;
use crate::renderer::camera::Ray;
use crate::viewer::entry::SceneEntry;

/// Identifier of the nearest planet hit by `ray`. Stars and orbit rings
/// are never pickable.
pub fn pick_planet<'a>(ray: &Ray, entries: impl IntoIterator<Item = &'a SceneEntry>, scene: &Scene) -> Option<&'a str> {
    let mut best: Option<(f32, &'a str)> = None;
    for entry in entries {
        let Some(planet) = scene.get(entry.ids.planet).filter(|e| e.active) else { continue };
        let radius = entry.layout.planet_radius * planet.scale.x;
        let Some(t) = ray.intersect_sphere(planet.pos, radius) else { continue };
        if best.map_or(true, |(nearest, _)| t < nearest) {
            best = Some((t, entry.id()));
        }
    }
    best.map(|(_, id)| id)
}
