use crate::assets::registry::{Geometry, ResourceRegistry};
use crate::components::entity::Entity;
use crate::components::mesh::MeshKind;
use crate::renderer::instance::{FrameBuffers, MeshInstance, RingVertex};
use crate::systems::lighting::LightState;

/// Fill the mesh and ring sections from a set of entities.
/// Opaque spheres go first, translucent ones after `translucent_start`.
pub fn build_frame_buffers<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    resources: &ResourceRegistry,
    buffers: &mut FrameBuffers,
) {
    let mut opaque: Vec<MeshInstance> = Vec::new();
    let mut translucent: Vec<MeshInstance> = Vec::new();

    for entity in entities {
        if !entity.active {
            continue;
        }
        let Some(mesh) = &entity.mesh else { continue };
        let (Some(geometry), Some(material)) = (resources.geometry(mesh.geometry), resources.material(mesh.material))
        else {
            continue;
        };

        match (mesh.kind, geometry) {
            (MeshKind::Star | MeshKind::Planet, Geometry::Sphere { radius, .. }) => {
                let instance = MeshInstance {
                    x: entity.pos.x,
                    y: entity.pos.y,
                    z: entity.pos.z,
                    radius: radius * entity.scale.x,
                    r: material.color.r,
                    g: material.color.g,
                    b: material.color.b,
                    opacity: material.opacity,
                    spin: entity.rotation.y,
                    emissive: material.emissive,
                    shininess: material.shininess,
                    kind: mesh.kind.wire_id(),
                };
                if material.opacity < 1.0 {
                    translucent.push(instance);
                } else {
                    opaque.push(instance);
                }
            }
            (MeshKind::OrbitRing, Geometry::Ring { vertices, .. }) => {
                let color = material.color.to_array();
                let placed = vertices
                    .iter()
                    .map(|v| RingVertex::new((*v * entity.scale + entity.pos).to_array(), color, material.opacity));
                if !buffers.push_ring(placed) {
                    log::warn!("ring buffer full, dropping orbit of {}", entity.tag);
                }
            }
            _ => {}
        }
    }

    for instance in opaque {
        buffers.push_mesh(instance);
    }
    buffers.translucent_start = buffers.meshes.len() as u32;
    for instance in translucent {
        buffers.push_mesh(instance);
    }
}

/// Collect entity-attached point lights at their world positions.
pub fn collect_lights<'a>(entities: impl Iterator<Item = &'a Entity>, lights: &mut LightState) {
    lights.clear();
    for entity in entities.filter(|e| e.active) {
        if let Some(light) = entity.light {
            lights.add(light.with_pos(entity.pos));
        }
    }
}
