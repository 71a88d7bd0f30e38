//! Owner of every geometry and material the viewer allocates.
//!
//! Scene entities hold handles only. Releasing through the registry is the
//! single path for freeing GPU-side data, and the live counts let teardown
//! be checked for leaks.

use std::collections::HashMap;
use glam::Vec3;
use crate::mapping::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(u32);

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// UV sphere of the given radius.
    Sphere { radius: f32, segments: u32 },
    /// Flat annulus in the XZ plane, pre-tessellated into a triangle list.
    Ring { inner: f32, outer: f32, vertices: Vec<Vec3> },
    /// Flat polygon in the XY plane, pre-tessellated into a triangle list.
    Shape { vertices: Vec<Vec3> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub opacity: f32,
    /// Self-illumination multiplier (stars glow, planets don't).
    pub emissive: f32,
    /// Phong specular exponent.
    pub shininess: f32,
}

impl Material {
    pub fn basic(color: Color, opacity: f32) -> Self {
        Self { color, opacity, emissive: 0.0, shininess: 0.0 }
    }

    pub fn phong(color: Color, shininess: f32) -> Self {
        Self { color, opacity: 1.0, emissive: 0.0, shininess }
    }

    pub fn glowing(color: Color, emissive: f32) -> Self {
        Self { color, opacity: 1.0, emissive, shininess: 0.0 }
    }
}

#[derive(Debug, Default)]
pub struct ResourceRegistry {
    geometries: HashMap<GeometryHandle, Geometry>,
    materials: HashMap<MaterialHandle, Material>,
    next_id: u32,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn create_geometry(&mut self, geometry: Geometry) -> GeometryHandle {
        let handle = GeometryHandle(self.next());
        self.geometries.insert(handle, geometry);
        handle
    }

    pub fn create_material(&mut self, material: Material) -> MaterialHandle {
        let handle = MaterialHandle(self.next());
        self.materials.insert(handle, material);
        handle
    }

    pub fn geometry(&self, handle: GeometryHandle) -> Option<&Geometry> {
        self.geometries.get(&handle)
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(&handle)
    }

    pub fn material_mut(&mut self, handle: MaterialHandle) -> Option<&mut Material> {
        self.materials.get_mut(&handle)
    }

    /// Returns false if the handle was already released.
    pub fn release_geometry(&mut self, handle: GeometryHandle) -> bool {
        self.geometries.remove(&handle).is_some()
    }

    /// Returns false if the handle was already released.
    pub fn release_material(&mut self, handle: MaterialHandle) -> bool {
        self.materials.remove(&handle).is_some()
    }

    pub fn live_geometries(&self) -> usize {
        self.geometries.len()
    }

    pub fn live_materials(&self) -> usize {
        self.materials.len()
    }

    /// Drop everything. Handles stay unique across a clear.
    pub fn clear(&mut self) {
        self.geometries.clear();
        self.materials.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_release() {
        let mut reg = ResourceRegistry::new();
        let g = reg.create_geometry(Geometry::Sphere { radius: 1.0, segments: 32 });
        let m = reg.create_material(Material::phong(Color::WHITE, 30.0));
        assert_eq!(reg.live_geometries(), 1);
        assert_eq!(reg.live_materials(), 1);

        assert!(reg.release_geometry(g));
        assert!(!reg.release_geometry(g));
        assert!(reg.release_material(m));
        assert_eq!(reg.live_geometries() + reg.live_materials(), 0);
    }

    #[test]
    fn handles_are_not_reused() {
        let mut reg = ResourceRegistry::new();
        let a = reg.create_material(Material::basic(Color::WHITE, 1.0));
        reg.clear();
        let b = reg.create_material(Material::basic(Color::WHITE, 1.0));
        assert_ne!(a, b);
    }

    #[test]
    fn material_mut_updates_in_place() {
        let mut reg = ResourceRegistry::new();
        let m = reg.create_material(Material::basic(Color::WHITE, 1.0));
        if let Some(mat) = reg.material_mut(m) {
            mat.opacity = 0.4;
        }
        assert_eq!(reg.material(m).map(|m| m.opacity), Some(0.4));
    }
}
