use crate::assets::registry::{GeometryHandle, MaterialHandle};

/// What a mesh depicts. Drives which render buffer it lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Star,
    Planet,
    OrbitRing,
}

impl MeshKind {
    /// Numeric tag written into mesh instances.
    pub fn wire_id(self) -> f32 {
        match self {
            MeshKind::Star => 0.0,
            MeshKind::Planet => 1.0,
            MeshKind::OrbitRing => 2.0,
        }
    }
}

/// Geometry + material pair, both owned by the
/// [`ResourceRegistry`](crate::assets::registry::ResourceRegistry).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub kind: MeshKind,
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
}

impl MeshComponent {
    pub fn new(kind: MeshKind, geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self { kind, geometry, material }
    }
}
