use bytemuck::{Pod, Zeroable};

/// Per-instance sphere data read by the renderer.
/// 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// World-space radius (already includes any scale pulse).
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub opacity: f32,
    /// Spin around the local Y axis, radians.
    pub spin: f32,
    /// HDR glow multiplier.
    pub emissive: f32,
    /// Phong specular exponent.
    pub shininess: f32,
    /// 0 = star, 1 = planet.
    pub kind: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One orbit-ring triangle vertex, world space.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RingVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    _pad: f32,
}

impl RingVertex {
    pub const FLOATS: usize = 8;

    pub fn new(pos: [f32; 3], color: [f32; 3], a: f32) -> Self {
        Self { x: pos[0], y: pos[1], z: pos[2], r: color[0], g: color[1], b: color[2], a, _pad: 0.0 }
    }
}

/// One background star, drawn as a billboarded star shape.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StarInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub size: f32,
    /// Roll around the view axis, radians.
    pub roll: f32,
    pub opacity: f32,
    _pad: [f32; 2],
}

impl StarInstance {
    pub const FLOATS: usize = 8;

    pub fn new(pos: [f32; 3], size: f32, roll: f32, opacity: f32) -> Self {
        Self { x: pos[0], y: pos[1], z: pos[2], size, roll, opacity, _pad: [0.0; 2] }
    }
}

/// Everything the renderer reads for one frame. Each section is capped at
/// the capacity it was created with; overflow is dropped.
pub struct FrameBuffers {
    pub meshes: Vec<MeshInstance>,
    pub rings: Vec<RingVertex>,
    pub stars: Vec<StarInstance>,
    /// Meshes [0..translucent_start) are opaque; the rest need blending.
    pub translucent_start: u32,
    max_meshes: usize,
    max_ring_vertices: usize,
}

impl FrameBuffers {
    pub fn with_capacity(max_meshes: usize, max_ring_vertices: usize, max_stars: usize) -> Self {
        Self {
            meshes: Vec::with_capacity(max_meshes),
            rings: Vec::with_capacity(max_ring_vertices),
            stars: Vec::with_capacity(max_stars),
            translucent_start: 0,
            max_meshes,
            max_ring_vertices,
        }
    }

    pub fn clear(&mut self) {
        self.meshes.clear();
        self.rings.clear();
        self.stars.clear();
        self.translucent_start = 0;
    }

    /// Returns false once the mesh section is full.
    pub fn push_mesh(&mut self, instance: MeshInstance) -> bool {
        if self.meshes.len() >= self.max_meshes {
            return false;
        }
        self.meshes.push(instance);
        true
    }

    /// Appends a whole triangle list or nothing, so a ring is never cut mid-triangle.
    pub fn push_ring(&mut self, vertices: impl ExactSizeIterator<Item = RingVertex>) -> bool {
        if self.rings.len() + vertices.len() > self.max_ring_vertices {
            return false;
        }
        self.rings.extend(vertices);
        true
    }

    pub fn meshes_ptr(&self) -> *const f32 {
        self.meshes.as_ptr() as *const f32
    }

    pub fn rings_ptr(&self) -> *const f32 {
        self.rings.as_ptr() as *const f32
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.stars.as_ptr() as *const f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_sizes() {
        assert_eq!(std::mem::size_of::<MeshInstance>(), MeshInstance::STRIDE_BYTES);
        assert_eq!(std::mem::size_of::<RingVertex>(), RingVertex::FLOATS * 4);
        assert_eq!(std::mem::size_of::<StarInstance>(), StarInstance::FLOATS * 4);
    }

    #[test]
    fn mesh_section_is_capped() {
        let mut buffers = FrameBuffers::with_capacity(2, 0, 0);
        assert!(buffers.push_mesh(MeshInstance::default()));
        assert!(buffers.push_mesh(MeshInstance::default()));
        assert!(!buffers.push_mesh(MeshInstance::default()));
        assert_eq!(buffers.meshes.len(), 2);
    }

    #[test]
    fn ring_section_never_splits_a_ring() {
        let mut buffers = FrameBuffers::with_capacity(0, 5, 0);
        let tri = [RingVertex::default(); 3];
        assert!(buffers.push_ring(tri.into_iter()));
        assert!(!buffers.push_ring(tri.into_iter()));
        assert_eq!(buffers.rings.len(), 3);
    }
}
