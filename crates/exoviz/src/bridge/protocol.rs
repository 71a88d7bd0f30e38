/// Frame buffer layout shared with the TypeScript renderer.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 20 floats]
/// [Meshes: max_instances × 12 floats]
/// [Rings: max_ring_vertices × 8 floats]
/// [Lights: max_lights × 8 floats]
/// [Stars: max_stars × 8 floats]
/// ```
///
/// Capacities are written into the header every frame alongside the
/// counts, so the reader can compute offsets without any other channel.

use crate::api::config::ViewerConfig;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::{MeshInstance, RingVertex, StarInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_TRANSLUCENT_START: usize = 4;
pub const HEADER_MAX_RING_VERTICES: usize = 5;
pub const HEADER_RING_VERTEX_COUNT: usize = 6;
pub const HEADER_MAX_LIGHTS: usize = 7;
pub const HEADER_LIGHT_COUNT: usize = 8;
pub const HEADER_MAX_STARS: usize = 9;
pub const HEADER_STAR_COUNT: usize = 10;
pub const HEADER_AMBIENT: usize = 11;
pub const HEADER_DIRECTIONAL_X: usize = 12;
pub const HEADER_DIRECTIONAL_Y: usize = 13;
pub const HEADER_DIRECTIONAL_Z: usize = 14;
pub const HEADER_DIRECTIONAL_INTENSITY: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per point light: x, y, z, r, g, b, intensity, range (wire format, never changes).
pub const LIGHT_FLOATS: usize = 8;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_ring_vertices: usize,
    pub max_lights: usize,
    pub max_stars: usize,

    /// Offset (in floats) where camera data begins.
    pub camera_offset: usize,
    /// Offset (in floats) where mesh instance data begins.
    pub mesh_data_offset: usize,
    /// Offset (in floats) where ring vertex data begins.
    pub ring_data_offset: usize,
    /// Offset (in floats) where light data begins.
    pub light_data_offset: usize,
    /// Offset (in floats) where star data begins.
    pub star_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_ring_vertices: usize, max_lights: usize, max_stars: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let mesh_data_offset = camera_offset + CameraUniform::FLOATS;
        let ring_data_offset = mesh_data_offset + max_instances * MeshInstance::FLOATS;
        let light_data_offset = ring_data_offset + max_ring_vertices * RingVertex::FLOATS;
        let star_data_offset = light_data_offset + max_lights * LIGHT_FLOATS;
        let buffer_total_floats = star_data_offset + max_stars * StarInstance::FLOATS;

        Self {
            max_instances,
            max_ring_vertices,
            max_lights,
            max_stars,
            camera_offset,
            mesh_data_offset,
            ring_data_offset,
            light_data_offset,
            star_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a ViewerConfig.
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_ring_vertices,
            config.max_lights,
            config.background_stars,
        )
    }
}

/// Per-frame counts and globals written into the header.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameCounts {
    pub instances: usize,
    pub translucent_start: usize,
    pub ring_vertices: usize,
    pub lights: usize,
    pub stars: usize,
    pub ambient: f32,
    /// Directional light position (x, y, z) and intensity.
    pub directional: [f32; 4],
}

/// Build the header for one frame.
pub fn write_header(layout: &ProtocolLayout, frame: u64, counts: &FrameCounts) -> [f32; HEADER_FLOATS] {
    let mut header = [0.0; HEADER_FLOATS];
    header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    header[HEADER_FRAME_COUNTER] = frame as f32;
    header[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
    header[HEADER_INSTANCE_COUNT] = counts.instances as f32;
    header[HEADER_TRANSLUCENT_START] = counts.translucent_start as f32;
    header[HEADER_MAX_RING_VERTICES] = layout.max_ring_vertices as f32;
    header[HEADER_RING_VERTEX_COUNT] = counts.ring_vertices as f32;
    header[HEADER_MAX_LIGHTS] = layout.max_lights as f32;
    header[HEADER_LIGHT_COUNT] = counts.lights as f32;
    header[HEADER_MAX_STARS] = layout.max_stars as f32;
    header[HEADER_STAR_COUNT] = counts.stars as f32;
    header[HEADER_AMBIENT] = counts.ambient;
    header[HEADER_DIRECTIONAL_X..=HEADER_DIRECTIONAL_INTENSITY].copy_from_slice(&counts.directional);
    header
}
