//! Lyon-based CPU tessellation of the flat shapes in the scene: orbit ring
//! annuli and the background star outline.
//!
//! Output is a flat triangle list (indices already resolved), ready to be
//! stored as [`Geometry`](crate::assets::registry::Geometry) and copied
//! into frame buffers.

use std::f32::consts::TAU;

use glam::Vec3;
use log::warn;
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, FillVertexConstructor,
    VertexBuffers,
};

/// Vertex constructor that keeps only the 2D position.
struct PlaneVertexCtor;

impl FillVertexConstructor<[f32; 2]> for PlaneVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> [f32; 2] {
        vertex.position().to_array()
    }
}

/// Reusable fill tessellator plus scratch buffers.
pub struct ShapeTessellator {
    fill_tess: FillTessellator,
    geometry: VertexBuffers<[f32; 2], u32>,
}

impl ShapeTessellator {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            geometry: VertexBuffers::new(),
        }
    }

    /// Annulus centered on the origin in the XZ plane (the orbital plane).
    pub fn ring(&mut self, inner: f32, outer: f32, tolerance: f32) -> Vec<Vec3> {
        if !(inner >= 0.0 && outer > inner) {
            warn!("degenerate ring {inner}..{outer}");
            return Vec::new();
        }
        let mut builder = Path::builder();
        builder.add_circle(point(0.0, 0.0), outer, Winding::Positive);
        if inner > 0.0 {
            builder.add_circle(point(0.0, 0.0), inner, Winding::Negative);
        }
        let path = builder.build();
        self.fill(&path, tolerance, |[x, y]| Vec3::new(x, 0.0, y))
    }

    /// `points`-pointed star outline in the XY plane, alternating between
    /// the outer and inner radius.
    pub fn star_outline(&mut self, points: u32, outer: f32, inner: f32) -> Vec<Vec3> {
        let corners = points.max(2) * 2;
        let mut builder = Path::builder();
        for i in 0..corners {
            let angle = i as f32 / corners as f32 * TAU;
            let radius = if i % 2 == 0 { outer } else { inner };
            let p = point(angle.cos() * radius, angle.sin() * radius);
            if i == 0 {
                builder.begin(p);
            } else {
                builder.line_to(p);
            }
        }
        builder.close();
        let path = builder.build();
        self.fill(&path, 0.01, |[x, y]| Vec3::new(x, y, 0.0))
    }

    fn fill(&mut self, path: &Path, tolerance: f32, place: impl Fn([f32; 2]) -> Vec3) -> Vec<Vec3> {
        self.geometry.vertices.clear();
        self.geometry.indices.clear();

        let options = FillOptions::tolerance(tolerance).with_fill_rule(FillRule::EvenOdd);
        let result = self.fill_tess.tessellate_path(
            path,
            &options,
            &mut BuffersBuilder::new(&mut self.geometry, PlaneVertexCtor),
        );
        if let Err(err) = result {
            warn!("shape tessellation failed: {err:?}");
            return Vec::new();
        }

        self.geometry
            .indices
            .iter()
            .map(|&i| place(self.geometry.vertices[i as usize]))
            .collect()
    }
}

impl Default for ShapeTessellator {
    fn default() -> Self {
        Self::new()
    }
}
