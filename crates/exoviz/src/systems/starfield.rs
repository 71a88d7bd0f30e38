//! Twinkling background stars.
//!
//! All stars share one outline geometry and one material; per-star position,
//! roll and opacity live here and are written straight into the frame's star
//! buffer.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::api::config::VisualTuning;
use crate::assets::registry::{Geometry, GeometryHandle, Material, MaterialHandle, ResourceRegistry};
use crate::mapping::color::Color;
use crate::renderer::instance::StarInstance;
use crate::systems::rng::Rng;
use crate::systems::tessellate::ShapeTessellator;

/// Outline of every background star.
const STAR_POINTS: u32 = 9;
const STAR_OUTER_RADIUS: f32 = 0.35;
const STAR_INNER_RADIUS: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundStar {
    pub pos: Vec3,
    /// Per-star scale of the shared outline.
    pub size: f32,
    pub roll: f32,
    pub opacity: f32,
}

pub struct Starfield {
    stars: Vec<BackgroundStar>,
    geometry: Option<GeometryHandle>,
    material: Option<MaterialHandle>,
}

impl Starfield {
    /// Scatter `count` stars uniformly in a cube of edge `extent` centered on
    /// the origin and register the shared geometry and material.
    pub fn new(
        count: usize,
        extent: f32,
        seed: u64,
        tessellator: &mut ShapeTessellator,
        resources: &mut ResourceRegistry,
    ) -> Self {
        let mut rng = Rng::new(seed);
        let half = extent / 2.0;
        let stars = (0..count)
            .map(|_| BackgroundStar {
                pos: Vec3::new(rng.range(-half, half), rng.range(-half, half), rng.range(-half, half)),
                size: rng.range(0.6, 1.4),
                roll: rng.range(0.0, TAU),
                opacity: 1.0,
            })
            .collect();

        let outline = tessellator.star_outline(STAR_POINTS, STAR_OUTER_RADIUS, STAR_INNER_RADIUS);
        let geometry = resources.create_geometry(Geometry::Shape { vertices: outline });
        let material = resources.create_material(Material::basic(Color::WHITE, 1.0));

        Self { stars, geometry: Some(geometry), material: Some(material) }
    }

    pub fn stars(&self) -> &[BackgroundStar] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Star `i`'s opacity at `clock` seconds: a sine twinkle with a per-star
    /// phase, never dropping below the floor.
    pub fn twinkle(i: usize, clock: f32, tuning: &VisualTuning) -> f32 {
        let phase = i as f32 * tuning.twinkle_phase_step;
        let wave = tuning.twinkle_base + tuning.twinkle_amplitude * (clock * tuning.twinkle_rate + phase).sin();
        wave.max(tuning.twinkle_floor)
    }

    pub fn tick(&mut self, clock: f32, dt: f32, tuning: &VisualTuning) {
        for (i, star) in self.stars.iter_mut().enumerate() {
            star.opacity = Self::twinkle(i, clock, tuning);
            star.roll = (star.roll + tuning.star_roll * dt) % TAU;
        }
    }

    pub fn write(&self, out: &mut Vec<StarInstance>) {
        out.extend(
            self.stars
                .iter()
                .map(|s| StarInstance::new(s.pos.to_array(), s.size, s.roll, s.opacity)),
        );
    }

    /// Release the shared geometry and material. Idempotent.
    pub fn dispose(&mut self, resources: &mut ResourceRegistry) {
        if let Some(geometry) = self.geometry.take() {
            resources.release_geometry(geometry);
        }
        if let Some(material) = self.material.take() {
            resources.release_material(material);
        }
        self.stars.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(count: usize) -> (Starfield, ResourceRegistry) {
        let mut resources = ResourceRegistry::new();
        let mut tess = ShapeTessellator::new();
        let field = Starfield::new(count, 200.0, 42, &mut tess, &mut resources);
        (field, resources)
    }

    #[test]
    fn stars_fill_the_cube() {
        let (field, _) = field(1000);
        assert_eq!(field.len(), 1000);
        assert!(field.stars().iter().all(|s| s.pos.abs().max_element() <= 100.0));
    }

    #[test]
    fn twinkle_respects_floor_and_ceiling() {
        let tuning = VisualTuning::default();
        for i in 0..200 {
            for step in 0..50 {
                let o = Starfield::twinkle(i, step as f32 * 0.7, &tuning);
                assert!(o >= tuning.twinkle_floor && o <= tuning.twinkle_base + tuning.twinkle_amplitude);
            }
        }
    }

    #[test]
    fn tick_varies_opacity_between_stars() {
        let (mut field, _) = field(20);
        field.tick(3.0, 1.0 / 60.0, &VisualTuning::default());
        let first = field.stars()[0].opacity;
        assert!(field.stars().iter().any(|s| (s.opacity - first).abs() > 1e-3));
    }

    #[test]
    fn dispose_releases_shared_resources() {
        let (mut field, mut resources) = field(10);
        assert_eq!(resources.live_geometries(), 1);
        field.dispose(&mut resources);
        field.dispose(&mut resources);
        assert_eq!(resources.live_geometries() + resources.live_materials(), 0);
        assert!(field.is_empty());
    }
}
