//! Physical units → scene units.

use serde::{Deserialize, Serialize};

use crate::api::config::VisualTuning;

/// Solar radii per astronomical unit.
pub const SOLAR_RADII_PER_AU: f64 = 215.0;

/// How a catalog orbital radius becomes the distance fed to the display
/// transform.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistanceConversion {
    /// Use the catalog value as-is.
    #[default]
    Identity,
    /// Multiply by a constant factor.
    Scaled { factor: f64 },
    /// Treat the catalog value as solar radii and convert to AU.
    SolarRadiiToAu,
}

impl DistanceConversion {
    pub fn convert(self, value: f64) -> f64 {
        match self {
            DistanceConversion::Identity => value,
            DistanceConversion::Scaled { factor } => value * factor,
            DistanceConversion::SolarRadiiToAu => solar_radii_to_au(value),
        }
    }
}

pub fn solar_radii_to_au(solar_radii: f64) -> f64 {
    solar_radii / SOLAR_RADII_PER_AU
}

// ── Display transforms ──

/// Star display diameter from stellar radius (solar radii).
pub fn star_display_diameter(stellar_radius: f64, tuning: &VisualTuning) -> f32 {
    tuning.star_base_diameter + tuning.star_diameter_scale * stellar_radius.max(0.0) as f32
}

/// Planet display diameter from planet radius (Earth radii), capped so a
/// giant planet never swallows its star.
pub fn planet_display_diameter(planet_radius: f64, tuning: &VisualTuning) -> f32 {
    (tuning.planet_diameter_scale * planet_radius.max(0.0) as f32).min(tuning.planet_max_diameter)
}

/// Hybrid linear/log distance compression.
///
/// Linear (`r · scale`) up to the cutoff, logarithmic past it. The two pieces
/// meet at the cutoff, and the result is strictly increasing for `r ≥ 0`.
pub fn compress_orbital_distance(distance: f64, tuning: &VisualTuning) -> f32 {
    let r = distance.max(0.0) as f32;
    let cutoff = tuning.distance_cutoff;
    let scale = tuning.distance_linear_scale;
    if r <= cutoff {
        return r * scale;
    }
    let offset = tuning.distance_log_offset;
    let grow = ((r + offset) / (cutoff + offset)).log(tuning.distance_log_base);
    cutoff * scale + scale * grow
}
