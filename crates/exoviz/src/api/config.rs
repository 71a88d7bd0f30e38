//! Viewer configuration.
//!
//! Everything has a default; the host may override any subset via JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extensions::easing::Easing;
use crate::mapping::color::Color;
use crate::mapping::units::DistanceConversion;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid viewer config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid viewer config: `{field}` must be a positive number")]
    NotPositive { field: &'static str },
}

/// Buffer capacities, timing and tuning for one viewer instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum star + planet mesh instances per frame.
    pub max_instances: usize,
    /// Maximum orbit ring vertices per frame.
    pub max_ring_vertices: usize,
    /// Maximum point lights.
    pub max_lights: usize,
    /// Number of background stars.
    pub background_stars: usize,
    /// Seed for background star placement.
    pub starfield_seed: u64,
    /// Maximum viewer events buffered between drains.
    pub max_events: usize,
    /// How catalog orbital radii become scene distances.
    pub distance_conversion: DistanceConversion,
    pub tuning: VisualTuning,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_instances: 32,
            max_ring_vertices: 16384,
            max_lights: 8,
            background_stars: 1000,
            starfield_seed: 0x5EED_CAFE,
            max_events: 32,
            distance_conversion: DistanceConversion::default(),
            tuning: VisualTuning::default(),
        }
    }
}

impl ViewerConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.tuning;
        let checks: [(&'static str, f32); 9] = [
            ("fixed_dt", self.fixed_dt),
            ("tuning.time_scale", t.time_scale),
            ("tuning.distance_linear_scale", t.distance_linear_scale),
            ("tuning.distance_cutoff", t.distance_cutoff),
            ("tuning.distance_log_offset", t.distance_log_offset),
            ("tuning.camera_fov_deg", t.camera_fov_deg),
            ("tuning.transition_step", t.transition_step),
            ("tuning.ring_tolerance", t.ring_tolerance),
            ("tuning.planet_max_diameter", t.planet_max_diameter),
        ];
        for (field, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field });
            }
        }
        if !(t.distance_log_base.is_finite() && t.distance_log_base > 1.0) {
            return Err(ConfigError::NotPositive { field: "tuning.distance_log_base" });
        }
        Ok(())
    }
}

/// Visual constants. Rates are per second of viewer time; the defaults
/// reproduce the classic 60 fps look at `fixed_dt = 1/60`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualTuning {
    // ── Motion ──
    /// Orbit-days advanced per second. A planet with period `P` days sweeps
    /// `2π · time_scale / P` radians per second.
    pub time_scale: f32,
    /// Planet self-rotation (rad/s).
    pub planet_spin: f32,
    /// Star self-rotation (rad/s).
    pub star_spin: f32,
    /// Star scale pulse: `1 + amplitude · sin(clock · rate + index)`.
    pub star_pulse_amplitude: f32,
    pub star_pulse_rate: f32,

    // ── Sizes ──
    /// Star diameter = base + scale · stellar radius (solar radii).
    pub star_base_diameter: f32,
    pub star_diameter_scale: f32,
    /// Planet diameter = scale · planet radius (Earth radii), capped.
    pub planet_diameter_scale: f32,
    pub planet_max_diameter: f32,

    // ── Orbital distance ──
    /// Linear scene units per catalog distance unit below the cutoff.
    pub distance_linear_scale: f32,
    /// Catalog distance where the linear regime ends.
    pub distance_cutoff: f32,
    /// Logarithm base of the compressed regime.
    pub distance_log_base: f32,
    /// Offset added inside the logarithm.
    pub distance_log_offset: f32,
    /// Orbits are pushed out to at least this multiple of (star + planet radius).
    pub min_separation_factor: f32,

    // ── Orbit rings ──
    pub ring_half_width: f32,
    /// Lyon flattening tolerance for ring tessellation.
    pub ring_tolerance: f32,
    pub ring_base_opacity: f32,
    pub ring_pulse_amplitude: f32,
    pub ring_pulse_rate: f32,
    pub ring_pulse_floor: f32,
    pub ring_dimmed_opacity: f32,

    // ── Focus styling ──
    pub dimmed_color: Color,
    pub dimmed_opacity: f32,

    // ── Camera ──
    pub camera_fov_deg: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    pub camera_elevation_deg: f32,
    /// Distance used when there is nothing to frame.
    pub default_camera_distance: f32,
    pub overview_min_orbit: f32,
    pub overview_padding: f32,
    pub overview_margin: f32,
    pub overview_min_distance: f32,
    pub focus_padding: f32,
    pub focus_min_extent: f32,
    pub focus_margin: f32,
    /// Transition progress added per tick.
    pub transition_step: f32,
    pub transition_easing: Easing,
    /// Retargets closer than this snap instead of animating.
    pub retarget_epsilon: f32,

    // ── Lights ──
    pub light_intensity: f32,
    /// Point light range = factor · orbital distance.
    pub light_range_factor: f32,
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    pub directional_position: [f32; 3],

    // ── Starfield ──
    /// Edge length of the cube the background stars are scattered in.
    pub starfield_extent: f32,
    pub twinkle_base: f32,
    pub twinkle_amplitude: f32,
    pub twinkle_rate: f32,
    /// Phase offset between consecutive stars.
    pub twinkle_phase_step: f32,
    pub twinkle_floor: f32,
    /// Background star roll (rad/s).
    pub star_roll: f32,
}

impl Default for VisualTuning {
    fn default() -> Self {
        Self {
            time_scale: 60.0,
            planet_spin: 1.8,
            star_spin: 0.3,
            star_pulse_amplitude: 0.05,
            star_pulse_rate: 1.2,

            star_base_diameter: 1.6,
            star_diameter_scale: 1.2,
            planet_diameter_scale: 0.35,
            planet_max_diameter: 1.4,

            distance_linear_scale: 10.0,
            distance_cutoff: 2.0,
            distance_log_base: 2.0,
            distance_log_offset: 1.0,
            min_separation_factor: 1.2,

            ring_half_width: 0.02,
            ring_tolerance: 0.01,
            ring_base_opacity: 0.2,
            ring_pulse_amplitude: 0.1,
            ring_pulse_rate: 0.3,
            ring_pulse_floor: 0.1,
            ring_dimmed_opacity: 0.05,

            dimmed_color: Color::from_hex(0x606060),
            dimmed_opacity: 0.4,

            camera_fov_deg: 60.0,
            camera_near: 0.1,
            camera_far: 1000.0,
            camera_elevation_deg: 50.0,
            default_camera_distance: 25.0,
            overview_min_orbit: 5.0,
            overview_padding: 3.0,
            overview_margin: 15.0,
            overview_min_distance: 40.0,
            focus_padding: 2.5,
            focus_min_extent: 8.0,
            focus_margin: 5.0,
            transition_step: 0.02,
            transition_easing: Easing::SmoothStep,
            retarget_epsilon: 0.1,

            light_intensity: 2.0,
            light_range_factor: 3.0,
            ambient_intensity: 0.3,
            directional_intensity: 0.5,
            directional_position: [10.0, 10.0, 10.0],

            starfield_extent: 200.0,
            twinkle_base: 0.6,
            twinkle_amplitude: 0.4,
            twinkle_rate: 0.18,
            twinkle_phase_step: 0.1,
            twinkle_floor: 0.2,
            star_roll: 0.06,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{ "background_stars": 10, "tuning": { "time_scale": 30.0 } }"#)
            .unwrap();
        assert_eq!(config.background_stars, 10);
        assert_eq!(config.tuning.time_scale, 30.0);
        assert_eq!(config.tuning.camera_fov_deg, 60.0);
        assert_eq!(config.max_lights, 8);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(ViewerConfig::from_json("{}").unwrap(), ViewerConfig::default());
    }

    #[test]
    fn rejects_non_positive_rates() {
        let err = ViewerConfig::from_json(r#"{ "tuning": { "time_scale": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "tuning.time_scale" }));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(ViewerConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn dimmed_color_accepts_css_hex() {
        let config = ViewerConfig::from_json(r##"{ "tuning": { "dimmed_color": "#404040" } }"##).unwrap();
        assert_eq!(config.tuning.dimmed_color.to_hex(), 0x404040);
    }

    #[test]
    fn distance_conversion_is_configurable() {
        let config =
            ViewerConfig::from_json(r#"{ "distance_conversion": { "kind": "solar_radii_to_au" } }"#).unwrap();
        assert_eq!(config.distance_conversion, DistanceConversion::SolarRadiiToAu);
    }
}
