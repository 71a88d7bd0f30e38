//! Focus styling. With nothing focused every system is drawn as-is; with a
//! focus, every other system is greyed out and faded.

use crate::api::config::VisualTuning;
use crate::assets::registry::ResourceRegistry;
use crate::mapping::color::Color;
use crate::mapping::params::VisualizationParams;
use crate::viewer::entry::SceneEntry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemStyle {
    pub star_color: Color,
    pub planet_color: Color,
    /// Shared by star and planet.
    pub opacity: f32,
    pub ring_color: Color,
    /// Rings of dimmed systems sit at a fixed floor instead of pulsing.
    pub dimmed: bool,
}

pub fn style_for(params: &VisualizationParams, focused: Option<&str>, tuning: &VisualTuning) -> SystemStyle {
    let dimmed = focused.is_some_and(|id| id != params.id);
    if dimmed {
        SystemStyle {
            star_color: tuning.dimmed_color,
            planet_color: tuning.dimmed_color,
            opacity: tuning.dimmed_opacity,
            ring_color: params.planet_color,
            dimmed: true,
        }
    } else {
        SystemStyle {
            star_color: params.star_color,
            planet_color: params.planet_color,
            opacity: 1.0,
            ring_color: params.planet_color,
            dimmed: false,
        }
    }
}

/// Orbit ring opacity for the system at `index` at `clock` seconds.
pub fn ring_opacity(index: usize, clock: f32, dimmed: bool, tuning: &VisualTuning) -> f32 {
    if dimmed {
        return tuning.ring_dimmed_opacity;
    }
    let wave = tuning.ring_base_opacity + tuning.ring_pulse_amplitude * (clock * tuning.ring_pulse_rate + index as f32).sin();
    wave.max(tuning.ring_pulse_floor)
}

/// Write a style into the entry's materials. Ring opacity is left to the
/// per-tick pulse.
pub fn apply_style(entry: &SceneEntry, style: &SystemStyle, resources: &mut ResourceRegistry) {
    if let Some(m) = resources.material_mut(entry.resources.star_material) {
        m.color = style.star_color;
        m.opacity = style.opacity;
    }
    if let Some(m) = resources.material_mut(entry.resources.planet_material) {
        m.color = style.planet_color;
        m.opacity = style.opacity;
    }
    if let Some(m) = resources.material_mut(entry.resources.ring_material) {
        m.color = style.ring_color;
    }
}
