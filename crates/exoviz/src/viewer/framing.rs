//! Camera distance policy. The camera always looks at the shared origin
//! from a fixed elevation; only its distance depends on the scene.

use glam::Vec3;

use crate::api::config::VisualTuning;
use crate::viewer::entry::SystemLayout;

/// How far the camera should sit from the origin.
///
/// - nothing to show: the default distance
/// - a focused system that is present: fit that system's orbit plus its
///   star and planet radii
/// - otherwise: fit the widest orbit of all systems
///
/// Both fitted cases have a floor.
pub fn framing_distance<'a>(
    layouts: impl IntoIterator<Item = (&'a str, &'a SystemLayout)>,
    focused: Option<&str>,
    tuning: &VisualTuning,
) -> f32 {
    let mut widest: Option<f32> = None;
    let mut focus_extent: Option<f32> = None;

    for (id, layout) in layouts {
        widest = Some(widest.map_or(layout.orbital_distance, |w: f32| w.max(layout.orbital_distance)));
        if focused == Some(id) {
            focus_extent = Some(layout.orbital_distance + layout.star_radius + layout.planet_radius);
        }
    }

    match (focus_extent, widest) {
        (Some(extent), _) => (extent * tuning.focus_padding).max(tuning.focus_min_extent) + tuning.focus_margin,
        (None, Some(orbit)) => {
            let fitted = orbit.max(tuning.overview_min_orbit) * tuning.overview_padding + tuning.overview_margin;
            fitted.max(tuning.overview_min_distance)
        }
        (None, None) => tuning.default_camera_distance,
    }
}

/// Camera position at `distance` from the origin, raised by the configured
/// elevation above the orbital plane.
pub fn camera_position(distance: f32, tuning: &VisualTuning) -> Vec3 {
    let elevation = tuning.camera_elevation_deg.to_radians();
    Vec3::new(0.0, distance * elevation.sin(), distance * elevation.cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(d: f32) -> SystemLayout {
        SystemLayout { star_radius: 1.0, planet_radius: 0.2, orbital_distance: d }
    }

    #[test]
    fn empty_scene_uses_default() {
        let tuning = VisualTuning::default();
        let d = framing_distance(Vec::<(&str, &SystemLayout)>::new(), None, &tuning);
        assert_eq!(d, tuning.default_camera_distance);
    }

    #[test]
    fn overview_grows_with_widest_orbit() {
        let tuning = VisualTuning::default();
        let (a, b) = (layout(10.0), layout(40.0));
        let small = framing_distance([("a", &a)], None, &tuning);
        let large = framing_distance([("a", &a), ("b", &b)], None, &tuning);
        assert!(large > small);
        assert!(small >= tuning.overview_min_distance);
    }

    #[test]
    fn focus_frames_tighter_than_overview() {
        let tuning = VisualTuning::default();
        let (a, b) = (layout(5.0), layout(40.0));
        let overview = framing_distance([("a", &a), ("b", &b)], None, &tuning);
        let focused = framing_distance([("a", &a), ("b", &b)], Some("a"), &tuning);
        assert!(focused < overview);
        assert!(focused >= tuning.focus_min_extent);
    }

    #[test]
    fn unknown_focus_falls_back_to_overview() {
        let tuning = VisualTuning::default();
        let a = layout(12.0);
        let overview = framing_distance([("a", &a)], None, &tuning);
        assert_eq!(framing_distance([("a", &a)], Some("zzz"), &tuning), overview);
    }

    #[test]
    fn position_keeps_distance_and_elevation() {
        let tuning = VisualTuning::default();
        let p = camera_position(30.0, &tuning);
        assert!((p.length() - 30.0).abs() < 1e-4);
        assert_eq!(p.x, 0.0);
        let elevation = (p.y / p.length()).asin().to_degrees();
        assert!((elevation - tuning.camera_elevation_deg).abs() < 1e-3);
    }
}
