// extensions/easing.rs
//
// Pure easing curves for camera transitions.
// No dependencies on Entity/Scene, just math.

use std::f32::consts::PI;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Easing curve applied to a transition's linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity (no easing).
    Linear,
    /// Hermite `3t² − 2t³`: zero velocity at both ends.
    #[default]
    SmoothStep,
    /// Perlin's `6t⁵ − 15t⁴ + 10t³`: zero velocity and acceleration at both ends.
    SmootherStep,
    /// Slow start and end.
    QuadInOut,
    /// Stronger slow start and end.
    CubicInOut,
    SineInOut,
}

impl Easing {
    /// Apply the curve to `t` clamped into [0, 1]. Every curve maps 0 → 0
    /// and 1 → 1 and never leaves [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
            Easing::SmootherStep => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec3 values.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Interpolate Vec3 with easing.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::SmoothStep,
        Easing::SmootherStep,
        Easing::QuadInOut,
        Easing::CubicInOut,
        Easing::SineInOut,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn curves_are_monotone() {
        for easing in ALL {
            let samples: Vec<f32> = (0..=100).map(|i| easing.apply(i as f32 / 100.0)).collect();
            assert!(samples.windows(2).all(|w| w[0] <= w[1] + 1e-6), "{easing:?}");
        }
    }

    #[test]
    fn smoothstep_is_symmetric() {
        assert!((Easing::SmoothStep.apply(0.5) - 0.5).abs() < 1e-6);
        let a = Easing::SmoothStep.apply(0.2);
        let b = Easing::SmoothStep.apply(0.8);
        assert!((a + b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn smoothstep_starts_slow() {
        assert!(Easing::SmoothStep.apply(0.1) < 0.1);
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(Easing::SmoothStep.apply(-1.0), 0.0);
        assert_eq!(Easing::SmoothStep.apply(2.0), 1.0);
    }

    #[test]
    fn ease_vec3_interpolates() {
        let mid = ease_vec3(Vec3::ZERO, Vec3::new(0.0, 10.0, 20.0), 0.5, Easing::Linear);
        assert_eq!(mid, Vec3::new(0.0, 5.0, 10.0));
    }
}
