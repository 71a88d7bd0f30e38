use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use crate::extensions::easing::{ease_vec3, Easing};

/// Perspective camera orbiting the scene origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    /// World-space eye position (w unused).
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 20;
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            fov_y: fov_deg.to_radians(),
            aspect,
            near,
            far,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Right-handed, depth in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: self.view_projection().to_cols_array_2d(),
            eye: self.position.extend(1.0).to_array(),
        }
    }

    /// Update the aspect ratio from viewport dimensions. Degenerate sizes
    /// are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// World-space ray through a point in normalized device coordinates
    /// (x right, y up, both in [-1, 1]).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let unproject = |z: f32| {
            let p = inverse * ndc.extend(z).extend(1.0);
            p.xyz() / p.w
        };
        let near = unproject(0.0);
        let far = unproject(1.0);
        Ray { origin: near, direction: (far - near).normalize_or_zero() }
    }
}

/// Half-line used for picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    /// Distance along the ray to the first hit on the sphere, if any.
    /// A ray starting inside the sphere hits at its exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let near = -b - root;
        let far = -b + root;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

// ── Transitions ──

/// Eased move of the camera between two positions.
///
/// Progress advances by a fixed step per tick; at 1.0 the camera snaps to
/// the target and the transition is over.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTransition {
    pub from: Vec3,
    pub to: Vec3,
    progress: f32,
    easing: Easing,
}

impl CameraTransition {
    pub fn new(from: Vec3, to: Vec3, easing: Easing) -> Self {
        Self { from, to, progress: 0.0, easing }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Advance by `step` and return the eased position.
    pub fn advance(&mut self, step: f32) -> Vec3 {
        self.progress = (self.progress + step).min(1.0);
        if self.is_finished() {
            self.to
        } else {
            ease_vec3(self.from, self.to, self.progress, self.easing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(position: Vec3) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(60.0, 16.0 / 9.0, 0.1, 1000.0);
        camera.position = position;
        camera
    }

    #[test]
    fn center_ray_points_at_target() {
        let camera = camera_at(Vec3::new(0.0, 19.0, 16.0));
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        let to_target = (camera.target - camera.position).normalize();
        assert!(ray.direction.dot(to_target) > 0.9999);
    }

    #[test]
    fn ray_hits_sphere_in_front() {
        let ray = Ray { origin: Vec3::new(0.0, 0.0, 10.0), direction: Vec3::NEG_Z };
        let t = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
        assert!(ray.intersect_sphere(Vec3::new(0.0, 0.0, 20.0), 1.0).is_none());
    }

    #[test]
    fn resize_updates_aspect() {
        let mut camera = camera_at(Vec3::Z);
        camera.resize(800.0, 400.0);
        assert_eq!(camera.aspect, 2.0);
        camera.resize(0.0, 400.0);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn transition_ends_exactly_on_target() {
        let from = Vec3::new(0.0, 10.0, 10.0);
        let to = Vec3::new(0.0, 30.0, 25.0);
        let mut t = CameraTransition::new(from, to, Easing::SmoothStep);
        let mut last = from;
        let mut steps = 0;
        while !t.is_finished() {
            let pos = t.advance(0.02);
            assert!(pos.distance(to) <= last.distance(to) + 1e-4);
            last = pos;
            steps += 1;
        }
        assert_eq!(last, to);
        assert!((50..=51).contains(&steps));
    }

    #[test]
    fn uniform_is_20_floats() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
    }
}
