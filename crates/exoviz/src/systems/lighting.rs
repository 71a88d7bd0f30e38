/// Scene lighting: per-system point lights plus global ambient and
/// directional fill.
///
/// Point lights live on scene entities; each frame the viewer collects
/// them here for the renderer's lighting pass.

use glam::Vec3;

/// A 3D point light.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, range]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Distance at which the light falls off to zero.
    pub range: f32,
}

impl PointLight {
    /// - `color`: RGB color (typically [0..1])
    /// - `intensity`: Light strength multiplier
    /// - `range`: Falloff distance in world units
    pub fn new(color: [f32; 3], intensity: f32, range: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            r: color[0],
            g: color[1],
            b: color[2],
            intensity,
            range,
        }
    }

    /// Set the position.
    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.x = pos.x;
        self.y = pos.y;
        self.z = pos.z;
        self
    }
}

/// Directional fill light (direction points from the light toward the origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: [f32; 3],
    pub intensity: f32,
}

/// Lights collected for the current frame.
pub struct LightState {
    lights: Vec<PointLight>,
    max_lights: usize,
    ambient: f32,
    directional: DirectionalLight,
}

impl LightState {
    /// Create a LightState with a specific light capacity.
    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            max_lights,
            ambient: 1.0,
            directional: DirectionalLight { position: [0.0, 1.0, 0.0], intensity: 0.0 },
        }
    }

    /// Add a point light. Lights past capacity are dropped.
    pub fn add(&mut self, light: PointLight) -> bool {
        if self.lights.len() >= self.max_lights {
            return false;
        }
        self.lights.push(light);
        true
    }

    /// Remove all point lights.
    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    /// Number of active point lights.
    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// White ambient intensity (default: 1.0 = no darkening).
    pub fn set_ambient(&mut self, intensity: f32) {
        self.ambient = intensity;
    }

    pub fn ambient(&self) -> f32 {
        self.ambient
    }

    pub fn set_directional(&mut self, light: DirectionalLight) {
        self.directional = light;
    }

    pub fn directional(&self) -> DirectionalLight {
        self.directional
    }

    /// Pointer to the lights data for buffer reads.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::LIGHT_FLOATS;

    #[test]
    fn point_light_new() {
        let light = PointLight::new([1.0, 0.5, 0.0], 2.0, 30.0).with_pos(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!((light.x, light.y, light.z), (1.0, 2.0, 3.0));
        assert_eq!(light.g, 0.5);
        assert_eq!(light.intensity, 2.0);
        assert_eq!(light.range, 30.0);
    }

    #[test]
    fn light_state_is_capped() {
        let mut state = LightState::with_capacity(2);
        assert!(state.add(PointLight::new([1.0; 3], 1.0, 10.0)));
        assert!(state.add(PointLight::new([1.0; 3], 1.0, 10.0)));
        assert!(!state.add(PointLight::new([1.0; 3], 1.0, 10.0)));
        assert_eq!(state.count(), 2);
        state.clear();
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn light_state_set_ambient() {
        let mut state = LightState::with_capacity(1);
        assert_eq!(state.ambient(), 1.0);
        state.set_ambient(0.3);
        assert_eq!(state.ambient(), 0.3);
    }

    #[test]
    fn point_light_is_8_floats() {
        assert_eq!(std::mem::size_of::<PointLight>(), LIGHT_FLOATS * 4);
    }
}
