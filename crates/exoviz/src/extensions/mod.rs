// extensions/mod.rs
//
// Decoupled helpers layered on top of Entity/Scene.
// The viewer opts in by owning these alongside its Scene.

pub mod easing;
pub mod transform;

pub use easing::{Easing, lerp, lerp_vec3, ease_vec3};
pub use transform::{TransformGraph, LocalTransform};
