pub mod camera;
pub mod instance;

pub use camera::{CameraTransition, CameraUniform, PerspectiveCamera, Ray};
pub use instance::{MeshInstance, RingVertex, StarInstance, FrameBuffers};
