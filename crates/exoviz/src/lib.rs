pub mod api;
pub mod app;
pub mod assets;
pub mod bridge;
pub mod catalog;
pub mod components;
pub mod core;
pub mod extensions;
pub mod input;
pub mod mapping;
pub mod renderer;
pub mod state;
pub mod systems;
pub mod viewer;

// Re-export key types at crate root for convenience
pub use api::config::{ConfigError, ViewerConfig, VisualTuning};
pub use api::types::{CursorStyle, EntityId, ViewerEvent};
pub use app::{ExoplanetApp, PlanetRequest};
pub use assets::registry::{Geometry, Material, ResourceRegistry};
pub use bridge::protocol::{ProtocolLayout, HEADER_FLOATS, LIGHT_FLOATS};
pub use catalog::{
    filter_listing, BuiltinCatalog, CatalogClient, CatalogError, CatalogSource, CustomPlanetForm,
    CustomPlanetStore, FormError, PlanetRecord, PlanetSummary,
};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, MeshKind};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue};
pub use mapping::{
    temperature_to_planet_color, temperature_to_star_color, Color, DistanceConversion, PlanetClimate, StarClass,
    VisualizationParams,
};
pub use renderer::camera::{CameraTransition, PerspectiveCamera, Ray};
pub use renderer::instance::{FrameBuffers, MeshInstance, RingVertex, StarInstance};
pub use state::{FetchTicket, PopoverContent, PopoverState, SelectionState, MAX_SELECTED};
pub use systems::lighting::{LightState, PointLight};
pub use viewer::{SceneInput, SceneManager, SyncReport};

// Extensions
pub use extensions::{ease_vec3, lerp, lerp_vec3, Easing, LocalTransform, TransformGraph};
