pub mod color;
pub mod params;
pub mod units;

pub use color::{temperature_to_planet_color, temperature_to_star_color, Color, PlanetClimate, StarClass};
pub use params::VisualizationParams;
pub use units::DistanceConversion;
