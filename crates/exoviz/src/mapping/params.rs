use serde::Serialize;

use crate::api::config::VisualTuning;
use crate::catalog::record::PlanetRecord;
use crate::mapping::color::{temperature_to_planet_color, temperature_to_star_color, Color};
use crate::mapping::units::{
    compress_orbital_distance, planet_display_diameter, star_display_diameter, DistanceConversion,
};

/// Display-ready description of one planetary system.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationParams {
    pub id: String,
    pub display_name: String,
    /// Days.
    pub orbital_period: f32,
    /// Scene units from the star center.
    pub orbital_distance: f32,
    pub planet_diameter: f32,
    pub planet_color: Color,
    pub star_diameter: f32,
    pub star_color: Color,
    /// Kelvin.
    pub stellar_temperature: f32,
}

impl VisualizationParams {
    pub fn from_record(record: &PlanetRecord, conversion: DistanceConversion, tuning: &VisualTuning) -> Self {
        let stellar_temperature = record.stellar_temperature_or_sun();
        let distance = conversion.convert(record.orbital_radius);
        Self {
            id: record.kepoi_name.clone(),
            display_name: record.display_name().to_string(),
            orbital_period: record.orbital_period as f32,
            orbital_distance: compress_orbital_distance(distance, tuning),
            planet_diameter: planet_display_diameter(record.planet_radius, tuning),
            planet_color: temperature_to_planet_color(record.temperature),
            star_diameter: star_display_diameter(record.stellar_radius, tuning),
            star_color: temperature_to_star_color(stellar_temperature),
            stellar_temperature: stellar_temperature as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin::builtin_records;

    fn record(id: &str) -> PlanetRecord {
        builtin_records().into_iter().find(|r| r.kepoi_name == id).unwrap()
    }

    #[test]
    fn params_follow_record() {
        let tuning = VisualTuning::default();
        let p = VisualizationParams::from_record(&record("K00282.01"), DistanceConversion::Identity, &tuning);
        assert_eq!(p.id, "K00282.01");
        assert_eq!(p.display_name, "Kepler-442b");
        assert_eq!(p.orbital_period, 112.3);
        assert_eq!(p.star_color, temperature_to_star_color(4402.0));
        assert!(p.orbital_distance > 0.0);
    }

    #[test]
    fn wider_orbit_maps_farther() {
        let tuning = VisualTuning::default();
        let near = VisualizationParams::from_record(&record("K00282.01"), DistanceConversion::Identity, &tuning);
        let far = VisualizationParams::from_record(&record("K00087.01"), DistanceConversion::Identity, &tuning);
        assert!(far.orbital_distance > near.orbital_distance);
    }

    #[test]
    fn serializes_for_the_ui() {
        let tuning = VisualTuning::default();
        let p = VisualizationParams::from_record(&record("K00087.01"), DistanceConversion::Identity, &tuning);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["starColor"], "#ff8800");
        assert!(json["planetColor"].as_str().unwrap().starts_with('#'));
    }
}
