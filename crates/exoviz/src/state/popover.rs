use serde::Serialize;

use crate::catalog::record::PlanetRecord;
use crate::mapping::units::DistanceConversion;
use crate::state::selection::SelectionState;

/// What the info popover shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PopoverContent {
    /// Physical facts about one planet.
    Planet {
        id: String,
        title: String,
        /// Catalog distance after unit conversion.
        orbital_distance: f64,
        /// Days.
        orbital_period: f64,
        /// Earth radii.
        planet_radius: f64,
        /// Solar radii.
        stellar_radius: f64,
        /// Kelvin.
        temperature: f64,
        stellar_temperature: f64,
    },
    /// Nothing specific picked.
    Summary {
        system_count: usize,
        /// Display name of the focused planet.
        focused_name: Option<String>,
        message: String,
    },
}

impl PopoverContent {
    pub fn for_planet(record: &PlanetRecord, conversion: DistanceConversion) -> Self {
        PopoverContent::Planet {
            id: record.kepoi_name.clone(),
            title: record.display_name().to_string(),
            orbital_distance: conversion.convert(record.orbital_radius),
            orbital_period: record.orbital_period,
            planet_radius: record.planet_radius,
            stellar_radius: record.stellar_radius,
            temperature: record.temperature,
            stellar_temperature: record.stellar_temperature_or_sun(),
        }
    }

    pub fn from_selection(state: &SelectionState, conversion: DistanceConversion) -> Self {
        match state.popover().info_id.as_deref().and_then(|id| state.get(id)) {
            Some(record) => Self::for_planet(record, conversion),
            None => PopoverContent::Summary {
                system_count: state.len(),
                focused_name: state.focused().and_then(|id| state.get(id)).map(|r| r.display_name().to_string()),
                message: match state.len() {
                    0 => "Add planets from the list to explore their systems.".to_string(),
                    1 => "Currently displaying 1 planetary system".to_string(),
                    n => format!("Currently displaying {n} planetary systems"),
                },
            },
        }
    }
}
