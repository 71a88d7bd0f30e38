use serde::{Deserialize, Deserializer, Serialize};

/// Stellar temperature assumed when a record carries none.
pub const SUN_TEMPERATURE_K: f64 = 5778.0;

/// One line of the planet listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetSummary {
    #[serde(alias = "id")]
    pub kepoi_name: String,
    #[serde(alias = "name", default, deserialize_with = "blank_as_none")]
    pub kepler_name: Option<String>,
}

impl PlanetSummary {
    pub fn display_name(&self) -> &str {
        display_name_of(self.kepler_name.as_deref(), &self.kepoi_name)
    }
}

/// Full physical record for one planet.
///
/// Field aliases accept the raw KOI column names the catalog backend emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub kepoi_name: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub kepler_name: Option<String>,
    /// Days.
    #[serde(alias = "koi_period")]
    pub orbital_period: f64,
    /// Earth radii.
    #[serde(alias = "koi_prad")]
    pub planet_radius: f64,
    /// Solar radii.
    #[serde(alias = "koi_srad")]
    pub stellar_radius: f64,
    /// Catalog distance units (AU for the built-in set).
    #[serde(alias = "koi_sma")]
    pub orbital_radius: f64,
    /// Equilibrium temperature, Kelvin.
    #[serde(alias = "koi_teq")]
    pub temperature: f64,
    /// Effective stellar temperature, Kelvin.
    #[serde(alias = "koi_steff", default, skip_serializing_if = "Option::is_none")]
    pub stellar_temperature: Option<f64>,
}

impl PlanetRecord {
    pub fn display_name(&self) -> &str {
        display_name_of(self.kepler_name.as_deref(), &self.kepoi_name)
    }

    pub fn stellar_temperature_or_sun(&self) -> f64 {
        self.stellar_temperature.unwrap_or(SUN_TEMPERATURE_K)
    }

    pub fn summary(&self) -> PlanetSummary {
        PlanetSummary {
            kepoi_name: self.kepoi_name.clone(),
            kepler_name: self.kepler_name.clone(),
        }
    }

    /// First physical field that is not a positive finite number, if any.
    pub fn invalid_field(&self) -> Option<&'static str> {
        let fields = [
            ("orbital_period", self.orbital_period),
            ("planet_radius", self.planet_radius),
            ("stellar_radius", self.stellar_radius),
            ("orbital_radius", self.orbital_radius),
            ("temperature", self.temperature),
        ];
        fields
            .into_iter()
            .chain(self.stellar_temperature.map(|t| ("stellar_temperature", t)))
            .find(|(_, v)| !(v.is_finite() && *v > 0.0))
            .map(|(name, _)| name)
    }
}

/// Common name if present, catalog identifier otherwise.
pub fn display_name_of<'a>(kepler_name: Option<&'a str>, kepoi_name: &'a str) -> &'a str {
    match kepler_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => kepoi_name,
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
