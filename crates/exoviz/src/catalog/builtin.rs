//! Ten well-known Kepler objects, served when no remote catalog is wired in.

use crate::catalog::error::CatalogError;
use crate::catalog::record::{PlanetRecord, PlanetSummary};
use crate::catalog::source::CatalogSource;

fn koi(
    kepoi_name: &str,
    kepler_name: Option<&str>,
    [orbital_period, planet_radius, stellar_radius, orbital_radius, temperature, stellar_temperature]: [f64; 6],
) -> PlanetRecord {
    PlanetRecord {
        kepoi_name: kepoi_name.to_string(),
        kepler_name: kepler_name.map(str::to_string),
        orbital_period,
        planet_radius,
        stellar_radius,
        orbital_radius,
        temperature,
        stellar_temperature: Some(stellar_temperature),
    }
}

/// period (d), radius (R⊕), stellar radius (R☉), orbit (AU), T_eq (K), T_eff (K)
pub fn builtin_records() -> Vec<PlanetRecord> {
    vec![
        koi("K00282.01", Some("Kepler-442b"), [112.3, 1.34, 0.61, 0.409, 233.0, 4402.0]),
        koi("K00268.01", Some("Kepler-438b"), [35.2, 1.12, 0.54, 0.166, 276.0, 3952.0]),
        koi("K00571.05", Some("Kepler-186f"), [129.9, 1.11, 0.47, 0.432, 188.0, 3788.0]),
        koi("K00701.03", Some("Kepler-62e"), [122.4, 1.61, 0.69, 0.427, 270.0, 4925.0]),
        koi("K00087.01", Some("Kepler-22b"), [289.9, 2.38, 0.97, 0.849, 262.0, 5518.0]),
        koi("K07016.01", Some("Kepler-452b"), [384.8, 1.63, 1.11, 1.046, 265.0, 5757.0]),
        koi("K07554.01", Some("Kepler-1649c"), [19.5, 1.06, 0.20, 0.0649, 234.0, 3240.0]),
        koi("K00123.02", None, [45.7, 0.89, 0.82, 0.201, 315.0, 5297.0]),
        koi("K00117.02", Some("Kepler-296e"), [34.1, 1.75, 0.50, 0.169, 292.0, 3740.0]),
        koi("K00408.02", Some("Kepler-283c"), [92.7, 1.84, 0.63, 0.348, 254.0, 4544.0]),
    ]
}

/// In-memory catalog over [`builtin_records`].
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    records: Vec<PlanetRecord>,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self { records: builtin_records() }
    }

    pub fn from_records(records: Vec<PlanetRecord>) -> Self {
        Self { records }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogSource for BuiltinCatalog {
    async fn list(&self) -> Result<Vec<PlanetSummary>, CatalogError> {
        Ok(self.records.iter().map(PlanetRecord::summary).collect())
    }

    async fn details(&self, id: &str) -> Result<Option<PlanetRecord>, CatalogError> {
        Ok(self.records.iter().find(|r| r.kepoi_name == id).cloned())
    }
}
