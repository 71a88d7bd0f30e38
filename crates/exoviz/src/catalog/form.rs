//! User-entered planet form.
//!
//! Fields arrive as raw strings straight from the inputs; nothing is parsed
//! until submit.

use serde::{Deserialize, Serialize};

use crate::catalog::error::FormError;
use crate::catalog::record::PlanetRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomPlanetForm {
    /// Optional common name.
    pub kepler_name: String,
    pub orbital_period: String,
    pub planet_radius: String,
    pub stellar_radius: String,
    pub orbital_radius: String,
    pub temperature: String,
    pub stellar_temperature: String,
}

impl CustomPlanetForm {
    fn numeric_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("orbital_period", &self.orbital_period),
            ("planet_radius", &self.planet_radius),
            ("stellar_radius", &self.stellar_radius),
            ("orbital_radius", &self.orbital_radius),
            ("temperature", &self.temperature),
            ("stellar_temperature", &self.stellar_temperature),
        ]
    }

    /// Build a record under `kepoi_name`.
    ///
    /// All six numeric fields are required and must be positive finite
    /// numbers. Missing fields are reported first, then unparsable ones,
    /// then non-positive ones.
    pub fn validate(&self, kepoi_name: String) -> Result<PlanetRecord, FormError> {
        let fields = self.numeric_fields();

        let missing: Vec<&'static str> =
            fields.iter().filter(|(_, raw)| raw.trim().is_empty()).map(|(name, _)| *name).collect();
        if !missing.is_empty() {
            return Err(FormError::Missing(missing));
        }

        let parsed: Vec<Option<f64>> =
            fields.iter().map(|(_, raw)| raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())).collect();
        let not_numeric: Vec<&'static str> =
            fields.iter().zip(&parsed).filter(|(_, v)| v.is_none()).map(|((name, _), _)| *name).collect();
        if !not_numeric.is_empty() {
            return Err(FormError::NotNumeric(not_numeric));
        }

        let v: Vec<f64> = parsed.into_iter().flatten().collect();
        let not_positive: Vec<&'static str> =
            fields.iter().zip(&v).filter(|(_, v)| **v <= 0.0).map(|((name, _), _)| *name).collect();
        if !not_positive.is_empty() {
            return Err(FormError::NotPositive(not_positive));
        }

        let name = self.kepler_name.trim();
        Ok(PlanetRecord {
            kepoi_name,
            kepler_name: (!name.is_empty()).then(|| name.to_string()),
            orbital_period: v[0],
            planet_radius: v[1],
            stellar_radius: v[2],
            orbital_radius: v[3],
            temperature: v[4],
            stellar_temperature: Some(v[5]),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CustomPlanetForm {
        CustomPlanetForm {
            kepler_name: "Nova Terra".into(),
            orbital_period: "200".into(),
            planet_radius: "1.2".into(),
            stellar_radius: "0.9".into(),
            orbital_radius: "0.7".into(),
            temperature: "250".into(),
            stellar_temperature: "5200".into(),
        }
    }

    #[test]
    fn valid_form_builds_record() {
        let record = filled().validate("CUSTOM000001".into()).unwrap();
        assert_eq!(record.kepoi_name, "CUSTOM000001");
        assert_eq!(record.kepler_name.as_deref(), Some("Nova Terra"));
        assert_eq!(record.orbital_period, 200.0);
        assert_eq!(record.stellar_temperature, Some(5200.0));
    }

    #[test]
    fn name_is_optional() {
        let mut form = filled();
        form.kepler_name = "   ".into();
        let record = form.validate("CUSTOM000001".into()).unwrap();
        assert_eq!(record.kepler_name, None);
        assert_eq!(record.display_name(), "CUSTOM000001");
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let mut form = filled();
        form.temperature.clear();
        form.orbital_period = " ".into();
        assert_eq!(
            form.validate("X".into()),
            Err(FormError::Missing(vec!["orbital_period", "temperature"]))
        );
    }

    #[test]
    fn garbage_is_reported_before_sign() {
        let mut form = filled();
        form.planet_radius = "-1".into();
        form.stellar_radius = "abc".into();
        assert_eq!(form.validate("X".into()), Err(FormError::NotNumeric(vec!["stellar_radius"])));
    }

    #[test]
    fn non_positive_is_rejected() {
        let mut form = filled();
        form.planet_radius = "-1".into();
        form.orbital_radius = "0".into();
        assert_eq!(
            form.validate("X".into()),
            Err(FormError::NotPositive(vec!["planet_radius", "orbital_radius"]))
        );
    }

    #[test]
    fn clear_resets_every_field() {
        let mut form = filled();
        form.clear();
        assert_eq!(form, CustomPlanetForm::default());
    }
}
