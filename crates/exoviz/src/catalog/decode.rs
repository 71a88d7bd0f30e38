//! Response decoding for the HTTP catalog.
//!
//! The backend answers detail requests with a JSON *string* that itself
//! holds a JSON array of records, so bodies are unwrapped until a
//! non-string value appears.

use serde_json::Value;

use crate::catalog::error::CatalogError;
use crate::catalog::record::{PlanetRecord, PlanetSummary};

/// Nesting depth accepted for string-wrapped JSON.
const MAX_WRAPPING: usize = 2;

fn unwrap_value(body: &str) -> Result<Value, CatalogError> {
    let mut value: Value = serde_json::from_str(body)?;
    for _ in 0..MAX_WRAPPING {
        match value {
            Value::String(inner) => value = serde_json::from_str(&inner)?,
            other => return Ok(other),
        }
    }
    Ok(value)
}

pub fn decode_listing(body: &str) -> Result<Vec<PlanetSummary>, CatalogError> {
    Ok(serde_json::from_value(unwrap_value(body)?)?)
}

/// A record, an array of records (first wins) or `null`.
pub fn decode_details(body: &str) -> Result<Option<PlanetRecord>, CatalogError> {
    let value = match unwrap_value(body)? {
        Value::Null => return Ok(None),
        Value::Array(mut items) => {
            if items.is_empty() {
                return Ok(None);
            }
            items.swap_remove(0)
        }
        other => other,
    };
    let record: PlanetRecord = serde_json::from_value(value)?;
    if let Some(field) = record.invalid_field() {
        return Err(CatalogError::InvalidRecord { id: record.kepoi_name, field });
    }
    Ok(Some(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{"kepoi_name":"K00087.01","kepler_name":"Kepler-22b","koi_period":289.9,
        "koi_prad":2.38,"koi_srad":0.97,"koi_sma":0.849,"koi_teq":262.0,"koi_steff":5518.0}"#;

    #[test]
    fn listing_accepts_backend_shape() {
        let list = decode_listing(r#"[{"name":"Kepler-22b","id":"K00087.01"},{"name":"","id":"K00123.02"}]"#)
            .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].display_name(), "Kepler-22b");
        assert_eq!(list[1].kepler_name, None);
    }

    #[test]
    fn details_unwraps_string_encoded_array() {
        let body = serde_json::to_string(&format!("[{RECORD}]")).unwrap();
        let record = decode_details(&body).unwrap().unwrap();
        assert_eq!(record.kepoi_name, "K00087.01");
        assert_eq!(record.temperature, 262.0);
    }

    #[test]
    fn details_accepts_plain_object() {
        assert!(decode_details(RECORD).unwrap().is_some());
    }

    #[test]
    fn empty_result_is_absent() {
        assert!(decode_details("[]").unwrap().is_none());
        assert!(decode_details("\"[]\"").unwrap().is_none());
        assert!(decode_details("null").unwrap().is_none());
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(decode_details("<html>"), Err(CatalogError::Decode(_))));
        assert!(matches!(decode_listing("{}"), Err(CatalogError::Decode(_))));
    }

    #[test]
    fn non_positive_fields_are_rejected() {
        let body = RECORD.replace("\"koi_period\":289.9", "\"koi_period\":0");
        assert!(matches!(
            decode_details(&body),
            Err(CatalogError::InvalidRecord { field: "orbital_period", .. })
        ));
    }
}
