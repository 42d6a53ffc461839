use crate::error::{AppError, Result};
use crate::models::Station;
use serde_json::Value;
use tracing::warn;

const NAME_PATH: &str = "/atributos/metadato/name/valor_alfanumerico";
const VALUE_PATH: &str = "/atributos/descripcion/ICA_PM25_Valor/valor_alfanumerico";
const DESCRIPTION_PATH: &str = "/atributos/descripcion/ICA_PM25_Descripcion/valor_alfanumerico";
const LONGITUDE_PATH: &str = "/atributos/descripcion/Longitud/valor_alfanumerico";
const LATITUDE_PATH: &str = "/atributos/descripcion/Latitud/valor_alfanumerico";
const UPDATED_AT_PATH: &str =
    "/atributos/descripcion/fecha_ultima_actualizacion/valor_alfanumerico";

pub struct Parser;

impl Parser {
    /// Decode the upstream body and return the raw `feature_vector` records.
    ///
    /// A missing or `null` vector is returned as empty; any other non-array
    /// value is a decode error.
    pub fn decode_items(body: &[u8]) -> Result<Vec<Value>> {
        let mut response: Value = serde_json::from_slice(body).map_err(|e| {
            warn!(
                "Upstream body is not valid JSON: {}",
                String::from_utf8_lossy(body)
            );
            AppError::Decode(format!("Response is not valid JSON: {}", e))
        })?;

        let Some(object) = response.as_object_mut() else {
            return Err(AppError::Decode(
                "Response is not a JSON object".to_string(),
            ));
        };

        match object.remove("feature_vector") {
            Some(Value::Array(items)) => Ok(items),
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(other) => Err(AppError::Decode(format!(
                "feature_vector must be an array, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Convert one upstream record into a `Station`.
    pub fn normalize(item: &Value) -> Result<Station> {
        let value = parse_float("value", item, VALUE_PATH)?;
        let latitude = parse_float("latitude", item, LATITUDE_PATH)?;
        let longitude = parse_float("longitude", item, LONGITUDE_PATH)?;

        Ok(Station {
            name: text_field("name", item, NAME_PATH)?,
            description: text_field("description", item, DESCRIPTION_PATH)?,
            updated_at: text_field("updated_at", item, UPDATED_AT_PATH)?,
            value,
            latitude,
            longitude,
        })
    }

    /// Normalize every record, aborting on the first failure.
    pub fn normalize_all(items: &[Value]) -> Result<Vec<Station>> {
        items.iter().map(Self::normalize).collect()
    }
}

fn raw_field<'a>(field: &'static str, item: &'a Value, path: &str) -> Result<Option<&'a str>> {
    match item.pointer(path) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(AppError::Parse {
            field,
            reason: format!("expected a string at {}, got {}", path, json_kind(other)),
        }),
    }
}

// Text fields are not validated; an absent value reads as empty.
fn text_field(field: &'static str, item: &Value, path: &str) -> Result<String> {
    Ok(raw_field(field, item, path)?.unwrap_or_default().to_string())
}

fn parse_float(field: &'static str, item: &Value, path: &str) -> Result<f64> {
    let raw = raw_field(field, item, path)?.ok_or_else(|| AppError::Parse {
        field,
        reason: format!("missing {}", path),
    })?;

    let parsed = raw.parse::<f64>().map_err(|e| AppError::Parse {
        field,
        reason: format!("failed to parse float '{}': {}", raw, e),
    })?;

    if !parsed.is_finite() {
        return Err(AppError::Parse {
            field,
            reason: format!("'{}' is not a finite number", raw),
        });
    }

    Ok(parsed)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(name: &str, value: &str, lat: &str, lng: &str) -> Value {
        json!({
            "atributos": {
                "metadato": { "name": { "valor_alfanumerico": name } },
                "descripcion": {
                    "ICA_PM25_Valor": { "valor_alfanumerico": value },
                    "ICA_PM25_Descripcion": { "valor_alfanumerico": "Buena" },
                    "Longitud": { "valor_alfanumerico": lng },
                    "Latitud": { "valor_alfanumerico": lat },
                    "fecha_ultima_actualizacion": { "valor_alfanumerico": "2024-01-15 14:00" }
                }
            }
        })
    }

    #[test]
    fn test_normalize_point() {
        let station = Parser::normalize(&point("Girardota", "12.5", "6.3781", "-75.4513")).unwrap();
        assert_eq!(station.name, "Girardota");
        assert_eq!(station.description, "Buena");
        assert_eq!(station.updated_at, "2024-01-15 14:00");
        assert_eq!(station.value, 12.5);
        assert_eq!(station.latitude, 6.3781);
        assert_eq!(station.longitude, -75.4513);
    }

    #[test]
    fn test_normalize_keeps_negative_value() {
        let station = Parser::normalize(&point("Caldas", "-1", "6.09", "-75.63")).unwrap();
        assert_eq!(station.value, -1.0);
    }

    #[test]
    fn test_normalize_identifies_failing_field() {
        let err = Parser::normalize(&point("A", "N/A", "6.0", "-75.0")).unwrap_err();
        assert_eq!(err.parse_field(), Some("value"));

        let err = Parser::normalize(&point("A", "1", "", "-75.0")).unwrap_err();
        assert_eq!(err.parse_field(), Some("latitude"));

        let err = Parser::normalize(&point("A", "1", "6.0", "6,25")).unwrap_err();
        assert_eq!(err.parse_field(), Some("longitude"));
    }

    #[test]
    fn test_normalize_rejects_non_finite() {
        let err = Parser::normalize(&point("A", "NaN", "6.0", "-75.0")).unwrap_err();
        assert_eq!(err.parse_field(), Some("value"));
        assert!(err.to_string().contains("not a finite number"));

        let err = Parser::normalize(&point("A", "1", "inf", "-75.0")).unwrap_err();
        assert_eq!(err.parse_field(), Some("latitude"));
    }

    #[test]
    fn test_normalize_missing_numeric_path() {
        let mut item = point("A", "1", "6.0", "-75.0");
        item["atributos"]["descripcion"]
            .as_object_mut()
            .unwrap()
            .remove("Latitud");
        let err = Parser::normalize(&item).unwrap_err();
        assert_eq!(err.parse_field(), Some("latitude"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_normalize_missing_text_is_empty() {
        let mut item = point("A", "1", "6.0", "-75.0");
        item["atributos"].as_object_mut().unwrap().remove("metadato");
        let station = Parser::normalize(&item).unwrap();
        assert_eq!(station.name, "");
    }

    #[test]
    fn test_normalize_rejects_non_string_leaf() {
        let mut item = point("A", "1", "6.0", "-75.0");
        item["atributos"]["descripcion"]["ICA_PM25_Valor"]["valor_alfanumerico"] = json!(12.5);
        let err = Parser::normalize(&item).unwrap_err();
        assert_eq!(err.parse_field(), Some("value"));
    }

    #[test]
    fn test_station_round_trip() {
        let station = Parser::normalize(&point("Est. #1 Medellín", "-3.25", "6.25", "-75.56")).unwrap();
        let json = serde_json::to_string(&station).unwrap();
        let back: Station = serde_json::from_str(&json).unwrap();
        assert_eq!(back, station);
    }

    #[test]
    fn test_decode_items() {
        let body = serde_json::to_vec(&json!({
            "feature_vector": [point("A", "1", "6.0", "-75.0"), point("B", "2", "6.1", "-75.1")]
        }))
        .unwrap();
        let items = Parser::decode_items(&body).unwrap();
        assert_eq!(items.len(), 2);
        let stations = Parser::normalize_all(&items).unwrap();
        assert_eq!(stations[1].name, "B");
    }

    #[test]
    fn test_decode_empty_and_null_vectors() {
        assert!(Parser::decode_items(br#"{"feature_vector": []}"#).unwrap().is_empty());
        assert!(Parser::decode_items(br#"{"feature_vector": null}"#).unwrap().is_empty());
        assert!(Parser::decode_items(br#"{}"#).unwrap().is_empty());
        assert!(Parser::decode_items(br#"{"other": 1}"#).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_bad_shapes() {
        assert!(matches!(
            Parser::decode_items(b"<html>502</html>"),
            Err(AppError::Decode(_))
        ));
        assert!(matches!(
            Parser::decode_items(br#"[1, 2]"#),
            Err(AppError::Decode(_))
        ));
        let err = Parser::decode_items(br#"{"feature_vector": {"a": 1}}"#).unwrap_err();
        assert!(err.to_string().contains("must be an array"));
    }

    #[test]
    fn test_normalize_all_fails_fast() {
        let items = vec![
            point("A", "1", "6.0", "-75.0"),
            point("B", "bad", "6.1", "-75.1"),
            point("C", "3", "6.2", "-75.2"),
        ];
        let err = Parser::normalize_all(&items).unwrap_err();
        assert_eq!(err.parse_field(), Some("value"));
    }
}
