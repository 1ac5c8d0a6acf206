//! Reverse conversion: JSON value → DocValue.
//!
//! Request bodies and JSONL exports arrive as plain JSON. Integers that fit in
//! 32 bits become `Int32`, wider ones `Int64`, everything else `Double`.
//! MongoDB extended JSON wrappers (`$oid`, `$date`, `$numberLong`, ...) are
//! recognised so documents exported with `mongoexport` keep their types.

use base64::Engine;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use panel_core::{DocValue, Document};

/// Errors raised when a JSON payload cannot become a document.
#[derive(Debug, thiserror::Error)]
pub enum JsonConversionError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Options for JSON → DocValue conversion.
///
/// # Example
///
/// ```ignore
/// let config = JsonConversionConfig::new()
///     .with_date_path("created_at")
///     .with_date_path("meta.updated_at");
/// ```
#[derive(Debug, Clone)]
pub struct JsonConversionConfig {
    /// Interpret MongoDB extended JSON wrappers.
    pub extended_json: bool,
    /// Dot-separated paths whose string values should be parsed as dates.
    pub date_paths: Vec<String>,
}

impl Default for JsonConversionConfig {
    fn default() -> Self {
        Self {
            extended_json: true,
            date_paths: Vec::new(),
        }
    }
}

impl JsonConversionConfig {
    /// Create the default configuration (extended JSON on, no date paths).
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat every object literally, ignoring `$`-prefixed wrappers.
    pub fn plain() -> Self {
        Self {
            extended_json: false,
            date_paths: Vec::new(),
        }
    }

    /// Add a date path.
    pub fn with_date_path(mut self, path: &str) -> Self {
        self.date_paths.push(path.to_string());
        self
    }

    fn is_date_path(&self, path: &str) -> bool {
        self.date_paths.iter().any(|p| p == path)
    }
}

/// Convert JSON to a DocValue with the default configuration.
pub fn json_to_doc_value(value: serde_json::Value) -> DocValue {
    json_to_doc_value_with_config(value, &JsonConversionConfig::default())
}

/// Convert JSON to a DocValue.
pub fn json_to_doc_value_with_config(
    value: serde_json::Value,
    config: &JsonConversionConfig,
) -> DocValue {
    convert(value, "", config)
}

/// Convert a JSON object to a Document with the default configuration.
pub fn json_to_document(value: serde_json::Value) -> Result<Document, JsonConversionError> {
    json_to_document_with_config(value, &JsonConversionConfig::default())
}

/// Convert a JSON object to a Document. Non-object input is rejected.
pub fn json_to_document_with_config(
    value: serde_json::Value,
    config: &JsonConversionConfig,
) -> Result<Document, JsonConversionError> {
    match value {
        serde_json::Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, v)| {
                let converted = convert(v, &key, config);
                (key, converted)
            })
            .collect()),
        other => Err(JsonConversionError::NotAnObject(json_kind(&other))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn convert(value: serde_json::Value, path: &str, config: &JsonConversionConfig) -> DocValue {
    match value {
        serde_json::Value::Null => DocValue::Null,
        serde_json::Value::Bool(b) => DocValue::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                match i32::try_from(i) {
                    Ok(small) => DocValue::Int32(small),
                    Err(_) => DocValue::Int64(i),
                }
            } else {
                DocValue::Double(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => {
            if config.is_date_path(path) {
                if let Some(dt) = parse_datetime_string(&s) {
                    return DocValue::DateTime(dt);
                }
            }
            DocValue::String(s)
        }
        serde_json::Value::Array(items) => DocValue::Array(
            items
                .into_iter()
                .map(|item| convert(item, path, config))
                .collect(),
        ),
        serde_json::Value::Object(map) => {
            if config.extended_json {
                if let Some(special) = extended_json_value(&map) {
                    return special;
                }
            }
            DocValue::Object(
                map.into_iter()
                    .map(|(key, v)| {
                        let child = if path.is_empty() {
                            key.clone()
                        } else {
                            format!("{path}.{key}")
                        };
                        let converted = convert(v, &child, config);
                        (key, converted)
                    })
                    .collect(),
            )
        }
    }
}

/// Recognise single-key extended JSON wrappers.
fn extended_json_value(map: &serde_json::Map<String, serde_json::Value>) -> Option<DocValue> {
    if map.len() != 1 {
        return None;
    }
    let (key, inner) = map.iter().next()?;

    match (key.as_str(), inner) {
        ("$oid", serde_json::Value::String(hex)) if is_object_id_hex(hex) => {
            Some(DocValue::ObjectId(hex.to_lowercase()))
        }
        ("$date", serde_json::Value::String(s)) => parse_datetime_string(s).map(DocValue::DateTime),
        ("$date", serde_json::Value::Number(n)) => {
            n.as_i64().and_then(millis_to_datetime).map(DocValue::DateTime)
        }
        ("$date", serde_json::Value::Object(obj)) => obj
            .get("$numberLong")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(millis_to_datetime)
            .map(DocValue::DateTime),
        ("$numberInt", serde_json::Value::String(s)) => s.parse().ok().map(DocValue::Int32),
        ("$numberLong", serde_json::Value::String(s)) => s.parse().ok().map(DocValue::Int64),
        ("$numberDouble", serde_json::Value::String(s)) => s.parse().ok().map(DocValue::Double),
        ("$numberDecimal", serde_json::Value::String(s)) => Some(DocValue::Other {
            type_name: "decimal128".to_string(),
            display: s.clone(),
        }),
        ("$binary", serde_json::Value::Object(obj)) => obj
            .get("base64")
            .and_then(|v| v.as_str())
            .and_then(|b64| base64::engine::general_purpose::STANDARD.decode(b64).ok())
            .map(DocValue::Binary),
        _ => None,
    }
}

fn is_object_id_hex(s: &str) -> bool {
    s.len() == 24 && s.chars().all(|c| c.is_ascii_hexdigit())
}

fn millis_to_datetime(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

/// Parse a datetime string.
///
/// Supports:
/// - RFC 3339: "2024-01-01T12:00:00Z"
/// - Plain dates: "2024-01-01" (midnight UTC)
fn parse_datetime_string(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
