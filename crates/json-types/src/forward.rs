//! Forward conversion: DocValue → JSON value.
//!
//! Dates render as RFC 3339 strings, object ids as their hex string, binary
//! payloads as base64 and store-native values as their display string.

use base64::Engine;
use chrono::SecondsFormat;
use panel_core::{DocValue, Document};
use serde_json::json;

/// Wrapper for JSON values.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonValue(pub serde_json::Value);

impl JsonValue {
    /// Get the inner JSON value.
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Get a reference to the inner JSON value.
    pub fn as_inner(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<DocValue> for JsonValue {
    fn from(value: DocValue) -> Self {
        JsonValue::from(&value)
    }
}

impl From<&DocValue> for JsonValue {
    fn from(value: &DocValue) -> Self {
        let json = match value {
            DocValue::Null => serde_json::Value::Null,
            DocValue::Bool(b) => json!(*b),
            DocValue::Int32(i) => json!(*i),
            DocValue::Int64(i) => json!(*i),
            // Non-finite doubles have no JSON form and become null
            DocValue::Double(f) => json!(*f),
            DocValue::String(s) => json!(s),
            DocValue::DateTime(dt) => json!(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            DocValue::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| JsonValue::from(item).into_inner())
                    .collect(),
            ),
            DocValue::Object(doc) => document_to_json(doc),
            DocValue::ObjectId(hex) => json!(hex),
            DocValue::Binary(bytes) => {
                json!(base64::engine::general_purpose::STANDARD.encode(bytes))
            }
            DocValue::Other { display, .. } => json!(display),
        };
        JsonValue(json)
    }
}

/// Convert a complete document to a JSON object.
pub fn document_to_json(doc: &Document) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    for (key, value) in doc {
        obj.insert(key.clone(), JsonValue::from(value).into_inner());
    }
    serde_json::Value::Object(obj)
}
