//! Reverse conversion: BSON value → DocValue.
//!
//! BSON types without a dedicated [`DocValue`] variant become
//! [`DocValue::Other`] carrying the BSON type name, so the classifier can
//! still report them.

use bson::Bson;
use panel_core::{DocValue, Document};

/// Convert a BSON value to a DocValue.
pub fn bson_to_doc_value(value: Bson) -> DocValue {
    match value {
        Bson::Null => DocValue::Null,
        Bson::Boolean(b) => DocValue::Bool(b),
        Bson::Int32(i) => DocValue::Int32(i),
        Bson::Int64(i) => DocValue::Int64(i),
        Bson::Double(f) => DocValue::Double(f),
        Bson::String(s) => DocValue::String(s),
        Bson::DateTime(dt) => DocValue::DateTime(dt.to_chrono()),
        Bson::Array(items) => DocValue::Array(items.into_iter().map(bson_to_doc_value).collect()),
        Bson::Document(doc) => DocValue::Object(bson_document_to_document(doc)),
        Bson::ObjectId(oid) => DocValue::ObjectId(oid.to_hex()),
        Bson::Binary(bin) => DocValue::Binary(bin.bytes),
        other => DocValue::Other {
            type_name: bson_type_name(&other).to_string(),
            display: other.to_string(),
        },
    }
}

/// Convert a BSON document to a Document.
pub fn bson_document_to_document(doc: bson::Document) -> Document {
    doc.into_iter()
        .map(|(key, value)| (key, bson_to_doc_value(value)))
        .collect()
}

fn bson_type_name(value: &Bson) -> &'static str {
    match value {
        Bson::Decimal128(_) => "decimal128",
        Bson::Timestamp(_) => "timestamp",
        Bson::RegularExpression(_) => "regex",
        Bson::JavaScriptCode(_) => "javascript",
        Bson::JavaScriptCodeWithScope(_) => "javascriptWithScope",
        Bson::Symbol(_) => "symbol",
        Bson::Undefined => "undefined",
        Bson::MinKey => "minKey",
        Bson::MaxKey => "maxKey",
        Bson::DbPointer(_) => "dbPointer",
        _ => "unknown",
    }
}
