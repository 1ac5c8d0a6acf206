//! JSON conversions for panel-core document values.
//!
//! This crate provides bidirectional conversions between panel-core's
//! [`DocValue`](panel_core::DocValue) and `serde_json::Value`.
//!
//! # Modules
//!
//! - [`forward`] - DocValue → JSON value conversion
//! - [`reverse`] - JSON value → DocValue conversion (extended JSON aware)
//!
//! # Example
//!
//! ```ignore
//! use json_types::{json_to_document, JsonValue};
//! use panel_core::DocValue;
//!
//! // Forward: DocValue → JSON value
//! let json_val: JsonValue = DocValue::string("hello").into();
//!
//! // Reverse: JSON object → Document
//! let doc = json_to_document(serde_json::json!({"$oid": "..."}))?;
//! ```

pub mod forward;
pub mod reverse;

pub use forward::{document_to_json, JsonValue};
pub use reverse::{
    json_to_doc_value, json_to_doc_value_with_config, json_to_document,
    json_to_document_with_config, JsonConversionConfig, JsonConversionError,
};
