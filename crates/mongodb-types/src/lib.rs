//! MongoDB/BSON conversions for panel-core document values.
//!
//! This crate provides bidirectional conversions between panel-core's
//! [`DocValue`](panel_core::DocValue) and MongoDB's BSON types.
//!
//! # Modules
//!
//! - [`forward`] - DocValue → BSON value conversion
//! - [`reverse`] - BSON value → DocValue conversion
//!
//! # Example
//!
//! ```ignore
//! use mongodb_types::{bson_to_doc_value, BsonValue};
//! use panel_core::DocValue;
//!
//! let bson_val: BsonValue = DocValue::string("hello").into();
//! let back = bson_to_doc_value(bson_val.into_inner());
//! ```

pub mod forward;
pub mod reverse;

pub use forward::{document_to_bson, BsonValue};
pub use reverse::{bson_document_to_document, bson_to_doc_value};
