//! Core types for the universal panel services.
//!
//! This crate provides the foundational types shared by the document gateway
//! and the mock data generator:
//!
//! - [`DocValue`] - Dynamically-typed document value tree
//! - [`classify`] / [`TypeTag`] - The value classifier
//! - [`FieldSpec`] / [`Schema`] - Declarative field specifications
//! - [`validation`] - Fail-fast and structural schema checks
//! - [`presets`] - The read-only preset schema catalog
//! - [`ServiceError`] - Error taxonomy shared by every service
//!
//! # Architecture
//!
//! ```text
//! panel-core (this crate)
//!    │
//!    ├─── json-types          (DocValue <-> serde_json)
//!    ├─── mongodb-types       (DocValue <-> BSON)
//!    ├─── schema-inference    (infers field summaries over documents)
//!    ├─── mockdata-generator  (generates records from FieldSpecs)
//!    ├─── mockdata-service / db-access
//!    └─── panel-api           (HTTP surface)
//! ```

pub mod error;
pub mod presets;
pub mod schema;
pub mod validation;
pub mod values;

pub use error::{SchemaError, ServiceError, ServiceResult};
pub use schema::{DataType, FieldSpec, Schema};
pub use validation::{collect_violations, validate_schema, validate_structure, StructureReport};
pub use values::{classify, DocValue, Document, TypeTag};
