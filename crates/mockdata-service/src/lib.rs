//! Mock data service for the universal panel.
//!
//! Two services live here:
//!
//! - [`MockdataService`] - custom, preset and bulk record generation, schema
//!   validation with statistics, preview samples
//! - [`SchemaService`] - preset catalog browsing, structural validation,
//!   schema comparison and the field-type catalog
//!
//! Both are plain synchronous types; the HTTP layer decides where they run.
//! Custom schemas are never registered, so a custom schema named like a
//! preset does not shadow the catalog entry.

pub mod mockdata;
pub mod schemas;

pub use mockdata::{
    BulkItem, BulkOutcome, GenerateRequest, GeneratedData, MockdataService, SampleData,
    SchemaStatistics, DEFAULT_PRESET_COUNT, MAX_BULK_ITEMS, SAMPLE_COUNT,
};
pub use schemas::{
    complexity, Complexity, FieldDetail, FieldTypeInfo, PresetDefinition, PresetSummary,
    SchemaComparison, SchemaDetails, SchemaService,
};
