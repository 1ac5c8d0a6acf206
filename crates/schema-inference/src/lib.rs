//! Schema inference for schemaless document collections.
//!
//! Given a sample of heterogeneous documents, infer for every field path the
//! dominant type, how often it appears and the full type breakdown. In
//! enhanced mode each field also carries statistics used to generate UI forms:
//! length and value ranges, sampled values, a suggested widget and a detected
//! pattern.
//!
//! ## Example
//!
//! ```rust,ignore
//! use schema_inference::{analyze, SchemaAnalyzer};
//!
//! let summary = analyze(&documents, true);
//! for (path, field) in &summary {
//!     println!("{path}: {} ({:.0}%)", field.dominant, field.frequency * 100.0);
//! }
//!
//! // Or incrementally
//! let mut analyzer = SchemaAnalyzer::enhanced();
//! analyzer.observe(&doc);
//! let summary = analyzer.finish();
//! ```

mod analyzer;
mod patterns;
mod stats;

pub use analyzer::{analyze, FieldSummary, SchemaAnalyzer, SchemaSummary};
pub use patterns::{detect_pattern, detect_widget, PatternKind, Widget};
pub use stats::{FieldStats, MAX_EXAMPLES, MAX_UNIQUE_VALUES};
