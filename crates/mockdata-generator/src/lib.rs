//! Mock data generator for the universal panel.
//!
//! This crate turns a list of [`FieldSpec`](panel_core::FieldSpec)s into
//! synthetic records. Every randomised step draws from a caller-provided RNG,
//! so a generator built with [`MockDataGenerator::new`] and a pinned
//! reference time is fully reproducible.
//!
//! # Architecture
//!
//! ```text
//! Schema / [FieldSpec]
//!        │
//!        ▼
//! ┌────────────────────┐
//! │ MockDataGenerator  │
//! │                    │
//! │  - rng (StdRng)    │
//! │  - reference_time  │
//! └─────────┬──────────┘
//!           │  generate_field_value (per type)
//!           ▼
//!     Document { field name -> DocValue }
//! ```
//!
//! # Example
//!
//! ```rust
//! use mockdata_generator::MockDataGenerator;
//!
//! let schema = panel_core::presets::get("user").unwrap();
//! let mut generator = MockDataGenerator::new(42);
//! let records = generator.generate_records(schema, 5).unwrap();
//! assert_eq!(records.len(), 5);
//! ```
//!
//! # Field types
//!
//! - `string` - options, named pattern, or lorem text fitted to the length bounds
//! - `int` / `float` - uniform within `[min, max]` (max 0 means 1000)
//! - `bool` - fair coin
//! - `date` - within five years of the reference time
//! - `email`, `name`, `phone`, `url`, `address` - fake values
//! - `uuid` - random v4 UUID
//! - `array` - elements of `array_type`
//! - `json` - object built from the nested fields
//!
//! Optional fields come out null with probability 0.1.

pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use generator::{GeneratorError, MockDataGenerator, RecordIterator};
pub use generators::{generate_field_value, OPTIONAL_NULL_PROBABILITY};
