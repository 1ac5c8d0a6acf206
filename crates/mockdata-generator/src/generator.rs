//! Record generator producing documents from a list of field specifications.

use crate::generators::generate_field_value;
use chrono::{DateTime, Utc};
use panel_core::{Document, FieldSpec, Schema, ServiceError};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Array field without an element type
    #[error("field '{0}': array_type is required for array fields")]
    MissingArrayType(String),

    /// Constraints no value can satisfy
    #[error("field '{field}': {reason}")]
    Unsatisfiable { field: String, reason: String },

    /// An array element failed to generate
    #[error("field '{field}': {source}")]
    Element {
        field: String,
        #[source]
        source: Box<GeneratorError>,
    },
}

impl From<GeneratorError> for ServiceError {
    fn from(err: GeneratorError) -> Self {
        ServiceError::generation(err.to_string())
    }
}

/// Data generator producing mock records.
///
/// Holds its own seeded RNG so that a generator built with the same seed and
/// reference time yields the same records for the same fields. Dates are drawn
/// within five years of the reference time, which defaults to creation time.
pub struct MockDataGenerator {
    rng: StdRng,
    reference_time: DateTime<Utc>,
}

impl MockDataGenerator {
    /// Create a generator with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            reference_time: Utc::now(),
        }
    }

    /// Create a generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            reference_time: Utc::now(),
        }
    }

    /// Pin the reference time dates are generated around.
    pub fn with_reference_time(mut self, reference_time: DateTime<Utc>) -> Self {
        self.reference_time = reference_time;
        self
    }

    pub fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time
    }

    /// Generate a value for a single field.
    pub fn generate_field(
        &mut self,
        field: &FieldSpec,
    ) -> Result<panel_core::DocValue, GeneratorError> {
        generate_field_value(&mut self.rng, field, self.reference_time)
    }

    /// Generate one record with an entry for every field.
    ///
    /// Optional fields may be present with a null value; they are never
    /// omitted.
    pub fn generate_record(&mut self, fields: &[FieldSpec]) -> Result<Document, GeneratorError> {
        let mut record = Document::new();
        for field in fields {
            let value = self.generate_field(field)?;
            record.insert(field.name.clone(), value);
        }
        Ok(record)
    }

    /// Generate `count` records for a schema.
    ///
    /// The schema is assumed to be validated by the caller.
    pub fn generate_records(
        &mut self,
        schema: &Schema,
        count: usize,
    ) -> Result<Vec<Document>, GeneratorError> {
        let records = self.records(&schema.fields, count).collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(
            "Generated {} records for schema '{}'",
            records.len(),
            schema.name
        );
        Ok(records)
    }

    /// Lazily generate `count` records.
    pub fn records<'a>(&'a mut self, fields: &'a [FieldSpec], count: usize) -> RecordIterator<'a> {
        RecordIterator {
            generator: self,
            fields,
            remaining: count,
        }
    }
}

/// Iterator that lazily generates records.
pub struct RecordIterator<'a> {
    generator: &'a mut MockDataGenerator,
    fields: &'a [FieldSpec],
    remaining: usize,
}

impl Iterator for RecordIterator<'_> {
    type Item = Result<Document, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.generator.generate_record(self.fields))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
