//! Mock data orchestration: drives the generator across schemas and counts.

use mockdata_generator::MockDataGenerator;
use panel_core::validation::{sanitize_count, validate_count, MAX_RECORD_COUNT};
use panel_core::{presets, validate_schema, Document, Schema, ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Records generated for a preset when the caller gives no usable count.
pub const DEFAULT_PRESET_COUNT: i64 = 10;

/// Records in a preview sample.
pub const SAMPLE_COUNT: i64 = 3;

/// Items accepted by one bulk request.
pub const MAX_BULK_ITEMS: usize = 10;

const SAMPLE_NOTE: &str =
    "This is a sample preview. Use /generate endpoint for full data generation.";

/// Request to generate records from a caller-supplied schema.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub schema: Schema,
    #[serde(default)]
    pub count: i64,
}

/// One entry of a bulk generation request.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkItem {
    pub name: String,
    #[serde(default)]
    pub count: i64,
    /// Use `schema` instead of the preset called `name`
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub schema: Option<Schema>,
}

/// Generated records together with the schema they came from.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedData {
    pub schema: String,
    pub count: usize,
    pub data: Vec<Document>,
}

/// Result of one bulk item. Failures do not abort the remaining items.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BulkOutcome {
    Generated { data: Vec<Document>, count: usize },
    Failed { error: String, count: usize },
}

impl BulkOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, BulkOutcome::Failed { .. })
    }
}

/// Preview records for a preset.
#[derive(Debug, Clone, Serialize)]
pub struct SampleData {
    pub schema: String,
    pub sample: Vec<Document>,
    pub count: usize,
    pub note: &'static str,
}

/// Field counts of a schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaStatistics {
    pub name: String,
    pub description: String,
    pub total_fields: usize,
    pub field_types: BTreeMap<String, usize>,
    pub required_fields: usize,
    pub optional_fields: usize,
}

impl SchemaStatistics {
    pub fn of(schema: &Schema) -> Self {
        Self {
            name: schema.name.clone(),
            description: schema.description.clone(),
            total_fields: schema.fields.len(),
            field_types: schema.field_type_counts(),
            required_fields: schema.required_count(),
            optional_fields: schema.optional_count(),
        }
    }
}

/// Generates mock records from custom or preset schemas.
#[derive(Debug, Clone)]
pub struct MockdataService {
    max_records: i64,
    seed: Option<u64>,
}

impl Default for MockdataService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockdataService {
    pub fn new() -> Self {
        Self {
            max_records: MAX_RECORD_COUNT,
            seed: None,
        }
    }

    /// Override the per-request record limit.
    pub fn with_max_records(mut self, max_records: i64) -> Self {
        self.max_records = max_records.max(1);
        self
    }

    /// Seed every generator this service creates, making output repeatable.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn max_records(&self) -> i64 {
        self.max_records
    }

    fn generator(&self) -> MockDataGenerator {
        match self.seed {
            Some(seed) => MockDataGenerator::new(seed),
            None => MockDataGenerator::from_entropy(),
        }
    }

    /// Validate the schema and count, then generate the records.
    pub fn generate(&self, request: &GenerateRequest) -> ServiceResult<GeneratedData> {
        validate_schema(&request.schema)?;
        validate_count(request.count, self.max_records)?;

        self.generate_validated(&request.schema, request.count as usize)
    }

    fn generate_validated(&self, schema: &Schema, count: usize) -> ServiceResult<GeneratedData> {
        info!(
            "Generating {} records for schema '{}' ({} fields)",
            count,
            schema.name,
            schema.fields.len()
        );

        let data = self.generator().generate_records(schema, count)?;

        Ok(GeneratedData {
            schema: schema.name.clone(),
            count: data.len(),
            data,
        })
    }

    fn preset(&self, name: &str) -> ServiceResult<&'static Schema> {
        presets::get(name).ok_or_else(|| {
            ServiceError::not_found(format!("predefined schema '{name}' not found"))
        })
    }

    /// Generate records from a preset. The count is clamped into range.
    pub fn generate_preset(&self, name: &str, count: i64) -> ServiceResult<GeneratedData> {
        let schema = self.preset(name)?;
        let count = sanitize_count(count, self.max_records);

        let mut generated = self.generate_validated(schema, count)?;
        generated.schema = name.to_string();
        Ok(generated)
    }

    /// Generate for several schemas in input order.
    ///
    /// Results are keyed by item name; a later item with the same name
    /// replaces the earlier result.
    pub fn bulk_generate(&self, items: &[BulkItem]) -> ServiceResult<BTreeMap<String, BulkOutcome>> {
        if items.is_empty() {
            return Err(ServiceError::validation("At least one schema is required"));
        }
        if items.len() > MAX_BULK_ITEMS {
            return Err(ServiceError::validation(format!(
                "Maximum {MAX_BULK_ITEMS} schemas allowed per bulk request"
            )));
        }

        let mut results = BTreeMap::new();
        for item in items {
            let outcome = match self.generate_item(item) {
                Ok(generated) => BulkOutcome::Generated {
                    count: generated.count,
                    data: generated.data,
                },
                Err(e) => {
                    warn!("Bulk generation failed for '{}': {}", item.name, e);
                    BulkOutcome::Failed {
                        error: e.to_string(),
                        count: 0,
                    }
                }
            };
            results.insert(item.name.clone(), outcome);
        }

        debug!("Bulk generation finished for {} items", items.len());
        Ok(results)
    }

    fn generate_item(&self, item: &BulkItem) -> ServiceResult<GeneratedData> {
        if item.custom {
            let request = GenerateRequest {
                schema: item.schema.clone().unwrap_or_default(),
                count: item.count,
            };
            self.generate(&request)
        } else {
            self.generate_preset(&item.name, item.count)
        }
    }

    /// Three preview records from a preset.
    pub fn sample(&self, name: &str) -> ServiceResult<SampleData> {
        let generated = self.generate_preset(name, SAMPLE_COUNT)?;
        Ok(SampleData {
            schema: generated.schema,
            count: generated.count,
            sample: generated.data,
            note: SAMPLE_NOTE,
        })
    }

    /// Fail-fast validation; statistics for a valid schema.
    pub fn validate_custom(&self, schema: &Schema) -> ServiceResult<SchemaStatistics> {
        validate_schema(schema)?;
        Ok(SchemaStatistics::of(schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::{DataType, FieldSpec};

    fn custom_schema() -> Schema {
        Schema::new("Ticket", "support ticket").with_fields(vec![
            FieldSpec::new("id", DataType::Uuid).required(),
            FieldSpec::new("priority", DataType::String)
                .required()
                .with_options(&["low", "high"]),
            FieldSpec::new("note", DataType::String),
        ])
    }

    #[test]
    fn test_generate_custom() {
        let service = MockdataService::new().with_seed(42);
        let request = GenerateRequest {
            schema: custom_schema(),
            count: 5,
        };

        let generated = service.generate(&request).unwrap();
        assert_eq!(generated.schema, "Ticket");
        assert_eq!(generated.count, 5);
        for record in &generated.data {
            let priority = record["priority"].as_str().unwrap();
            assert!(priority == "low" || priority == "high");
        }
    }

    #[test]
    fn test_generate_rejects_bad_count() {
        let service = MockdataService::new();

        let zero = GenerateRequest {
            schema: custom_schema(),
            count: 0,
        };
        assert_eq!(
            service.generate(&zero).unwrap_err(),
            ServiceError::validation("count must be greater than 0")
        );

        let limited = MockdataService::new().with_max_records(20);
        let too_many = GenerateRequest {
            schema: custom_schema(),
            count: 21,
        };
        assert_eq!(
            limited.generate(&too_many).unwrap_err().to_string(),
            "count cannot exceed 20 for performance reasons"
        );
    }

    #[test]
    fn test_generate_rejects_invalid_schema_first() {
        let service = MockdataService::new();
        let request = GenerateRequest {
            schema: Schema::new("", ""),
            count: 0,
        };

        assert_eq!(
            service.generate(&request).unwrap_err(),
            ServiceError::validation("schema name is required")
        );
    }

    #[test]
    fn test_generate_rejects_unbounded_constraints() {
        let service = MockdataService::new().with_seed(1);
        let huge_array = GenerateRequest {
            schema: Schema::new("Big", "").with_fields(vec![FieldSpec::new("xs", DataType::Array)
                .required()
                .array_of(DataType::Bool, 1_000_000_000_000)]),
            count: 1,
        };
        assert_eq!(
            service.generate(&huge_array).unwrap_err(),
            ServiceError::validation("field 'xs': array_length cannot exceed 1000")
        );

        let wide_float = GenerateRequest {
            schema: Schema::new("Wide", "").with_fields(vec![FieldSpec::new("x", DataType::Float)
                .required()
                .with_range(-1e308, 1e308)]),
            count: 1,
        };
        assert!(matches!(
            service.generate(&wide_float).unwrap_err(),
            ServiceError::Validation(_)
        ));
    }

    #[test]
    fn test_generate_preset_clamps_count() {
        let service = MockdataService::new().with_seed(1).with_max_records(15);

        assert_eq!(service.generate_preset("product", -3).unwrap().count, 1);
        assert_eq!(service.generate_preset("product", 100).unwrap().count, 15);
    }

    #[test]
    fn test_unknown_preset_is_not_found() {
        let service = MockdataService::new();
        let err = service.generate_preset("spaceship", 5).unwrap_err();
        assert_eq!(
            err,
            ServiceError::not_found("predefined schema 'spaceship' not found")
        );
        assert!(matches!(service.sample("spaceship"), Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn test_bulk_isolates_failures() {
        let service = MockdataService::new().with_seed(3);
        let items = vec![
            BulkItem {
                name: "user".into(),
                count: 2,
                custom: false,
                schema: None,
            },
            BulkItem {
                name: "missing".into(),
                count: 2,
                custom: false,
                schema: None,
            },
            BulkItem {
                name: "ticket".into(),
                count: 4,
                custom: true,
                schema: Some(custom_schema()),
            },
        ];

        let results = service.bulk_generate(&items).unwrap();
        assert_eq!(results.len(), 3);
        assert!(matches!(results["user"], BulkOutcome::Generated { count: 2, .. }));
        assert!(results["missing"].is_failure());
        assert!(matches!(results["ticket"], BulkOutcome::Generated { count: 4, .. }));

        let json = serde_json::to_value(&results["missing"]).unwrap();
        assert_eq!(json["count"], 0);
        assert_eq!(json["error"], "predefined schema 'missing' not found");
    }

    #[test]
    fn test_bulk_item_limits() {
        let service = MockdataService::new();
        assert!(service.bulk_generate(&[]).is_err());

        let items: Vec<BulkItem> = (0..11)
            .map(|i| BulkItem {
                name: format!("s{i}"),
                count: 1,
                custom: false,
                schema: None,
            })
            .collect();
        assert_eq!(
            service.bulk_generate(&items).unwrap_err().to_string(),
            "Maximum 10 schemas allowed per bulk request"
        );
    }

    #[test]
    fn test_sample_has_three_records() {
        let service = MockdataService::new().with_seed(9);
        let sample = service.sample("blog_post").unwrap();
        assert_eq!(sample.count, 3);
        assert_eq!(sample.sample.len(), 3);
        assert_eq!(sample.schema, "blog_post");
    }

    #[test]
    fn test_custom_schema_does_not_shadow_preset() {
        let service = MockdataService::new().with_seed(5);
        let request = GenerateRequest {
            schema: Schema::new("user", "")
                .with_fields(vec![FieldSpec::new("only", DataType::Bool).required()]),
            count: 1,
        };

        let custom = service.generate(&request).unwrap();
        assert_eq!(custom.data[0].len(), 1);

        let preset = service.generate_preset("user", 1).unwrap();
        assert!(preset.data[0].contains_key("email"));
    }

    #[test]
    fn test_validate_custom_statistics() {
        let service = MockdataService::new();
        let stats = service.validate_custom(&custom_schema()).unwrap();

        assert_eq!(stats.total_fields, 3);
        assert_eq!(stats.required_fields, 2);
        assert_eq!(stats.optional_fields, 1);
        assert_eq!(stats.field_types.get("string"), Some(&2));

        let broken = Schema::new("x", "").with_fields(vec![FieldSpec::new("t", DataType::Array)]);
        assert_eq!(
            service.validate_custom(&broken).unwrap_err().to_string(),
            "field 't': array_type is required for array fields"
        );
    }

    #[test]
    fn test_bulk_item_deserialization() {
        let items: Vec<BulkItem> = serde_json::from_value(serde_json::json!([
            {"name": "user", "count": 3},
            {"name": "t", "count": 1, "custom": true, "schema": {"name": "t", "fields": []}}
        ]))
        .unwrap();

        assert!(!items[0].custom);
        assert!(items[0].schema.is_none());
        assert!(items[1].custom);
    }
}
