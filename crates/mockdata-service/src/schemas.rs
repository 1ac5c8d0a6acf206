//! Preset catalog browsing, structural validation and schema comparison.

use panel_core::{presets, validate_structure, DataType, FieldSpec, Schema, ServiceError};
use panel_core::{ServiceResult, StructureReport};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Rough generation cost of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        };
        f.write_str(label)
    }
}

fn field_score(field: &FieldSpec) -> usize {
    match &field.field_type {
        Some(DataType::String | DataType::Int | DataType::Float | DataType::Bool) => 1,
        Some(DataType::Date | DataType::Email | DataType::Name | DataType::Phone) => 2,
        Some(DataType::Address | DataType::Uuid | DataType::Url) => 3,
        Some(DataType::Array) => 4,
        Some(DataType::Json) => 5 + field.nested.len(),
        Some(DataType::Unknown(_)) | None => 0,
    }
}

/// Score the top-level fields: below 10 is low, below 25 medium.
pub fn complexity(fields: &[FieldSpec]) -> Complexity {
    let score: usize = fields.iter().map(field_score).sum();
    match score {
        0..=9 => Complexity::Low,
        10..=24 => Complexity::Medium,
        _ => Complexity::High,
    }
}

/// Catalog entry overview.
#[derive(Debug, Clone, Serialize)]
pub struct PresetSummary {
    pub name: String,
    pub description: String,
    pub field_count: usize,
    pub required_count: usize,
    pub field_types: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayConfig {
    pub element_type: String,
    pub length: i64,
}

/// Per-field description used by the details view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDetail {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_constraints: Option<Bounds<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_constraints: Option<Bounds<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_config: Option<ArrayConfig>,
}

impl From<&FieldSpec> for FieldDetail {
    fn from(field: &FieldSpec) -> Self {
        let length_constraints = (field.min_length > 0 || field.max_length > 0).then_some(Bounds {
            min: field.min_length,
            max: field.max_length,
        });
        let numeric_constraints = (field.min > 0.0 || field.max > 0.0).then_some(Bounds {
            min: field.min,
            max: field.max,
        });
        let array_config = (field.field_type == Some(DataType::Array)).then(|| ArrayConfig {
            element_type: field
                .array_type
                .as_ref()
                .map(|t| t.to_string())
                .unwrap_or_default(),
            length: field.array_length,
        });

        Self {
            name: field.name.clone(),
            field_type: field.type_name().to_string(),
            required: field.required,
            length_constraints,
            numeric_constraints,
            options: (!field.options.is_empty()).then(|| field.options.clone()),
            pattern: field.pattern.clone().filter(|p| !p.is_empty()),
            array_config,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SchemaStatisticsDetail {
    pub total_fields: usize,
    pub required_fields: usize,
    pub optional_fields: usize,
    pub field_types: BTreeMap<String, usize>,
    pub complexity: Complexity,
}

/// Detailed view of a preset.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaDetails {
    pub name: String,
    pub description: String,
    pub fields: Vec<FieldDetail>,
    pub statistics: SchemaStatisticsDetail,
}

/// Differences between two schemas by field count and type distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaComparison {
    pub schema1_name: String,
    pub schema2_name: String,
    pub differences: Vec<String>,
    pub similarities: Vec<String>,
}

/// A preset definition as stored in the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct PresetDefinition {
    pub name: String,
    pub schema: Schema,
}

/// Catalog description of one field type.
#[derive(Debug, Clone, Serialize)]
pub struct FieldTypeInfo {
    pub description: &'static str,
    pub options: &'static [&'static str],
    #[serde(skip_serializing_if = "no_required_options")]
    pub required: &'static [&'static str],
}

fn no_required_options(list: &&'static [&'static str]) -> bool {
    list.is_empty()
}

fn type_info(data_type: &DataType) -> FieldTypeInfo {
    let (description, options, required): (_, &'static [&'static str], &'static [&'static str]) =
        match data_type {
            DataType::String => (
                "Text data with optional length constraints",
                &["min_length", "max_length", "pattern", "options"],
                &[],
            ),
            DataType::Int => (
                "Integer numbers with optional min/max constraints",
                &["min", "max"],
                &[],
            ),
            DataType::Float => (
                "Decimal numbers with optional min/max constraints",
                &["min", "max"],
                &[],
            ),
            DataType::Bool => ("Boolean true/false values", &[], &[]),
            DataType::Date => ("Date and time values", &[], &[]),
            DataType::Email => ("Valid email addresses", &[], &[]),
            DataType::Name => ("Human names (first, last, or full)", &["pattern"], &[]),
            DataType::Address => (
                "Address objects with street, city, state, zip, country",
                &[],
                &[],
            ),
            DataType::Phone => ("Phone numbers in various formats", &[], &[]),
            DataType::Uuid => ("Universally unique identifiers", &[], &[]),
            DataType::Url => ("Valid URL addresses", &[], &[]),
            DataType::Array => (
                "Arrays of specified element types",
                &["array_type", "array_length"],
                &["array_type"],
            ),
            DataType::Json => ("Nested JSON objects", &["nested"], &["nested"]),
            DataType::Unknown(_) => ("Unrecognised type, generated as text", &[], &[]),
        };

    FieldTypeInfo {
        description,
        options,
        required,
    }
}

/// Read-only views over the preset catalog plus schema utilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaService;

impl SchemaService {
    pub fn new() -> Self {
        Self
    }

    fn preset(&self, name: &str) -> ServiceResult<&'static Schema> {
        presets::get(name)
            .ok_or_else(|| ServiceError::not_found(format!("schema '{name}' not found")))
    }

    /// Overview of every preset, keyed by catalog name.
    pub fn list_presets(&self) -> BTreeMap<String, PresetSummary> {
        presets::all()
            .iter()
            .map(|(key, schema)| {
                let summary = PresetSummary {
                    name: schema.name.clone(),
                    description: schema.description.clone(),
                    field_count: schema.fields.len(),
                    required_count: schema.required_count(),
                    field_types: schema.field_type_counts(),
                };
                (key.to_string(), summary)
            })
            .collect()
    }

    pub fn preset_details(&self, name: &str) -> ServiceResult<SchemaDetails> {
        let schema = self.preset(name)?;

        Ok(SchemaDetails {
            name: schema.name.clone(),
            description: schema.description.clone(),
            fields: schema.fields.iter().map(FieldDetail::from).collect(),
            statistics: SchemaStatisticsDetail {
                total_fields: schema.fields.len(),
                required_fields: schema.required_count(),
                optional_fields: schema.optional_count(),
                field_types: schema.field_type_counts(),
                complexity: complexity(&schema.fields),
            },
        })
    }

    pub fn preset_definition(&self, name: &str) -> ServiceResult<PresetDefinition> {
        let schema = self.preset(name)?;
        Ok(PresetDefinition {
            name: name.to_string(),
            schema: schema.clone(),
        })
    }

    pub fn validate_structure(&self, schema: &Schema) -> StructureReport {
        validate_structure(schema)
    }

    /// Compare field counts and per-type counts of two schemas.
    pub fn compare(&self, first: &Schema, second: &Schema) -> SchemaComparison {
        let mut differences = Vec::new();
        let mut similarities = Vec::new();

        let (len1, len2) = (first.fields.len(), second.fields.len());
        if len1 != len2 {
            differences.push(format!("Field count differs: {len1} vs {len2}"));
        } else {
            similarities.push(format!("Both schemas have {len1} fields"));
        }

        let types1 = first.field_type_counts();
        let types2 = second.field_type_counts();

        for (field_type, count1) in &types1 {
            match types2.get(field_type) {
                Some(count2) if count1 != count2 => differences.push(format!(
                    "'{field_type}' field count differs: {count1} vs {count2}"
                )),
                Some(_) => {}
                None => differences.push(format!("'{field_type}' fields only in schema1")),
            }
        }
        for field_type in types2.keys() {
            if !types1.contains_key(field_type) {
                differences.push(format!("'{field_type}' fields only in schema2"));
            }
        }

        SchemaComparison {
            schema1_name: first.name.clone(),
            schema2_name: second.name.clone(),
            differences,
            similarities,
        }
    }

    /// Every supported field type with its description and options.
    pub fn field_types(&self) -> BTreeMap<String, FieldTypeInfo> {
        DataType::ALL
            .iter()
            .map(|data_type| (data_type.to_string(), type_info(data_type)))
            .collect()
    }
}
