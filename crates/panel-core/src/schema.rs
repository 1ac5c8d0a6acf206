//! Field specifications and named schemas.
//!
//! A [`Schema`] is a named, ordered list of [`FieldSpec`]s. Schemas arrive in
//! request payloads, are loaded from YAML/JSON files, or come from the preset
//! catalog. They are immutable once built and are never persisted.

use crate::error::SchemaError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

// ============================================================================
// Data Types
// ============================================================================

/// Closed set of generatable field types.
///
/// Tags outside the set are kept as [`DataType::Unknown`] so the validator
/// can report them by name instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataType {
    String,
    Int,
    Float,
    Bool,
    Date,
    Email,
    Name,
    Address,
    Phone,
    Uuid,
    Url,
    Json,
    Array,
    Unknown(String),
}

impl DataType {
    /// Every valid tag, in catalog order.
    pub const ALL: [DataType; 13] = [
        DataType::String,
        DataType::Int,
        DataType::Float,
        DataType::Bool,
        DataType::Date,
        DataType::Email,
        DataType::Name,
        DataType::Address,
        DataType::Phone,
        DataType::Uuid,
        DataType::Url,
        DataType::Json,
        DataType::Array,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            DataType::String => "string",
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Bool => "bool",
            DataType::Date => "date",
            DataType::Email => "email",
            DataType::Name => "name",
            DataType::Address => "address",
            DataType::Phone => "phone",
            DataType::Uuid => "uuid",
            DataType::Url => "url",
            DataType::Json => "json",
            DataType::Array => "array",
            DataType::Unknown(tag) => tag,
        }
    }

    /// Whether this tag is one of the known types.
    pub fn is_valid(&self) -> bool {
        !matches!(self, DataType::Unknown(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int | DataType::Float)
    }
}

impl From<String> for DataType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "string" => DataType::String,
            "int" => DataType::Int,
            "float" => DataType::Float,
            "bool" => DataType::Bool,
            "date" => DataType::Date,
            "email" => DataType::Email,
            "name" => DataType::Name,
            "address" => DataType::Address,
            "phone" => DataType::Phone,
            "uuid" => DataType::Uuid,
            "url" => DataType::Url,
            "json" => DataType::Json,
            "array" => DataType::Array,
            _ => DataType::Unknown(tag),
        }
    }
}

impl From<&str> for DataType {
    fn from(tag: &str) -> Self {
        DataType::from(tag.to_string())
    }
}

impl From<DataType> for String {
    fn from(dt: DataType) -> Self {
        dt.as_str().to_string()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Treat absent and empty type tags the same way.
fn empty_tag_as_none<'de, D>(deserializer: D) -> Result<Option<DataType>, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<String>::deserialize(deserializer)?;
    Ok(tag.filter(|t| !t.is_empty()).map(DataType::from))
}

fn is_zero_usize(v: &usize) -> bool {
    *v == 0
}

fn is_zero_i64(v: &i64) -> bool {
    *v == 0
}

fn is_zero_f64(v: &f64) -> bool {
    *v == 0.0
}

// ============================================================================
// Field Specification
// ============================================================================

/// Declarative description of one generated field.
///
/// Zero means "unset" for the length, numeric and array-length bounds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldSpec {
    #[serde(default)]
    pub name: String,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "empty_tag_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub field_type: Option<DataType>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "is_zero_usize")]
    pub min_length: usize,

    #[serde(default, skip_serializing_if = "is_zero_usize")]
    pub max_length: usize,

    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub min: f64,

    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub max: f64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Semantic hint such as `firstname`, `company` or `color`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(
        default,
        deserialize_with = "empty_tag_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub array_type: Option<DataType>,

    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub array_length: i64,

    /// Child fields of a `json` field
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<FieldSpec>,
}

impl FieldSpec {
    /// Create an optional field of the given type.
    pub fn new(name: impl Into<String>, field_type: DataType) -> Self {
        Self {
            name: name.into(),
            field_type: Some(field_type),
            ..Default::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_length(mut self, min_length: usize, max_length: usize) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_options<S: AsRef<str>>(mut self, options: &[S]) -> Self {
        self.options = options.iter().map(|o| o.as_ref().to_string()).collect();
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Turn this field into an array of `element_type` values.
    pub fn array_of(mut self, element_type: DataType, length: i64) -> Self {
        self.field_type = Some(DataType::Array);
        self.array_type = Some(element_type);
        self.array_length = length;
        self
    }

    pub fn with_nested(mut self, nested: Vec<FieldSpec>) -> Self {
        self.nested = nested;
        self
    }

    /// Type tag of this field, empty when absent.
    pub fn type_name(&self) -> &str {
        self.field_type.as_ref().map(DataType::as_str).unwrap_or("")
    }
}

// ============================================================================
// Schema
// ============================================================================

/// A named list of field specifications.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields = fields;
        self
    }

    /// Load schema from a YAML or JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from a YAML string. JSON input is accepted as well.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_yaml::from_str(yaml)?;
        Ok(schema)
    }

    pub fn required_count(&self) -> usize {
        self.fields.iter().filter(|f| f.required).count()
    }

    pub fn optional_count(&self) -> usize {
        self.fields.len() - self.required_count()
    }

    /// Number of top-level fields per type tag.
    pub fn field_type_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for field in &self.fields {
            *counts.entry(field.type_name().to_string()).or_insert(0) += 1;
        }
        counts
    }
}
