//! Static checks over schemas before generation starts.
//!
//! Two flavours exist. [`validate_schema`] fails on the first violation and
//! is used at request time. [`collect_violations`] runs the same per-field
//! rules but keeps going. [`validate_structure`] is the bulk report with
//! non-fatal warnings.

use crate::error::{ServiceError, ServiceResult};
use crate::schema::{DataType, FieldSpec, Schema};
use serde::Serialize;
use std::collections::HashSet;

/// Upper bound on records generated per request.
pub const MAX_RECORD_COUNT: i64 = 10_000;

/// Upper bound for `min_length` and `max_length` on any field.
pub const MAX_STRING_LENGTH: usize = 10_000;

/// Upper bound for `array_length`.
pub const MAX_ARRAY_LENGTH: i64 = 1_000;

/// String `max_length` above which the structural report warns.
const LARGE_MAX_LENGTH: usize = 1000;

/// Field count above which the structural report warns.
const MANY_FIELDS: usize = 50;

/// Check a schema, failing with the first violation found.
pub fn validate_schema(schema: &Schema) -> ServiceResult<()> {
    match collect_violations(schema).into_iter().next() {
        Some(violation) => Err(ServiceError::Validation(violation)),
        None => Ok(()),
    }
}

/// Check a schema, returning every violation. Empty means valid.
pub fn collect_violations(schema: &Schema) -> Vec<String> {
    let mut violations = Vec::new();

    if schema.name.is_empty() {
        violations.push("schema name is required".to_string());
    }

    if schema.fields.is_empty() {
        violations.push("schema must have at least one field".to_string());
    }

    for (index, field) in schema.fields.iter().enumerate() {
        violations.extend(field_violations(field, index));
    }

    violations
}

/// Per-field rules, applied recursively to `json` children.
fn field_violations(field: &FieldSpec, index: usize) -> Vec<String> {
    if field.name.is_empty() {
        return vec![format!("field at index {index}: name is required")];
    }

    let name = &field.name;
    let Some(field_type) = &field.field_type else {
        return vec![format!("field '{name}': type is required")];
    };

    if !field_type.is_valid() {
        return vec![format!("field '{name}': invalid type '{field_type}'")];
    }

    let mut violations = Vec::new();

    if *field_type == DataType::String
        && field.max_length > 0
        && field.min_length > field.max_length
    {
        violations.push(format!(
            "field '{name}': min_length cannot be greater than max_length"
        ));
    }

    if field.min_length > MAX_STRING_LENGTH || field.max_length > MAX_STRING_LENGTH {
        violations.push(format!(
            "field '{name}': length bounds cannot exceed {MAX_STRING_LENGTH}"
        ));
    }

    if field_type.is_numeric() && field.max > 0.0 && field.min > field.max {
        violations.push(format!("field '{name}': min cannot be greater than max"));
    }

    if field_type.is_numeric() && !(field.max - field.min).is_finite() {
        violations.push(format!(
            "field '{name}': min and max must be finite and representable as a range"
        ));
    }

    if *field_type == DataType::Array {
        match &field.array_type {
            None => violations.push(format!(
                "field '{name}': array_type is required for array fields"
            )),
            Some(element) if !element.is_valid() => violations.push(format!(
                "field '{name}': invalid array_type '{element}'"
            )),
            Some(_) => {}
        }
        if field.array_length < 0 {
            violations.push(format!("field '{name}': array_length cannot be negative"));
        }
        if field.array_length > MAX_ARRAY_LENGTH {
            violations.push(format!(
                "field '{name}': array_length cannot exceed {MAX_ARRAY_LENGTH}"
            ));
        }
    }

    if *field_type == DataType::Json {
        for (i, nested) in field.nested.iter().enumerate() {
            for violation in field_violations(nested, i) {
                violations.push(format!("field '{name}' nested field: {violation}"));
            }
        }
    }

    violations
}

/// Check a requested record count against `1..=max`.
pub fn validate_count(count: i64, max: i64) -> ServiceResult<()> {
    if count <= 0 {
        return Err(ServiceError::validation("count must be greater than 0"));
    }
    if count > max {
        return Err(ServiceError::validation(format!(
            "count cannot exceed {max} for performance reasons"
        )));
    }
    Ok(())
}

/// Clamp a record count into `1..=max`.
pub fn sanitize_count(count: i64, max: i64) -> usize {
    count.clamp(1, max.max(1)) as usize
}

/// Outcome of the structural check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Bulk structural check: reports every error and warning without stopping.
pub fn validate_structure(schema: &Schema) -> StructureReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if schema.name.is_empty() {
        errors.push("Schema name is required".to_string());
    }

    if schema.fields.is_empty() {
        errors.push("Schema must have at least one field".to_string());
    }

    let mut seen = HashSet::new();
    for (index, field) in schema.fields.iter().enumerate() {
        if !seen.insert(field.name.as_str()) {
            errors.push(format!("Duplicate field name '{}'", field.name));
        }

        if field.name.is_empty() {
            errors.push(format!("Field at index {index}: name is required"));
        }

        if field.field_type == Some(DataType::Array) && field.array_type.is_none() {
            errors.push(format!(
                "Field '{}': array_type is required for array fields",
                field.name
            ));
        }

        if field.field_type == Some(DataType::String) && field.max_length > LARGE_MAX_LENGTH {
            warnings.push(format!(
                "Field '{}': max_length is very large ({}), consider reducing for performance",
                field.name, field.max_length
            ));
        }
    }

    if schema.fields.len() > MANY_FIELDS {
        warnings.push("Schema has many fields (>50), generation might be slow".to_string());
    }

    StructureReport {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_with(fields: Vec<FieldSpec>) -> Schema {
        Schema::new("test", "").with_fields(fields)
    }

    #[test]
    fn test_valid_schema_has_no_violations() {
        let schema = schema_with(vec![
            FieldSpec::new("id", DataType::Uuid).required(),
            FieldSpec::new("title", DataType::String).with_length(5, 10),
            FieldSpec::new("tags", DataType::Array).array_of(DataType::String, 3),
        ]);
        assert!(collect_violations(&schema).is_empty());
        assert!(validate_schema(&schema).is_ok());
    }

    #[test]
    fn test_missing_array_type_is_single_violation() {
        let schema = schema_with(vec![
            FieldSpec::new("ok", DataType::Bool),
            FieldSpec::new("tags", DataType::Array),
        ]);

        let violations = collect_violations(&schema);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("'tags'"));
        assert!(violations[0].contains("array_type is required"));
    }

    #[test]
    fn test_schema_level_rules() {
        let schema = Schema::default();
        let err = validate_schema(&schema).unwrap_err();
        assert_eq!(err, ServiceError::validation("schema name is required"));

        let violations = collect_violations(&schema);
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_invalid_type_and_missing_name() {
        let schema = schema_with(vec![
            FieldSpec::new("", DataType::String),
            FieldSpec::new("blob", DataType::from("blob")),
        ]);

        let violations = collect_violations(&schema);
        assert_eq!(violations[0], "field at index 0: name is required");
        assert_eq!(violations[1], "field 'blob': invalid type 'blob'");
    }

    #[test]
    fn test_bounds_only_checked_when_max_set() {
        let inverted = schema_with(vec![FieldSpec::new("n", DataType::Int).with_range(10.0, 1.0)]);
        assert!(validate_schema(&inverted).is_err());

        let unbounded = schema_with(vec![FieldSpec::new("n", DataType::Int).with_range(10.0, 0.0)]);
        assert!(validate_schema(&unbounded).is_ok());

        let strings = schema_with(vec![FieldSpec::new("s", DataType::String).with_length(9, 3)]);
        assert!(validate_schema(&strings).is_err());
    }

    #[test]
    fn test_nested_violations_are_prefixed() {
        let schema = schema_with(vec![FieldSpec::new("meta", DataType::Json).with_nested(vec![
            FieldSpec::new("deep", DataType::Json)
                .with_nested(vec![FieldSpec::new("list", DataType::Array)]),
        ])]);

        let violations = collect_violations(&schema);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0],
            "field 'meta' nested field: field 'deep' nested field: \
             field 'list': array_type is required for array fields"
        );
    }

    #[test]
    fn test_negative_array_length() {
        let mut field = FieldSpec::new("xs", DataType::Array).array_of(DataType::Int, 0);
        field.array_length = -1;
        let err = validate_schema(&schema_with(vec![field])).unwrap_err();
        assert!(err.to_string().contains("array_length cannot be negative"));
    }

    #[test]
    fn test_oversized_array_length_rejected() {
        let schema = schema_with(vec![FieldSpec::new("xs", DataType::Array)
            .required()
            .array_of(DataType::Bool, 1_000_000_000_000)]);

        let err = validate_schema(&schema).unwrap_err();
        assert_eq!(
            err,
            ServiceError::validation("field 'xs': array_length cannot exceed 1000")
        );

        let at_limit = schema_with(vec![
            FieldSpec::new("xs", DataType::Array).array_of(DataType::Bool, MAX_ARRAY_LENGTH)
        ]);
        assert!(validate_schema(&at_limit).is_ok());
    }

    #[test]
    fn test_oversized_string_lengths_rejected() {
        let padded = schema_with(vec![
            FieldSpec::new("body", DataType::String).with_length(MAX_STRING_LENGTH + 1, 0)
        ]);
        let violations = collect_violations(&padded);
        assert_eq!(violations, vec!["field 'body': length bounds cannot exceed 10000"]);

        let elements = schema_with(vec![FieldSpec::new("xs", DataType::Array)
            .array_of(DataType::String, 2)
            .with_length(1, 50_000)]);
        assert!(validate_schema(&elements).is_err());
    }

    #[test]
    fn test_unrepresentable_numeric_span_rejected() {
        let wide = schema_with(vec![
            FieldSpec::new("x", DataType::Float).with_range(-1e308, 1e308)
        ]);
        let err = validate_schema(&wide).unwrap_err();
        assert!(err.to_string().contains("field 'x': min and max must be finite"));

        let negative_only = schema_with(vec![
            FieldSpec::new("x", DataType::Float).with_range(-1e308, 0.0)
        ]);
        assert!(validate_schema(&negative_only).is_ok());
    }

    #[test]
    fn test_count_rules() {
        assert!(validate_count(0, MAX_RECORD_COUNT).is_err());
        assert!(validate_count(10_001, MAX_RECORD_COUNT).is_err());
        assert!(validate_count(1, MAX_RECORD_COUNT).is_ok());

        assert_eq!(sanitize_count(-5, MAX_RECORD_COUNT), 1);
        assert_eq!(sanitize_count(50_000, MAX_RECORD_COUNT), 10_000);
        assert_eq!(sanitize_count(42, MAX_RECORD_COUNT), 42);
    }

    #[test]
    fn test_structure_report() {
        let mut fields = vec![
            FieldSpec::new("a", DataType::String).with_length(0, 5000),
            FieldSpec::new("a", DataType::Int),
            FieldSpec::new("list", DataType::Array),
        ];
        for i in 0..50 {
            fields.push(FieldSpec::new(format!("f{i}"), DataType::Bool));
        }

        let report = validate_structure(&schema_with(fields));
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].contains("Duplicate field name 'a'"));
        assert_eq!(report.warnings.len(), 2);
    }
}
