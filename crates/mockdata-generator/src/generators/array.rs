//! Array and nested object generators.

use super::generate_field_value;
use crate::generator::GeneratorError;
use chrono::{DateTime, Utc};
use panel_core::validation::MAX_ARRAY_LENGTH;
use panel_core::{DocValue, Document, FieldSpec};
use rand::Rng;

/// Generate an array for an `array` field.
///
/// Uses the configured length, or 1 to 5 elements when unset. Elements are
/// generated from a synthetic required field carrying the array's own
/// constraints, so they are never null. Lengths above [`MAX_ARRAY_LENGTH`]
/// are rejected before any element is generated.
pub fn generate_array<R: Rng>(
    rng: &mut R,
    field: &FieldSpec,
    reference: DateTime<Utc>,
) -> Result<DocValue, GeneratorError> {
    let element_type = field
        .array_type
        .clone()
        .ok_or_else(|| GeneratorError::MissingArrayType(field.name.clone()))?;

    if field.array_length > MAX_ARRAY_LENGTH {
        return Err(GeneratorError::Unsatisfiable {
            field: field.name.clone(),
            reason: format!(
                "array_length {} exceeds {MAX_ARRAY_LENGTH}",
                field.array_length
            ),
        });
    }

    let length = if field.array_length > 0 {
        field.array_length as usize
    } else {
        rng.random_range(1..=5)
    };

    let element = FieldSpec {
        name: format!("{}_element", field.name),
        field_type: Some(element_type),
        required: true,
        min_length: field.min_length,
        max_length: field.max_length,
        min: field.min,
        max: field.max,
        options: field.options.clone(),
        pattern: field.pattern.clone(),
        array_type: None,
        array_length: 0,
        nested: field.nested.clone(),
    };

    let mut items = Vec::new();
    for _ in 0..length {
        let value = generate_field_value(rng, &element, reference).map_err(|e| {
            GeneratorError::Element {
                field: field.name.clone(),
                source: Box::new(e),
            }
        })?;
        items.push(value);
    }

    Ok(DocValue::Array(items))
}

/// Generate an object with one entry per nested field.
pub fn generate_object<R: Rng>(
    rng: &mut R,
    fields: &[FieldSpec],
    reference: DateTime<Utc>,
) -> Result<DocValue, GeneratorError> {
    let mut doc = Document::new();
    for nested in fields {
        let value = generate_field_value(rng, nested, reference)?;
        doc.insert(nested.name.clone(), value);
    }
    Ok(DocValue::Object(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::{DataType, TypeTag};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fixed_length_array() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = FieldSpec::new("tags", DataType::Array)
            .array_of(DataType::String, 3)
            .with_length(3, 10);

        let value = generate_array(&mut rng, &field, Utc::now()).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 3);
        for item in items {
            let len = item.as_str().unwrap().chars().count();
            assert!((3..=10).contains(&len));
        }
    }

    #[test]
    fn test_default_length_between_one_and_five() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = FieldSpec::new("scores", DataType::Array)
            .array_of(DataType::Int, 0)
            .with_range(1.0, 3.0);

        for _ in 0..100 {
            let value = generate_array(&mut rng, &field, Utc::now()).unwrap();
            let items = value.as_array().unwrap();
            assert!((1..=5).contains(&items.len()));
            assert!(items.iter().all(|v| (1..=3).contains(&v.as_i64().unwrap())));
        }
    }

    #[test]
    fn test_missing_element_type_fails() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = FieldSpec::new("tags", DataType::Array);

        let err = generate_array(&mut rng, &field, Utc::now()).unwrap_err();
        assert!(matches!(err, GeneratorError::MissingArrayType(ref name) if name == "tags"));
    }

    #[test]
    fn test_length_cap() {
        let mut rng = StdRng::seed_from_u64(42);
        let at_cap =
            FieldSpec::new("flags", DataType::Array).array_of(DataType::Bool, MAX_ARRAY_LENGTH);
        let value = generate_array(&mut rng, &at_cap, Utc::now()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1000);

        let over = FieldSpec::new("flags", DataType::Array).array_of(DataType::Bool, i64::MAX);
        let err = generate_array(&mut rng, &over, Utc::now()).unwrap_err();
        assert!(matches!(err, GeneratorError::Unsatisfiable { .. }));
    }

    #[test]
    fn test_nested_failure_propagates() {
        let mut rng = StdRng::seed_from_u64(42);
        let outer = FieldSpec::new("matrix", DataType::Array)
            .array_of(DataType::Array, 2);

        let err = generate_array(&mut rng, &outer, Utc::now()).unwrap_err();
        assert!(matches!(err, GeneratorError::Element { .. }));
        assert!(err.to_string().contains("matrix"));
    }

    #[test]
    fn test_array_of_objects_uses_nested_fields() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = FieldSpec::new("items", DataType::Array)
            .array_of(DataType::Json, 2)
            .with_nested(vec![FieldSpec::new("sku", DataType::Uuid).required()]);

        let value = generate_array(&mut rng, &field, Utc::now()).unwrap();
        for item in value.as_array().unwrap() {
            assert_eq!(item.type_tag(), TypeTag::Object);
            assert!(item.as_object().unwrap().contains_key("sku"));
        }
    }

    #[test]
    fn test_object_generation() {
        let mut rng = StdRng::seed_from_u64(42);
        let fields = vec![
            FieldSpec::new("active", DataType::Bool).required(),
            FieldSpec::new("home", DataType::Address).required(),
        ];

        let value = generate_object(&mut rng, &fields, Utc::now()).unwrap();
        let doc = value.as_object().unwrap();
        assert!(doc["active"].as_bool().is_some());
        assert_eq!(doc["home"].type_tag(), TypeTag::Object);
    }
}
