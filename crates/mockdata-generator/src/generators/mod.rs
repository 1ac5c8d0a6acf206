//! Individual value generators for the field types.
//!
//! [`generate_field_value`] dispatches on the field's type tag; array and
//! json fields recurse through it for their elements and children.

pub mod array;
pub mod faker;
pub mod numeric;
pub mod text;
pub mod timestamp;
pub mod uuid;

use crate::generator::GeneratorError;
use chrono::{DateTime, Utc};
use panel_core::{DataType, DocValue, FieldSpec};
use rand::Rng;

/// Probability that an optional field is generated as null.
pub const OPTIONAL_NULL_PROBABILITY: f64 = 0.10;

/// Generate one value for `field`.
///
/// Dates are drawn around `reference`. Fails when an array field has no
/// element type, when a length or numeric bound cannot be honoured, or when
/// an element or nested child fails.
pub fn generate_field_value<R: Rng>(
    rng: &mut R,
    field: &FieldSpec,
    reference: DateTime<Utc>,
) -> Result<DocValue, GeneratorError> {
    if !field.required && rng.random_bool(OPTIONAL_NULL_PROBABILITY) {
        return Ok(DocValue::Null);
    }

    let value = match field.field_type.as_ref() {
        Some(DataType::Int) => numeric::generate_int(rng, field.min, field.max),
        Some(DataType::Float) => numeric::generate_float(rng, field.min, field.max)
            .ok_or_else(|| GeneratorError::Unsatisfiable {
                field: field.name.clone(),
                reason: format!("cannot draw a float between {} and {}", field.min, field.max),
            })?,
        Some(DataType::Bool) => DocValue::Bool(rng.random_bool(0.5)),
        Some(DataType::Date) => timestamp::generate_date_around(rng, reference),
        Some(DataType::Email) => DocValue::String(faker::email(rng)),
        Some(DataType::Name) => DocValue::String(generate_name(rng, field)),
        Some(DataType::Address) => faker::address(rng),
        Some(DataType::Phone) => DocValue::String(faker::phone(rng)),
        Some(DataType::Uuid) => uuid::generate_uuid_v4(rng),
        Some(DataType::Url) => DocValue::String(faker::url(rng)),
        Some(DataType::Array) => array::generate_array(rng, field, reference)?,
        Some(DataType::Json) => array::generate_object(rng, &field.nested, reference)?,
        Some(DataType::String) | Some(DataType::Unknown(_)) | None => {
            text::check_length_bounds(field)?;
            DocValue::String(text::generate_string(rng, field))
        }
    };

    Ok(value)
}

/// Full name, or a first/last name when the field asks for one.
fn generate_name<R: Rng>(rng: &mut R, field: &FieldSpec) -> String {
    match field.pattern.as_deref() {
        Some("firstname") => faker::first_name(rng),
        Some("lastname") => faker::last_name(rng),
        _ => faker::full_name(rng),
    }
}
