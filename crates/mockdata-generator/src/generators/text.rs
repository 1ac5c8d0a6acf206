//! String value generators.

use super::faker;
use crate::generator::GeneratorError;
use panel_core::validation::MAX_STRING_LENGTH;
use panel_core::FieldSpec;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Words in the filler sentence used for unrecognised pattern tags.
const PATTERN_FALLBACK_WORDS: usize = 3;

/// Generate a string for `field`.
///
/// Enumerated options win, then named pattern generators. Otherwise a lorem
/// sentence is fitted to the field's length bounds.
pub fn generate_string<R: Rng>(rng: &mut R, field: &FieldSpec) -> String {
    if let Some(option) = field.options.choose(rng) {
        return option.clone();
    }

    let text = match field.pattern.as_deref() {
        Some(pattern) if !pattern.is_empty() => match named_pattern(rng, pattern) {
            Some(value) => return value,
            None => faker::sentence(rng, PATTERN_FALLBACK_WORDS),
        },
        _ => {
            let words = rng.random_range(1..=5);
            faker::sentence(rng, words)
        }
    };

    fit_length(rng, &text, field.min_length, field.max_length)
}

/// Reject length bounds above [`MAX_STRING_LENGTH`], which padding could
/// never reach in bounded time.
pub fn check_length_bounds(field: &FieldSpec) -> Result<(), GeneratorError> {
    let longest = field.min_length.max(field.max_length);
    if longest > MAX_STRING_LENGTH {
        return Err(GeneratorError::Unsatisfiable {
            field: field.name.clone(),
            reason: format!("length {longest} exceeds {MAX_STRING_LENGTH}"),
        });
    }
    Ok(())
}

/// Dispatch a pattern tag to its generator, `None` for unknown tags.
pub fn named_pattern<R: Rng>(rng: &mut R, pattern: &str) -> Option<String> {
    let value = match pattern {
        "firstname" => faker::first_name(rng),
        "lastname" => faker::last_name(rng),
        "company" => faker::company(rng),
        "job_title" => faker::job_title(rng),
        "color" => faker::color(rng),
        "animal" => faker::animal(rng),
        _ => return None,
    };
    Some(value)
}

fn truncate_chars(text: &mut String, max: usize) {
    if let Some((byte_idx, _)) = text.char_indices().nth(max) {
        text.truncate(byte_idx);
    }
}

/// Fit `text` into `[min, max]` characters (bounds of zero are unset).
///
/// Truncates to `max`, pads with words until `min` is reached, then truncates
/// again. A space left dangling by the cut is replaced with a letter so the
/// result never ends in whitespace and keeps its length.
pub fn fit_length<R: Rng>(rng: &mut R, text: &str, min: usize, max: usize) -> String {
    let mut result = text.trim().to_string();

    if max > 0 {
        truncate_chars(&mut result, max);
    }

    while result.chars().count() < min {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(&faker::word(rng));
    }

    if max > 0 {
        truncate_chars(&mut result, max);
    }

    while result.ends_with(char::is_whitespace) {
        result.pop();
        result.push(rng.random_range(b'a'..=b'z') as char);
    }

    result
}
