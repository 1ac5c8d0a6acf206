//! Numeric value generators.

use panel_core::DocValue;
use rand::Rng;

/// Upper bound used when a field leaves `max` unset.
const DEFAULT_MAX: f64 = 1000.0;

/// Resolve declared bounds: an unset max becomes 1000, a min at or above max
/// resets to 0.
fn effective_bounds(min: f64, max: f64) -> (f64, f64) {
    let max = if max == 0.0 { DEFAULT_MAX } else { max };
    let min = if min >= max { 0.0 } else { min };
    // A negative max with the min reset to 0 leaves the range inverted
    if min > max {
        (max, min)
    } else {
        (min, max)
    }
}

/// Generate a random integer within the field bounds (inclusive).
pub fn generate_int<R: Rng>(rng: &mut R, min: f64, max: f64) -> DocValue {
    let (min, max) = effective_bounds(min.trunc(), max.trunc());
    DocValue::Int64(rng.random_range(min as i64..=max as i64))
}

/// Generate a random float within the field bounds (inclusive).
///
/// `None` when the bounds are not finite or their span overflows `f64`.
pub fn generate_float<R: Rng>(rng: &mut R, min: f64, max: f64) -> Option<DocValue> {
    let (min, max) = effective_bounds(min, max);
    if !(max - min).is_finite() {
        return None;
    }
    Some(DocValue::Double(rng.random_range(min..=max)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_int_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let value = generate_int(&mut rng, 18.0, 99.0);
            let v = value.as_i64().expect("Expected integer value");
            assert!((18..=99).contains(&v));
        }
    }

    #[test]
    fn test_unset_max_defaults_to_1000() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let v = generate_int(&mut rng, 0.0, 0.0).as_i64().unwrap();
            assert!((0..=1000).contains(&v));
            let f = generate_float(&mut rng, 0.0, 0.0).unwrap().as_f64().unwrap();
            assert!((0.0..=1000.0).contains(&f));
        }
    }

    #[test]
    fn test_inverted_bounds_reset_min() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let v = generate_int(&mut rng, 10.0, 1.0).as_i64().unwrap();
            assert!((0..=1).contains(&v));
            let f = generate_float(&mut rng, 10.0, 1.0).unwrap().as_f64().unwrap();
            assert!((0.0..=1.0).contains(&f));
        }
    }

    #[test]
    fn test_negative_max_never_panics() {
        let mut rng = StdRng::seed_from_u64(1);
        let v = generate_int(&mut rng, 0.0, -5.0).as_i64().unwrap();
        assert!((-5..=0).contains(&v));
    }

    #[test]
    fn test_float_span_overflow() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_float(&mut rng, -1e308, 1e308).is_none());
        assert!(generate_float(&mut rng, f64::NEG_INFINITY, 1.0).is_none());

        let v = generate_float(&mut rng, -1e308, 0.0).unwrap().as_f64().unwrap();
        assert!((-1e308..=1000.0).contains(&v));
    }
}
