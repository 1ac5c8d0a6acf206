//! Timestamp value generators.

use chrono::{DateTime, Months, Utc};
use panel_core::DocValue;
use rand::Rng;

/// Half-width of the window dates are drawn from, around the reference time.
const DATE_WINDOW_MONTHS: u32 = 5 * 12;

/// Generate a random timestamp in `[start, end]` at millisecond precision.
pub fn generate_timestamp_range<R: Rng>(
    rng: &mut R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DocValue {
    let start_ms = start.timestamp_millis();
    let end_ms = end.timestamp_millis();

    if start_ms >= end_ms {
        return DocValue::DateTime(start);
    }

    let random_ms = rng.random_range(start_ms..=end_ms);
    DocValue::DateTime(DateTime::from_timestamp_millis(random_ms).unwrap_or(start))
}

/// Generate a random timestamp within five years either side of `reference`.
pub fn generate_date_around<R: Rng>(rng: &mut R, reference: DateTime<Utc>) -> DocValue {
    let window = Months::new(DATE_WINDOW_MONTHS);
    let start = reference.checked_sub_months(window).unwrap_or(reference);
    let end = reference.checked_add_months(window).unwrap_or(reference);
    generate_timestamp_range(rng, start, end)
}
