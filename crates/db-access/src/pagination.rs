//! Limit/skip normalisation for paginated reads.

/// Default page size for document listing.
pub const DEFAULT_LIMIT: i64 = 50;
/// Largest page size for document listing.
pub const MAX_LIMIT: i64 = 1000;
/// Default size of a sample fetch.
pub const DEFAULT_SAMPLE_LIMIT: i64 = 10;
/// Largest sample fetch.
pub const MAX_SAMPLE_LIMIT: i64 = 100;

/// Keep `limit` when it lies in `[1, max]`, otherwise fall back to `default`.
pub fn normalize_limit(limit: i64, default: i64, max: i64) -> i64 {
    if (1..=max).contains(&limit) {
        limit
    } else {
        default
    }
}

/// Parse a raw query value; missing or unparsable input yields `default`.
pub fn parse_limit(raw: Option<&str>, default: i64, max: i64) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map_or(default, |limit| normalize_limit(limit, default, max))
}

/// Parse a raw skip value; negative, missing or unparsable input yields 0.
pub fn parse_skip(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map_or(0, |skip| skip.max(0) as u64)
}

/// Whether documents remain past the returned page.
pub fn has_more(skip: u64, count: usize, total: u64) -> bool {
    skip.saturating_add(count as u64) < total
}

/// A normalised page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub skip: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            skip: 0,
        }
    }
}

impl Page {
    pub fn new(limit: i64, skip: i64) -> Self {
        Self {
            limit: normalize_limit(limit, DEFAULT_LIMIT, MAX_LIMIT),
            skip: skip.max(0) as u64,
        }
    }

    /// Build a page from raw query-string values.
    pub fn from_query(limit: Option<&str>, skip: Option<&str>) -> Self {
        Self {
            limit: parse_limit(limit, DEFAULT_LIMIT, MAX_LIMIT),
            skip: parse_skip(skip),
        }
    }
}
