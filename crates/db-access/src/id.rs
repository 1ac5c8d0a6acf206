//! Document identifier parsing.

use panel_core::DocValue;
use std::fmt;

/// Lookup key for a single document.
///
/// Parsed from an opaque string by trying, in order, a 24-hex object
/// identifier, a plain integer, and finally the raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentId {
    ObjectId(String),
    Int(i64),
    Text(String),
}

impl DocumentId {
    pub fn parse(raw: &str) -> Self {
        if bson::oid::ObjectId::parse_str(raw).is_ok() {
            return DocumentId::ObjectId(raw.to_ascii_lowercase());
        }
        if let Ok(n) = raw.parse::<i64>() {
            return DocumentId::Int(n);
        }
        DocumentId::Text(raw.to_string())
    }

    /// Value compared against `_id`.
    pub fn to_doc_value(&self) -> DocValue {
        match self {
            DocumentId::ObjectId(hex) => DocValue::ObjectId(hex.clone()),
            DocumentId::Int(n) => DocValue::Int64(*n),
            DocumentId::Text(s) => DocValue::String(s.clone()),
        }
    }

    /// Whether a stored `_id` value matches this key.
    pub fn matches(&self, value: &DocValue) -> bool {
        self.to_doc_value().loosely_equals(value)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::ObjectId(hex) => f.write_str(hex),
            DocumentId::Int(n) => write!(f, "{n}"),
            DocumentId::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order() {
        assert_eq!(
            DocumentId::parse("65a1b2c3d4e5f60718293a4b"),
            DocumentId::ObjectId("65a1b2c3d4e5f60718293a4b".into())
        );
        assert_eq!(DocumentId::parse("42"), DocumentId::Int(42));
        assert_eq!(DocumentId::parse("-7"), DocumentId::Int(-7));
        assert_eq!(DocumentId::parse("abc"), DocumentId::Text("abc".into()));
        // 24 digits is valid hex, so it is an object id rather than an integer
        assert!(matches!(
            DocumentId::parse("123456789012345678901234"),
            DocumentId::ObjectId(_)
        ));
        // 23 hex chars is not
        assert_eq!(
            DocumentId::parse("65a1b2c3d4e5f60718293a4"),
            DocumentId::Text("65a1b2c3d4e5f60718293a4".into())
        );
    }

    #[test]
    fn test_int_matches_any_width() {
        let id = DocumentId::parse("5");
        assert!(id.matches(&DocValue::Int32(5)));
        assert!(id.matches(&DocValue::Int64(5)));
        assert!(!id.matches(&DocValue::string("5")));
    }
}
