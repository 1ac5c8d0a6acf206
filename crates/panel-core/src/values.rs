//! Document value tree and the value classifier.
//!
//! Documents read from the store, request payloads and generated records all
//! share the same representation: a [`DocValue`] tree. The classifier maps any
//! value to exactly one [`TypeTag`], which is what schema inference counts and
//! what the field statistics collector dispatches on.

use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// A document: string keys mapped to values, ordered by key.
pub type Document = BTreeMap<String, DocValue>;

/// Dynamically-typed document value.
///
/// Numeric widths are kept so values round-trip through the store without
/// changing representation; the classifier collapses them to `number`.
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    /// Explicit null
    Null,

    /// Boolean value
    Bool(bool),

    /// 32-bit signed integer
    Int32(i32),

    /// 64-bit signed integer
    Int64(i64),

    /// 64-bit floating point
    Double(f64),

    /// UTF-8 string
    String(String),

    /// Date/time with timezone
    DateTime(DateTime<Utc>),

    /// Ordered list of values
    Array(Vec<DocValue>),

    /// Nested document
    Object(Document),

    /// Store-assigned object identifier, kept as 24 lowercase hex characters
    ObjectId(String),

    /// Opaque binary payload
    Binary(Vec<u8>),

    /// Any store-native value without a dedicated variant (decimal128,
    /// timestamps, regular expressions, ...)
    Other {
        /// Native type name reported by the classifier
        type_name: String,
        /// Human readable rendering of the value
        display: String,
    },
}

impl DocValue {
    /// Create a string value.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Create an object value from key/value pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, DocValue)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64. Doubles are not truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int32(i) => Some(i64::from(*i)),
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of any number variant.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int32(i) => Some(f64::from(*i)),
            Self::Int64(i) => Some(*i as f64),
            Self::Double(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a nested document.
    pub fn as_object(&self) -> Option<&Document> {
        match self {
            Self::Object(doc) => Some(doc),
            _ => None,
        }
    }

    /// Try to get this value as an array.
    pub fn as_array(&self) -> Option<&[DocValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Classify this value. See [`classify`].
    pub fn type_tag(&self) -> TypeTag {
        classify(self)
    }

    /// Equality used for identifier lookups: numbers compare by value across
    /// widths, everything else structurally.
    pub fn loosely_equals(&self, other: &DocValue) -> bool {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }
}

impl From<&str> for DocValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for DocValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for DocValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for DocValue {
    fn from(i: i32) -> Self {
        Self::Int32(i)
    }
}

impl From<i64> for DocValue {
    fn from(i: i64) -> Self {
        Self::Int64(i)
    }
}

impl From<f64> for DocValue {
    fn from(f: f64) -> Self {
        Self::Double(f)
    }
}

impl From<DateTime<Utc>> for DocValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<Document> for DocValue {
    fn from(doc: Document) -> Self {
        Self::Object(doc)
    }
}

impl From<Vec<DocValue>> for DocValue {
    fn from(items: Vec<DocValue>) -> Self {
        Self::Array(items)
    }
}

/// Semantic type tag assigned by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    Null,
    String,
    Number,
    Boolean,
    Date,
    Array,
    Object,
    Identifier,
    Binary,
    /// Diagnostic tag carrying the native type name
    Other(String),
}

impl TypeTag {
    /// Wire name of the tag.
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            TypeTag::Null => Cow::Borrowed("null"),
            TypeTag::String => Cow::Borrowed("string"),
            TypeTag::Number => Cow::Borrowed("number"),
            TypeTag::Boolean => Cow::Borrowed("boolean"),
            TypeTag::Date => Cow::Borrowed("date"),
            TypeTag::Array => Cow::Borrowed("array"),
            TypeTag::Object => Cow::Borrowed("object"),
            TypeTag::Identifier => Cow::Borrowed("ObjectID"),
            TypeTag::Binary => Cow::Borrowed("binary"),
            TypeTag::Other(native) => Cow::Owned(format!("other:{native}")),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

/// Map a value to its semantic type tag.
///
/// Total and pure: every value maps to exactly one tag. Integer and float
/// widths collapse to `number`, every list to `array`, every nested document
/// to `object`. Values without a dedicated tag report their native type name.
pub fn classify(value: &DocValue) -> TypeTag {
    match value {
        DocValue::Null => TypeTag::Null,
        DocValue::Bool(_) => TypeTag::Boolean,
        DocValue::Int32(_) | DocValue::Int64(_) | DocValue::Double(_) => TypeTag::Number,
        DocValue::String(_) => TypeTag::String,
        DocValue::DateTime(_) => TypeTag::Date,
        DocValue::Array(_) => TypeTag::Array,
        DocValue::Object(_) => TypeTag::Object,
        DocValue::ObjectId(_) => TypeTag::Identifier,
        DocValue::Binary(_) => TypeTag::Binary,
        DocValue::Other { type_name, .. } => TypeTag::Other(type_name.clone()),
    }
}

impl Serialize for DocValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DocValue::Null => serializer.serialize_unit(),
            DocValue::Bool(b) => serializer.serialize_bool(*b),
            DocValue::Int32(i) => serializer.serialize_i32(*i),
            DocValue::Int64(i) => serializer.serialize_i64(*i),
            DocValue::Double(f) => serializer.serialize_f64(*f),
            DocValue::String(s) => serializer.serialize_str(s),
            DocValue::DateTime(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            DocValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            DocValue::Object(doc) => {
                let mut map = serializer.serialize_map(Some(doc.len()))?;
                for (key, value) in doc {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            DocValue::ObjectId(hex) => serializer.serialize_str(hex),
            DocValue::Binary(bytes) => {
                serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
            }
            DocValue::Other { display, .. } => serializer.serialize_str(display),
        }
    }
}
