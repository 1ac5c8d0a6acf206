//! Forward conversion: DocValue → BSON value.

use bson::oid::ObjectId;
use bson::spec::BinarySubtype;
use bson::{Binary, Bson, DateTime as BsonDateTime};
use panel_core::{DocValue, Document};

/// Wrapper for BSON values that can be written to MongoDB.
#[derive(Debug, Clone, PartialEq)]
pub struct BsonValue(pub Bson);

impl BsonValue {
    /// Get the inner BSON value.
    pub fn into_inner(self) -> Bson {
        self.0
    }

    /// Get a reference to the inner BSON value.
    pub fn as_inner(&self) -> &Bson {
        &self.0
    }
}

impl From<DocValue> for BsonValue {
    fn from(value: DocValue) -> Self {
        let bson = match value {
            DocValue::Null => Bson::Null,
            DocValue::Bool(b) => Bson::Boolean(b),
            DocValue::Int32(i) => Bson::Int32(i),
            DocValue::Int64(i) => Bson::Int64(i),
            DocValue::Double(f) => Bson::Double(f),
            DocValue::String(s) => Bson::String(s),
            DocValue::DateTime(dt) => Bson::DateTime(BsonDateTime::from_chrono(dt)),
            DocValue::Array(items) => Bson::Array(
                items
                    .into_iter()
                    .map(|item| BsonValue::from(item).into_inner())
                    .collect(),
            ),
            DocValue::Object(doc) => Bson::Document(document_to_bson(doc)),
            // Malformed hex is kept as a plain string rather than dropped
            DocValue::ObjectId(hex) => match ObjectId::parse_str(&hex) {
                Ok(oid) => Bson::ObjectId(oid),
                Err(_) => Bson::String(hex),
            },
            DocValue::Binary(bytes) => Bson::Binary(Binary {
                subtype: BinarySubtype::Generic,
                bytes,
            }),
            DocValue::Other { display, .. } => Bson::String(display),
        };
        BsonValue(bson)
    }
}

/// Convert a complete document to a BSON document, preserving key order.
pub fn document_to_bson(doc: Document) -> bson::Document {
    let mut out = bson::Document::new();
    for (key, value) in doc {
        out.insert(key, BsonValue::from(value).into_inner());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_scalar_conversions() {
        assert!(matches!(BsonValue::from(DocValue::Null).0, Bson::Null));
        assert!(matches!(
            BsonValue::from(DocValue::Bool(true)).0,
            Bson::Boolean(true)
        ));
        assert!(matches!(BsonValue::from(DocValue::Int32(7)).0, Bson::Int32(7)));
        assert!(matches!(
            BsonValue::from(DocValue::Int64(1 << 40)).0,
            Bson::Int64(v) if v == 1 << 40
        ));
    }

    #[test]
    fn test_datetime_conversion() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 0).unwrap();
        let bson_val: BsonValue = DocValue::DateTime(dt).into();
        if let Bson::DateTime(bdt) = bson_val.0 {
            assert_eq!(bdt.to_chrono(), dt);
        } else {
            panic!("Expected DateTime");
        }
    }

    #[test]
    fn test_object_id_conversion() {
        let hex = "65a1b2c3d4e5f60718293a4b";
        let bson_val: BsonValue = DocValue::ObjectId(hex.to_string()).into();
        if let Bson::ObjectId(oid) = bson_val.0 {
            assert_eq!(oid.to_hex(), hex);
        } else {
            panic!("Expected ObjectId");
        }

        let bad: BsonValue = DocValue::ObjectId("nothex".to_string()).into();
        assert_eq!(bad.0, Bson::String("nothex".to_string()));
    }

    #[test]
    fn test_document_conversion() {
        let doc = Document::from([
            ("name".to_string(), DocValue::string("Ada")),
            (
                "scores".to_string(),
                DocValue::Array(vec![DocValue::Int32(1), DocValue::Double(2.5)]),
            ),
        ]);

        let bson_doc = document_to_bson(doc);
        assert_eq!(bson_doc.get_str("name").unwrap(), "Ada");
        assert_eq!(bson_doc.get_array("scores").unwrap().len(), 2);
    }
}
