//! Schema inference over JSON Lines samples and generated records.

use mockdata_service::MockdataService;
use panel_core::TypeTag;
use schema_inference::analyze;
use std::collections::BTreeSet;
use std::io::Write;
use universal_panel::input::{read_documents, read_documents_from_file};

#[test]
fn test_mixed_type_example() {
    let documents = read_documents("{\"a\": 1}\n{\"a\": \"x\"}\n{\"a\": 1}\n".as_bytes()).unwrap();
    let summary = analyze(&documents, false);

    let a = &summary["a"];
    assert_eq!(a.dominant, TypeTag::Number);
    assert_eq!(a.count_of(&TypeTag::Number), 2);
    assert_eq!(a.count_of(&TypeTag::String), 1);
    assert_eq!(a.occurrences, 2);
    assert!((a.frequency - 0.667).abs() < 0.001);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["a"]["all_types"], serde_json::json!({"number": 2, "string": 1}));
}

#[test]
fn test_empty_sample() {
    assert!(analyze(&[], true).is_empty());
}

#[test]
fn test_generated_records_round_through_inference() {
    let generated = MockdataService::new()
        .with_seed(42)
        .generate_preset("company", 50)
        .unwrap();

    let summary = analyze(&generated.data, true);

    let mut expected = BTreeSet::new();
    for record in &generated.data {
        for (key, value) in record {
            expected.insert(key.clone());
            if let Some(nested) = value.as_object() {
                for child in nested.keys() {
                    expected.insert(format!("{key}.{child}"));
                }
            }
        }
    }
    let paths: BTreeSet<String> = summary.keys().cloned().collect();
    assert_eq!(paths, expected);

    for (path, field) in &summary {
        assert!(
            (0.0..=1.0).contains(&field.frequency),
            "{path} has frequency {}",
            field.frequency
        );
        assert_eq!(field.total_docs, 50);
        assert!(field.stats.is_some());
    }
}

#[test]
fn test_nested_paths_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"user": {{"name": "Ada", "tags": ["x"]}}}}"#).unwrap();
    writeln!(file, r#"{{"user": {{"name": "Bob"}}, "score": 2.5}}"#).unwrap();

    let documents = read_documents_from_file(file.path()).unwrap();
    let summary = analyze(&documents, false);

    let paths: Vec<&str> = summary.keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["score", "user", "user.name", "user.tags"]);
    assert_eq!(summary["score"].frequency, 0.5);
    assert_eq!(summary["user.tags"].dominant, TypeTag::Array);
}
