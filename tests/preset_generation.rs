//! End-to-end generation from the preset catalog.

use mockdata_service::MockdataService;
use panel_core::DocValue;

const USER_KEYS: [&str; 8] = [
    "age",
    "created_at",
    "email",
    "first_name",
    "id",
    "is_active",
    "last_name",
    "phone",
];

#[test]
fn test_user_preset_hundred_records() {
    let service = MockdataService::new().with_seed(42);
    let generated = service.generate_preset("user", 100).unwrap();

    assert_eq!(generated.count, 100);
    assert_eq!(generated.data.len(), 100);

    for record in &generated.data {
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, USER_KEYS);

        assert!(matches!(record["is_active"], DocValue::Bool(_)));
        assert!(matches!(record["id"], DocValue::String(_)));
        assert!(!record["email"].is_null());

        if !record["age"].is_null() {
            let age = record["age"].as_f64().unwrap();
            assert!((18.0..=99.0).contains(&age), "age {age} out of range");
        }
    }
}

#[test]
fn test_optional_null_rate_within_binomial_tolerance() {
    let service = MockdataService::new().with_seed(7);
    let generated = service.generate_preset("user", 5000).unwrap();

    let null_phones = generated
        .data
        .iter()
        .filter(|record| record["phone"].is_null())
        .count();
    // mean 500, standard deviation ~21
    assert!(
        (400..=600).contains(&null_phones),
        "{null_phones} null phones out of 5000"
    );
}

#[test]
fn test_seeded_generation_is_repeatable() {
    let first = MockdataService::new()
        .with_seed(42)
        .generate_preset("product", 5)
        .unwrap();
    let second = MockdataService::new()
        .with_seed(42)
        .generate_preset("product", 5)
        .unwrap();

    let first_names: Vec<_> = first.data.iter().map(|r| r["name"].clone()).collect();
    let second_names: Vec<_> = second.data.iter().map(|r| r["name"].clone()).collect();
    assert_eq!(first_names, second_names);
}

#[test]
fn test_every_preset_generates() {
    let service = MockdataService::new().with_seed(1);
    for name in panel_core::presets::names() {
        let generated = service.generate_preset(name, 3).unwrap();
        assert_eq!(generated.count, 3, "preset {name}");
        assert_eq!(generated.schema, name);
    }
}
