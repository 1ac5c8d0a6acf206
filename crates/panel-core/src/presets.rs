//! Process-wide catalog of named example schemas.

use crate::schema::{DataType, FieldSpec, Schema};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

static PRESETS: Lazy<BTreeMap<&'static str, Schema>> = Lazy::new(|| {
    BTreeMap::from([
        ("user", user()),
        ("product", product()),
        ("blog_post", blog_post()),
        ("order", order()),
        ("company", company()),
    ])
});

/// Look up a preset by catalog key (`user`, `blog_post`, ...).
pub fn get(name: &str) -> Option<&'static Schema> {
    PRESETS.get(name)
}

/// All presets keyed by catalog name, in key order.
pub fn all() -> &'static BTreeMap<&'static str, Schema> {
    &PRESETS
}

/// Catalog keys in key order.
pub fn names() -> Vec<&'static str> {
    PRESETS.keys().copied().collect()
}

fn id() -> FieldSpec {
    FieldSpec::new("id", DataType::Uuid).required()
}

fn created_at() -> FieldSpec {
    FieldSpec::new("created_at", DataType::Date).required()
}

fn user() -> Schema {
    Schema::new("User", "Basic user profile").with_fields(vec![
        id(),
        FieldSpec::new("first_name", DataType::Name)
            .required()
            .with_pattern("firstname"),
        FieldSpec::new("last_name", DataType::Name)
            .required()
            .with_pattern("lastname"),
        FieldSpec::new("email", DataType::Email).required(),
        FieldSpec::new("phone", DataType::Phone),
        FieldSpec::new("age", DataType::Int).with_range(18.0, 99.0),
        FieldSpec::new("is_active", DataType::Bool).required(),
        created_at(),
    ])
}

fn product() -> Schema {
    Schema::new("Product", "E-commerce product").with_fields(vec![
        id(),
        FieldSpec::new("name", DataType::String)
            .required()
            .with_length(5, 100),
        FieldSpec::new("description", DataType::String)
            .required()
            .with_length(20, 500),
        FieldSpec::new("price", DataType::Float)
            .required()
            .with_range(1.0, 10000.0),
        FieldSpec::new("category", DataType::String)
            .required()
            .with_options(&["Electronics", "Clothing", "Books", "Home", "Sports"]),
        FieldSpec::new("in_stock", DataType::Bool).required(),
        FieldSpec::new("tags", DataType::Array).array_of(DataType::String, 3),
        created_at(),
    ])
}

fn blog_post() -> Schema {
    Schema::new("Blog Post", "Blog article").with_fields(vec![
        id(),
        FieldSpec::new("title", DataType::String)
            .required()
            .with_length(10, 200),
        FieldSpec::new("content", DataType::String)
            .required()
            .with_length(100, 5000),
        FieldSpec::new("author", DataType::Name).required(),
        FieldSpec::new("category", DataType::String)
            .required()
            .with_options(&[
                "Technology",
                "Lifestyle",
                "Business",
                "Science",
                "Entertainment",
            ]),
        FieldSpec::new("published", DataType::Bool).required(),
        FieldSpec::new("views", DataType::Int).with_range(0.0, 1_000_000.0),
        FieldSpec::new("tags", DataType::Array).array_of(DataType::String, 5),
        FieldSpec::new("published_at", DataType::Date).required(),
    ])
}

fn order() -> Schema {
    Schema::new("Order", "E-commerce order").with_fields(vec![
        id(),
        FieldSpec::new("customer_id", DataType::Uuid).required(),
        FieldSpec::new("total_amount", DataType::Float)
            .required()
            .with_range(10.0, 5000.0),
        FieldSpec::new("status", DataType::String)
            .required()
            .with_options(&["pending", "processing", "shipped", "delivered", "cancelled"]),
        FieldSpec::new("items", DataType::Array).array_of(DataType::Json, 3),
        FieldSpec::new("shipping_address", DataType::Address).required(),
        created_at(),
    ])
}

fn company() -> Schema {
    Schema::new("Company", "Company information").with_fields(vec![
        id(),
        FieldSpec::new("name", DataType::String)
            .required()
            .with_pattern("company"),
        FieldSpec::new("industry", DataType::String)
            .required()
            .with_options(&[
                "Technology",
                "Healthcare",
                "Finance",
                "Retail",
                "Manufacturing",
            ]),
        FieldSpec::new("employees", DataType::Int)
            .required()
            .with_range(1.0, 50000.0),
        FieldSpec::new("website", DataType::Url),
        FieldSpec::new("founded_year", DataType::Int)
            .required()
            .with_range(1800.0, 2024.0),
        FieldSpec::new("headquarters", DataType::Address).required(),
        FieldSpec::new("active", DataType::Bool).required(),
    ])
}
