//! Database and collection name rules, checked before any store call.

use panel_core::{ServiceError, ServiceResult};

const MAX_DB_NAME_LEN: usize = 64;
const MAX_COLLECTION_NAME_LEN: usize = 120;
const SYSTEM_PREFIX: &str = "system.";

/// 1 to 64 characters of `[A-Za-z0-9_-]`.
pub fn is_valid_db_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_DB_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// 1 to 120 bytes, not in the `system.` namespace.
pub fn is_valid_collection_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= MAX_COLLECTION_NAME_LEN && !name.starts_with(SYSTEM_PREFIX)
}

pub fn check_db_name(name: &str) -> ServiceResult<()> {
    if is_valid_db_name(name) {
        Ok(())
    } else {
        Err(ServiceError::validation(format!(
            "invalid database name: {name}"
        )))
    }
}

pub fn check_collection_name(name: &str) -> ServiceResult<()> {
    if is_valid_collection_name(name) {
        Ok(())
    } else {
        Err(ServiceError::validation(format!(
            "invalid collection name: {name}"
        )))
    }
}

/// Check both names, database first.
pub fn check_names(db: &str, collection: &str) -> ServiceResult<()> {
    check_db_name(db)?;
    check_collection_name(collection)
}
