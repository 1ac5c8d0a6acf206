//! Checks and clean-up applied to document payloads before writing.

use panel_core::{Document, ServiceError, ServiceResult};

/// Reject empty payloads.
pub fn validate_document_data(data: &Document) -> ServiceResult<()> {
    if data.is_empty() {
        return Err(ServiceError::validation("invalid document data"));
    }
    Ok(())
}

/// Drop entries with an empty key or a null value. Nested values are kept
/// as they are.
pub fn sanitize_document(data: Document) -> Document {
    data.into_iter()
        .filter(|(key, value)| !key.is_empty() && !value.is_null())
        .collect()
}
