//! Error types for the document gateway.

use panel_core::ServiceError;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a [`DocumentStore`](crate::store::DocumentStore).
#[derive(Error, Debug)]
pub enum StoreError {
    /// MongoDB connection or query error.
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    /// The operation exceeded its deadline.
    #[error("{operation} timed out after {}s", .after.as_secs())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::backend(err.to_string())
    }
}
