//! Error taxonomy shared by both services.

/// Failure classes surfaced to callers.
///
/// Every service operation reports one of these; the HTTP layer maps each
/// class to a status code via [`ServiceError::status_code`]. Store timeouts
/// are reported as [`ServiceError::Backend`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    /// Malformed or incomplete input (schema, document payload, names)
    #[error("{0}")]
    Validation(String),

    /// Named resource is absent (database, collection, document, preset)
    #[error("{0}")]
    NotFound(String),

    /// Store or generator backend failure, including deadline expiry
    #[error("{0}")]
    Backend(String),

    /// Field constraints could not be satisfied during generation
    #[error("{0}")]
    Generation(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// HTTP status code for this failure class.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Backend(_) | ServiceError::Generation(_) => 500,
        }
    }

    /// Short label for the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation error",
            ServiceError::NotFound(_) => "not found",
            ServiceError::Backend(_) => "backend error",
            ServiceError::Generation(_) => "generation error",
        }
    }
}

/// Result alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error type for loading schema definition files.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML (JSON documents parse as YAML too)
    #[error("Failed to parse schema: {0}")]
    YamlError(#[from] serde_yaml::Error),
}
