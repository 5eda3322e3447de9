//! Error types for the field model

use thiserror::Error;

/// Result type for field operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur when reading or writing typed field views
#[derive(Debug, Error)]
pub enum FieldsError {
    /// A declared field's value does not match the expected entry shape
    #[error("malformed value in field '{field}': {source}")]
    MalformedField {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
