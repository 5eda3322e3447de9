//! Error types for content-fetch operations

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the content delivery API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The batched item lookup failed
    #[error("content item fetch failed: {message}")]
    Fetch { message: String },

    /// A requested item does not exist
    #[error("content item not found: {id}")]
    ItemNotFound { id: String },
}
