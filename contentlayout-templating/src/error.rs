//! Error types for template processing

use thiserror::Error;

/// Result type for templating operations
pub type Result<T> = std::result::Result<T, TemplatingError>;

/// Errors that can occur when parsing or rendering a template
#[derive(Debug, Error)]
pub enum TemplatingError {
    /// Template parsing failed
    #[error("template parse error: {0}")]
    Parse(String),

    /// Template rendering failed
    #[error("template render error: {0}")]
    Render(String),
}
