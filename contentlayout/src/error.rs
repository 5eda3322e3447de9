//! Error types for the enrichment and rendering pipeline

use contentlayout_client::ClientError;
use contentlayout_fields::FieldsError;
use contentlayout_templating::TemplatingError;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors that can occur while enriching or rendering a content item.
///
/// Permission denial is deliberately absent: it is annotated in-band on the
/// affected entry (`referenceInaccessible`) so templates can render a
/// fallback message.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A declared field's value does not match its expected shape
    #[error(transparent)]
    Fields(#[from] FieldsError),

    /// The batched reference fetch failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A date-time field carries an unparseable timestamp
    #[error("invalid date in field '{field}': {source}")]
    InvalidDate {
        field: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Template expansion failed; no partial HTML is emitted
    #[error("template expansion failed for '{template}': {source}")]
    TemplateExpansion {
        template: String,
        #[source]
        source: TemplatingError,
    },

    /// Template engine construction or other templating failure outside
    /// expansion of a named template
    #[error(transparent)]
    Templating(#[from] TemplatingError),
}
