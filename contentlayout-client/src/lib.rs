//! Content-fetch client seam
//!
//! The enrichment pipeline talks to the hosting platform's content delivery
//! API through the [`ContentClient`] trait: one batched item lookup (the only
//! async boundary), synchronous rendition-URL synthesis, and synchronous
//! macro expansion over rich-text source.
//!
//! [`StaticContentClient`] is the in-memory implementation used by tests and
//! local development.

pub mod error;
mod memory;
pub mod types;

use async_trait::async_trait;

pub use error::{ClientError, Result};
pub use memory::StaticContentClient;
pub use types::ItemResultSet;

/// Batched content lookup and the synchronous helpers the field transforms
/// lean on.
///
/// An empty ID list must never reach [`get_items`](ContentClient::get_items):
/// the platform treats it as "return all items", so callers short-circuit it
/// (see the reference resolver).
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Fetch the given items in a single round trip. Unknown IDs are omitted
    /// from the result, not an error.
    async fn get_items(&self, ids: &[String]) -> Result<ItemResultSet>;

    /// Synthesize the delivery URL for a rendition of the given asset.
    fn rendition_url(&self, id: &str) -> String;

    /// Substitute embedded placeholder tokens in rich-text or markdown
    /// source. Text without tokens passes through unchanged.
    fn expand_macros(&self, text: &str) -> String;
}
