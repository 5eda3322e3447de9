//! In-memory content client for tests and local development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use contentlayout_fields::ContentItem;
use tracing::debug;

use crate::error::Result;
use crate::types::ItemResultSet;
use crate::ContentClient;

/// A [`ContentClient`] backed by a fixed item table.
///
/// Rendition URLs are synthesized as `<prefix>/<id>/native`; macro expansion
/// substitutes every configured token. The fetch counter lets tests assert
/// that the empty-ID short circuit never issues a request.
#[derive(Debug, Default)]
pub struct StaticContentClient {
    items: HashMap<String, ContentItem>,
    rendition_prefix: String,
    macros: HashMap<String, String>,
    fetch_calls: AtomicUsize,
}

impl StaticContentClient {
    pub fn new() -> Self {
        Self {
            rendition_prefix: "https://content.example.com/assets".into(),
            ..Self::default()
        }
    }

    pub fn with_item(mut self, item: ContentItem) -> Self {
        self.items.insert(item.id.clone(), item);
        self
    }

    pub fn with_rendition_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.rendition_prefix = prefix.into();
        self
    }

    /// Register a macro token and its replacement.
    pub fn with_macro(mut self, token: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.macros.insert(token.into(), replacement.into());
        self
    }

    /// Number of batched fetches issued so far.
    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentClient for StaticContentClient {
    async fn get_items(&self, ids: &[String]) -> Result<ItemResultSet> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        debug!(requested = ids.len(), "batched item lookup");
        let items = ids
            .iter()
            .filter_map(|id| self.items.get(id).cloned())
            .collect();
        Ok(ItemResultSet { items })
    }

    fn rendition_url(&self, id: &str) -> String {
        format!("{}/{}/native", self.rendition_prefix, id)
    }

    fn expand_macros(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (token, replacement) in &self.macros {
            out = out.replace(token, replacement);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> StaticContentClient {
        StaticContentClient::new()
            .with_item(ContentItem::new("A1"))
            .with_item(ContentItem::new("A2"))
    }

    #[tokio::test]
    async fn get_items_filters_to_known_ids() {
        let client = client();
        let set = client
            .get_items(&["A1".into(), "missing".into()])
            .await
            .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.items[0].id, "A1");
        assert_eq!(client.fetch_count(), 1);
    }

    #[test]
    fn rendition_url_shape() {
        let client = StaticContentClient::new().with_rendition_prefix("https://cdn.test/assets");
        assert_eq!(
            client.rendition_url("D7"),
            "https://cdn.test/assets/D7/native"
        );
    }

    #[test]
    fn macro_expansion_substitutes_tokens() {
        let client = StaticContentClient::new()
            .with_macro("[!--$CDN--]", "https://cdn.test");
        assert_eq!(
            client.expand_macros("see [!--$CDN--]/logo.png"),
            "see https://cdn.test/logo.png"
        );
        assert_eq!(client.expand_macros("no tokens here"), "no tokens here");
    }
}
