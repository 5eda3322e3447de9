//! Batched reference fetch and the splice pass.
//!
//! The resolver is the pipeline's single async boundary: every reference ID
//! the enricher collected goes out in one request, and the results are
//! spliced back onto the entries that asked for them.

use contentlayout_client::{ContentClient, ItemResultSet};
use contentlayout_fields::{digital_asset_field_names, get_entries, set_entries, ReferenceEntry};
use serde_json::{Map, Value};
use tracing::debug;

use crate::enricher::FieldEnricher;
use crate::error::Result;

/// Fetches referenced content items in one round trip and attaches them to
/// their originating reference entries.
pub struct ReferenceResolver<'a> {
    client: &'a dyn ContentClient,
    enricher: &'a FieldEnricher<'a>,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(client: &'a dyn ContentClient, enricher: &'a FieldEnricher<'a>) -> Self {
        Self { client, enricher }
    }

    /// Fetch all referenced items in one batched request.
    ///
    /// An empty ID list resolves immediately to an empty result set without
    /// touching the client: the underlying fetch treats an empty list as
    /// "return all items".
    pub async fn fetch_all(&self, ids: &[String]) -> Result<ItemResultSet> {
        if ids.is_empty() {
            return Ok(ItemResultSet::default());
        }
        debug!(count = ids.len(), "fetching referenced items");
        Ok(self.client.get_items(ids).await?)
    }

    /// Splice fetched items back onto the declared reference fields.
    ///
    /// Each fetched item first gets the asset-URL pass over its own fields —
    /// asset fields discovered by their category tag, since a referenced
    /// item's declared lists are unknown here — and is then attached as
    /// `contentItem` to every entry whose `id` matches. Entries sharing an ID
    /// receive equal items.
    pub fn attach(
        &self,
        field_names: &[String],
        results: &ItemResultSet,
        fields: &mut Map<String, Value>,
    ) -> Result<()> {
        for item in &results.items {
            let mut item = item.clone();
            let asset_fields = digital_asset_field_names(&item.fields);
            self.enricher
                .resolve_asset_urls(&asset_fields, &mut item.fields)?;

            for name in field_names {
                let Some(mut entries) = get_entries::<Option<ReferenceEntry>>(fields, name)? else {
                    continue;
                };
                let mut matched = false;
                for entry in entries.iter_mut() {
                    let Some(entry) = entry else { continue };
                    if entry.id == item.id {
                        entry.content_item = Some(Box::new(item.clone()));
                        matched = true;
                    }
                }
                if matched {
                    set_entries(fields, name, &entries)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentlayout_client::StaticContentClient;
    use contentlayout_fields::ContentItem;
    use contentlayout_templating::CommonMarkRenderer;
    use serde_json::json;

    const NO_PERMISSION: &str = "You do not have permission to view this asset";

    fn item_with_fields(id: &str, fields: Value) -> ContentItem {
        ContentItem {
            id: id.into(),
            name: Some(format!("item {id}")),
            fields: fields.as_object().cloned().unwrap(),
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn empty_id_list_never_issues_a_request() {
        let client = StaticContentClient::new().with_item(ContentItem::new("A1"));
        let markdown = CommonMarkRenderer::new();
        let enricher = FieldEnricher::new(&client, &markdown, NO_PERMISSION);
        let resolver = ReferenceResolver::new(&client, &enricher);

        let results = resolver.fetch_all(&[]).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(client.fetch_count(), 0);
    }

    #[tokio::test]
    async fn fetch_all_batches_into_one_request() {
        let client = StaticContentClient::new()
            .with_item(ContentItem::new("A1"))
            .with_item(ContentItem::new("A2"));
        let markdown = CommonMarkRenderer::new();
        let enricher = FieldEnricher::new(&client, &markdown, NO_PERMISSION);
        let resolver = ReferenceResolver::new(&client, &enricher);

        let results = resolver
            .fetch_all(&["A1".into(), "A2".into()])
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(client.fetch_count(), 1);
    }

    #[tokio::test]
    async fn attach_splices_items_onto_matching_entries() {
        let client = StaticContentClient::new();
        let markdown = CommonMarkRenderer::new();
        let enricher = FieldEnricher::new(&client, &markdown, NO_PERMISSION);
        let resolver = ReferenceResolver::new(&client, &enricher);

        let results = ItemResultSet {
            items: vec![item_with_fields("A1", json!({ "title": "Fetched" }))],
        };
        let mut fields = json!({
            "author": { "id": "A1" },
            "editor": { "id": "other" }
        })
        .as_object()
        .cloned()
        .unwrap();

        resolver
            .attach(&["author".to_string(), "editor".to_string()], &results, &mut fields)
            .unwrap();

        assert_eq!(fields["author"]["contentItem"]["id"], "A1");
        assert_eq!(fields["author"]["contentItem"]["fields"]["title"], "Fetched");
        assert!(fields["editor"].get("contentItem").is_none());
    }

    #[tokio::test]
    async fn attach_skips_null_sequence_elements() {
        let client = StaticContentClient::new();
        let markdown = CommonMarkRenderer::new();
        let enricher = FieldEnricher::new(&client, &markdown, NO_PERMISSION);
        let resolver = ReferenceResolver::new(&client, &enricher);

        let results = ItemResultSet {
            items: vec![item_with_fields("A1", json!({}))],
        };
        let mut fields = json!({ "related": [{ "id": "A1" }, null] })
            .as_object()
            .cloned()
            .unwrap();

        resolver
            .attach(&["related".to_string()], &results, &mut fields)
            .unwrap();

        assert_eq!(fields["related"][0]["contentItem"]["id"], "A1");
        assert_eq!(fields["related"][1], Value::Null);
    }

    #[tokio::test]
    async fn duplicate_ids_receive_equal_items() {
        let client = StaticContentClient::new();
        let markdown = CommonMarkRenderer::new();
        let enricher = FieldEnricher::new(&client, &markdown, NO_PERMISSION);
        let resolver = ReferenceResolver::new(&client, &enricher);

        let results = ItemResultSet {
            items: vec![item_with_fields("A1", json!({}))],
        };
        let mut fields = json!({
            "primary": { "id": "A1" },
            "related": [{ "id": "A1" }, { "id": "B2" }]
        })
        .as_object()
        .cloned()
        .unwrap();

        resolver
            .attach(&["primary".to_string(), "related".to_string()], &results, &mut fields)
            .unwrap();

        assert_eq!(
            fields["primary"]["contentItem"],
            fields["related"][0]["contentItem"]
        );
        assert!(fields["related"][1].get("contentItem").is_none());
    }

    #[tokio::test]
    async fn attached_items_get_their_own_asset_urls_resolved() {
        let client = StaticContentClient::new().with_rendition_prefix("https://cdn.test/assets");
        let markdown = CommonMarkRenderer::new();
        let enricher = FieldEnricher::new(&client, &markdown, NO_PERMISSION);
        let resolver = ReferenceResolver::new(&client, &enricher);

        let results = ItemResultSet {
            items: vec![item_with_fields(
                "A1",
                json!({
                    "portrait": { "id": "D3", "type": "Image", "typeCategory": "DigitalAssetType" },
                    "reel": { "id": "D4", "type": "Video", "typeCategory": "DigitalAssetType" },
                    "title": "untouched"
                }),
            )],
        };
        let mut fields = json!({ "author": { "id": "A1" } })
            .as_object()
            .cloned()
            .unwrap();

        resolver
            .attach(&["author".to_string()], &results, &mut fields)
            .unwrap();

        let attached = &fields["author"]["contentItem"]["fields"];
        assert_eq!(attached["portrait"]["url"], "https://cdn.test/assets/D3/native");
        assert_eq!(attached["reel"]["showName"], true);
        assert!(attached["reel"].get("url").is_none());
        assert_eq!(attached["title"], "untouched");
    }
}
