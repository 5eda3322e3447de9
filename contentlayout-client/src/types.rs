//! Response types for the batched item lookup.

use contentlayout_fields::ContentItem;
use serde::{Deserialize, Serialize};

/// The batched-fetch response: the full content items that were found.
///
/// Used only transiently to splice fetched data back onto reference entries;
/// never retained after enrichment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemResultSet {
    #[serde(default)]
    pub items: Vec<ContentItem>,
}

impl ItemResultSet {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_platform_shape() {
        let set: ItemResultSet = serde_json::from_value(json!({
            "items": [{ "id": "A", "name": "Author", "fields": {} }]
        }))
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.items[0].id, "A");
    }

    #[test]
    fn missing_items_defaults_empty() {
        let set: ItemResultSet = serde_json::from_value(json!({})).unwrap();
        assert!(set.is_empty());
    }
}
