//! Core content and field entry types.
//!
//! All types serialize to/from the platform's JSON wire shape via serde; field
//! names that differ from Rust convention carry explicit renames
//! (`isAccessible`, `referenceInaccessible`, `contentItem`, `showName`,
//! `typeCategory`). Every entry struct flattens unknown properties into
//! `extra` so a typed round trip through a field never drops caller data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `typeCategory` tag marking a field value as a digital asset.
pub const DIGITAL_ASSET_TYPE_CATEGORY: &str = "DigitalAssetType";

/// Digital asset types whose URL resolution is deferred to the player,
/// which fetches on demand.
const PLAYER_RESOLVED_TYPES: &[&str] = &["Video", "File"];

/// A content item: identity, display name, and its raw field map.
///
/// Fields stay as raw JSON; the enrichment transforms pull typed views of
/// individual fields on demand. The pipeline mutates `fields` in place; each
/// invocation works on a private copy of the caller's map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentItem {
    /// Create an item with an identity and an empty field map.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            fields: Map::new(),
            extra: Map::new(),
        }
    }
}

/// Access metadata carried on reference and asset entries.
///
/// Absent metadata means the entry is accessible; present metadata gates on
/// `isAccessible`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceInfo {
    #[serde(rename = "isAccessible", default)]
    pub is_accessible: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An entry in a reference field: points at another content item by ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceInfo>,
    /// Set in place of a fetch when the caller may not view the target.
    #[serde(
        rename = "referenceInaccessible",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reference_inaccessible: Option<String>,
    /// Populated only after the batched fetch resolves.
    #[serde(rename = "contentItem", default, skip_serializing_if = "Option::is_none")]
    pub content_item: Option<Box<ContentItem>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReferenceEntry {
    /// No access metadata means accessible; otherwise the flag decides.
    pub fn is_accessible(&self) -> bool {
        self.reference.as_ref().map_or(true, |r| r.is_accessible)
    }
}

/// An entry in a digital asset field: a media asset needing either a direct
/// rendition URL or deferred player resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitalAssetEntry {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(rename = "typeCategory", default, skip_serializing_if = "Option::is_none")]
    pub type_category: Option<String>,
    /// Set for player-resolved types instead of a URL.
    #[serde(rename = "showName", default, skip_serializing_if = "Option::is_none")]
    pub show_name: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceInfo>,
    #[serde(
        rename = "referenceInaccessible",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reference_inaccessible: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DigitalAssetEntry {
    /// No access metadata means accessible; otherwise the flag decides.
    pub fn is_accessible(&self) -> bool {
        self.reference.as_ref().map_or(true, |r| r.is_accessible)
    }

    /// Whether the player resolves this asset on demand, so no rendition URL
    /// is synthesized.
    pub fn defers_to_player(&self) -> bool {
        self.asset_type
            .as_deref()
            .is_some_and(|t| PLAYER_RESOLVED_TYPES.contains(&t))
    }
}

/// An entry in a date-time field: a raw timestamp plus its derived
/// human-readable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
