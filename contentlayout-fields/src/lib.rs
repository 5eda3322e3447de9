//! Content item and field entry model
//!
//! `contentlayout-fields` owns the data model the enrichment pipeline works
//! over: a content item with a raw JSON field map, the typed entry shapes that
//! live inside declared fields (references, digital assets, dates), and the
//! single-value-vs-sequence normalization used by every transform.
//!
//! Field values stay `serde_json::Value` at rest so arbitrary caller data
//! flows through to the template untouched; transforms obtain typed views of
//! individual fields through [`value::get_entries`] / [`value::set_entries`]
//! and mutate them through the [`OneOrMany`] normalized sequence.

pub mod error;
pub mod types;
pub mod value;

pub use error::{FieldsError, Result};
pub use types::{
    ContentItem, DateEntry, DigitalAssetEntry, ReferenceEntry, ReferenceInfo,
    DIGITAL_ASSET_TYPE_CATEGORY,
};
pub use value::{digital_asset_field_names, get_entries, set_entries, OneOrMany};
