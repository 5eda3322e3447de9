//! # ContentLayout
//!
//! Field-enrichment and rendering pipeline for content-layout components on a
//! hosted CMS/Sites platform. Given a content item and its declared field-name
//! lists, the pipeline enriches field values in place (reference access
//! checks, digital-asset URL resolution, markdown and rich-text expansion,
//! date formatting), batch-fetches every referenced item in one round trip,
//! splices the results back onto their originating entries, and hands the
//! enriched model to a template engine.
//!
//! ## Architecture
//!
//! - [`FieldEnricher`] — synchronous per-field-type transforms over the field
//!   map.
//! - [`ReferenceResolver`] — the single async boundary: one batched fetch,
//!   then the splice pass (including a nested asset-URL pass over each
//!   fetched item's own fields).
//! - [`LayoutPipeline`] — wires the two together behind one entry point and
//!   owns the injected template engine and markdown renderer.
//!
//! The pipeline is stateless and call-scoped: each invocation works on a
//! private copy of the caller's field map, so concurrent renders never share
//! mutable state.

mod enricher;
pub mod error;
mod pipeline;
mod resolver;

pub use enricher::FieldEnricher;
pub use error::{LayoutError, Result};
pub use pipeline::{FieldBindings, LayoutPipeline, PipelineConfig};
pub use resolver::ReferenceResolver;

// The model types callers hand in and get back.
pub use contentlayout_client::{ContentClient, ItemResultSet, StaticContentClient};
pub use contentlayout_fields::{
    ContentItem, DateEntry, DigitalAssetEntry, OneOrMany, ReferenceEntry, ReferenceInfo,
};
