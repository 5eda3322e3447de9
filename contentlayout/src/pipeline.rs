//! The enrichment entry point and the template-render boundary.

use std::sync::Arc;

use contentlayout_client::ContentClient;
use contentlayout_fields::{ContentItem, FieldsError};
use contentlayout_templating::{
    CommonMarkRenderer, LiquidEngine, MarkdownRenderer, TemplateEngine,
};
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::enricher::FieldEnricher;
use crate::error::{LayoutError, Result};
use crate::resolver::ReferenceResolver;

/// The message annotated on entries the caller may not view.
pub const DEFAULT_NO_PERMISSION_MESSAGE: &str =
    "You do not have permission to view this asset";

/// The declared field-name lists of a content type, grouped by transform.
///
/// Transforms operate on disjoint name sets, so their relative order does not
/// matter; only reference-ID collection must precede the batched fetch.
#[derive(Debug, Clone, Default)]
pub struct FieldBindings {
    pub reference_fields: Vec<String>,
    pub digital_asset_fields: Vec<String>,
    pub markdown_fields: Vec<String>,
    pub rich_text_fields: Vec<String>,
    pub date_time_fields: Vec<String>,
}

impl FieldBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reference_fields(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.reference_fields = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn digital_asset_fields(
        mut self,
        names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.digital_asset_fields = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn markdown_fields(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.markdown_fields = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn rich_text_fields(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.rich_text_fields = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn date_time_fields(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.date_time_fields = names.into_iter().map(Into::into).collect();
        self
    }
}

/// Injected collaborators and settings, resolved once at pipeline
/// construction. There is no ambient-global fallback.
pub struct PipelineConfig {
    pub template_engine: Arc<dyn TemplateEngine>,
    pub markdown: Arc<dyn MarkdownRenderer>,
    pub no_permission_message: String,
}

impl PipelineConfig {
    /// Default collaborators: Liquid templates and CommonMark markdown.
    pub fn new() -> Result<Self> {
        Ok(Self {
            template_engine: Arc::new(LiquidEngine::new()?),
            markdown: Arc::new(CommonMarkRenderer::new()),
            no_permission_message: DEFAULT_NO_PERMISSION_MESSAGE.to_string(),
        })
    }

    pub fn with_template_engine(mut self, engine: Arc<dyn TemplateEngine>) -> Self {
        self.template_engine = engine;
        self
    }

    pub fn with_markdown_renderer(mut self, renderer: Arc<dyn MarkdownRenderer>) -> Self {
        self.markdown = renderer;
        self
    }

    pub fn with_no_permission_message(mut self, message: impl Into<String>) -> Self {
        self.no_permission_message = message.into();
        self
    }
}

/// The per-request enrichment and rendering pipeline.
///
/// Stateless across invocations: every call shallow-copies the caller's
/// field map, runs the synchronous transforms, suspends once for the batched
/// reference fetch, splices the results back, and hands the model off.
pub struct LayoutPipeline<C: ContentClient> {
    client: C,
    config: PipelineConfig,
}

impl<C: ContentClient> LayoutPipeline<C> {
    pub fn new(client: C, config: PipelineConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Enrich a content item's fields and return the completed field map,
    /// ready for template substitution. The caller's item is not mutated.
    pub async fn enrich(
        &self,
        item: &ContentItem,
        bindings: &FieldBindings,
    ) -> Result<Map<String, Value>> {
        let mut fields = item.fields.clone();
        let enricher = FieldEnricher::new(
            &self.client,
            self.config.markdown.as_ref(),
            &self.config.no_permission_message,
        );

        // The ID snapshot taken here is the explicit link between the collect
        // pass and the attach pass over the same fields.
        let ids = enricher.collect_reference_ids(&bindings.reference_fields, &mut fields)?;
        enricher.resolve_asset_urls(&bindings.digital_asset_fields, &mut fields)?;
        enricher.expand_markdown(&bindings.markdown_fields, &mut fields)?;
        enricher.expand_rich_text(&bindings.rich_text_fields, &mut fields)?;
        enricher.format_date_times(&bindings.date_time_fields, &mut fields)?;

        let resolver = ReferenceResolver::new(&self.client, &enricher);
        let results = resolver.fetch_all(&ids).await?;
        resolver.attach(&bindings.reference_fields, &results, &mut fields)?;

        debug!(item = %item.id, fields = fields.len(), "enrichment complete");
        Ok(fields)
    }

    /// Expand a template against a model. Expansion failure yields no
    /// partial HTML; it is logged with the template's identity and surfaced
    /// as an error.
    pub fn render(&self, template_name: &str, template: &str, model: &Value) -> Result<String> {
        self.config
            .template_engine
            .render(template, model)
            .map_err(|source| {
                error!(template = template_name, %source, "template expansion failed");
                LayoutError::TemplateExpansion {
                    template: template_name.to_string(),
                    source,
                }
            })
    }

    /// Enrich an item and expand the template against the full item model
    /// (identity, name, enriched fields) in one call.
    pub async fn render_item(
        &self,
        item: &ContentItem,
        bindings: &FieldBindings,
        template_name: &str,
        template: &str,
    ) -> Result<String> {
        let fields = self.enrich(item, bindings).await?;
        let mut model = serde_json::to_value(item).map_err(FieldsError::Json)?;
        if let Value::Object(obj) = &mut model {
            obj.insert("fields".to_string(), Value::Object(fields));
        }
        self.render(template_name, template, &model)
    }
}
