//! Template engine seam and the Liquid-backed default.

use serde_json::Value;

use crate::error::{Result, TemplatingError};

/// Renders a string template against a JSON data model.
///
/// The model is the enriched content item; implementations decide their own
/// template syntax. Failures must not emit partial output.
pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: &str, model: &Value) -> Result<String>;
}

/// Template engine backed by Liquid with the standard filter library.
pub struct LiquidEngine {
    parser: liquid::Parser,
}

impl LiquidEngine {
    /// Create an engine with the stdlib filter set.
    pub fn new() -> Result<Self> {
        let parser = liquid::ParserBuilder::with_stdlib()
            .build()
            .map_err(|e| TemplatingError::Parse(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Create an engine with a custom parser.
    pub fn with_parser(parser: liquid::Parser) -> Self {
        Self { parser }
    }
}

impl TemplateEngine for LiquidEngine {
    fn render(&self, template: &str, model: &Value) -> Result<String> {
        let template = self
            .parser
            .parse(template)
            .map_err(|e| TemplatingError::Parse(e.to_string()))?;
        let globals =
            liquid::model::to_object(model).map_err(|e| TemplatingError::Render(e.to_string()))?;
        template
            .render(&globals)
            .map_err(|e| TemplatingError::Render(e.to_string()))
    }
}
