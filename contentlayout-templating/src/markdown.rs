//! Markdown renderer seam and the CommonMark-backed default.

/// Converts markdown source to HTML.
///
/// Conversion is infallible: markdown has no invalid inputs, only surprising
/// renderings.
pub trait MarkdownRenderer: Send + Sync {
    fn to_html(&self, markdown: &str) -> String;
}

/// Markdown renderer backed by comrak with plain CommonMark options.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommonMarkRenderer;

impl CommonMarkRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl MarkdownRenderer for CommonMarkRenderer {
    fn to_html(&self, markdown: &str) -> String {
        comrak::markdown_to_html(markdown, &comrak::Options::default())
    }
}
