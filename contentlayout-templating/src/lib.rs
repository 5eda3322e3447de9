//! Template engine and markdown renderer seams
//!
//! The rendering pipeline never talks to a template or markdown library
//! directly; it goes through the [`TemplateEngine`] and [`MarkdownRenderer`]
//! traits, injected once at pipeline construction. The default
//! implementations are Liquid ([`LiquidEngine`]) and CommonMark
//! ([`CommonMarkRenderer`]).

pub mod engine;
pub mod error;
pub mod markdown;

pub use engine::{LiquidEngine, TemplateEngine};
pub use error::{Result, TemplatingError};
pub use markdown::{CommonMarkRenderer, MarkdownRenderer};
