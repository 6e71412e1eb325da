//! Renderer trait definition
//!
//! This module defines the core Renderer trait that all output targets
//! implement, plus the context value threaded into every render call.

use crate::error::RenderError;
use crate::style::StyleSettings;
use mdocx_core::{BlockElement, Dialect, RunStyle};

/// Rendered output produced by a [`Renderer`] implementation.
pub enum RenderedDocument {
    /// UTF-8 text output (e.g. HTML, JSON)
    Text(String),
    /// Binary output (e.g. docx)
    Binary(Vec<u8>),
}

impl RenderedDocument {
    /// Consume the rendered output and return the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            RenderedDocument::Text(text) => text.into_bytes(),
            RenderedDocument::Binary(bytes) => bytes,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, RenderedDocument::Binary(_))
    }
}

/// Everything a renderer needs besides the blocks themselves: the immutable
/// style settings for this invocation and the dialect the source was parsed
/// under.
///
/// The dialect's code font is replaced with the configured one on
/// construction, so renderers and the tokenizer agree on run fonts without
/// consulting the settings twice.
pub struct RenderContext<'a> {
    pub settings: &'a StyleSettings,
    dialect: Dialect,
}

impl<'a> RenderContext<'a> {
    pub fn new(settings: &'a StyleSettings, dialect: &Dialect) -> Self {
        let dialect = dialect.clone().with_code_font(settings.code_font.clone());
        RenderContext { settings, dialect }
    }

    /// The dialect to tokenize with (code font already resolved).
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// The base run style for body text: body font at body size, no flags.
    pub fn body_style(&self) -> RunStyle {
        RunStyle::plain(self.settings.body_font.clone(), self.settings.body_size)
    }
}

/// Trait for output targets
///
/// Implementors turn a block sequence into a concrete artifact. Rendering is
/// pure: the same blocks and context always produce the same output.
pub trait Renderer: Send + Sync {
    /// The name of this renderer (e.g. "docx", "html", "json")
    fn name(&self) -> &str;

    /// Optional description of this renderer
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this renderer (without the leading
    /// dot). Used for output-path detection and for appending the extension
    /// to user-supplied filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Render a block sequence into an artifact.
    fn render(
        &self,
        blocks: &[BlockElement],
        ctx: &RenderContext,
    ) -> Result<RenderedDocument, RenderError>;
}
