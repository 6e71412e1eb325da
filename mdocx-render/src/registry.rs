//! Renderer registry for discovery and selection
//!
//! This module provides a centralized registry for all available renderers.
//! Renderers can be registered and retrieved by name, or detected from an
//! output filename.

use crate::error::RenderError;
use crate::renderer::{RenderContext, RenderedDocument, Renderer};
use mdocx_core::BlockElement;
use std::collections::HashMap;

/// Registry of output renderers
///
/// # Examples
///
/// ```ignore
/// let mut registry = RendererRegistry::new();
/// registry.register(MyRenderer);
///
/// let renderer = registry.get("my-renderer")?;
/// let artifact = renderer.render(&blocks, &ctx)?;
/// ```
pub struct RendererRegistry {
    renderers: HashMap<String, Box<dyn Renderer>>,
}

impl RendererRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        RendererRegistry {
            renderers: HashMap::new(),
        }
    }

    /// Register a renderer
    ///
    /// If a renderer with the same name already exists, it will be replaced.
    pub fn register<R: Renderer + 'static>(&mut self, renderer: R) {
        self.renderers
            .insert(renderer.name().to_string(), Box::new(renderer));
    }

    /// Get a renderer by name
    pub fn get(&self, name: &str) -> Result<&dyn Renderer, RenderError> {
        self.renderers
            .get(name)
            .map(|r| r.as_ref())
            .ok_or_else(|| RenderError::RendererNotFound(name.to_string()))
    }

    /// Check if a renderer exists
    pub fn has(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    /// List all available renderer names (sorted)
    pub fn list_renderers(&self) -> Vec<String> {
        let mut names: Vec<_> = self.renderers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect the renderer from an output filename's extension.
    pub fn detect_renderer_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        for renderer in self.renderers.values() {
            if renderer.file_extensions().contains(&extension) {
                return Some(renderer.name().to_string());
            }
        }

        None
    }

    /// Render a block sequence with the named renderer.
    pub fn render(
        &self,
        blocks: &[BlockElement],
        name: &str,
        ctx: &RenderContext,
    ) -> Result<RenderedDocument, RenderError> {
        self.get(name)?.render(blocks, ctx)
    }

    /// Create a registry with the built-in renderers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::renderers::docx::DocxRenderer);
        registry.register(crate::renderers::html::HtmlRenderer);
        registry.register(crate::renderers::json::JsonRenderer::default());

        registry
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
