//! Renderer boundary for mdocx
//!
//!     This crate turns the block/run model produced by mdocx-core into concrete
//!     artifacts. The core stays renderer-agnostic; everything output-specific -
//!     Word's half-points and twips, HTML escaping, the JSON dump shape - lives on
//!     this side of the boundary.
//!
//! Architecture
//!
//!     Every output target implements the [`Renderer`] trait (name, file extension,
//!     render entry point) and is registered in a [`RendererRegistry`] for discovery
//!     by name or output filename. Rendering is a pure function of the block
//!     sequence plus a [`RenderContext`]: the immutable style settings and the
//!     dialect the document was parsed under. Renderers tokenize text-bearing
//!     blocks themselves via mdocx_core::tokenize, so each can decide which blocks
//!     get rich-text treatment (headings, for instance, render their content
//!     verbatim).
//!
//!     The file structure:
//!     .
//!     ├── error.rs            # RenderError
//!     ├── renderer.rs         # Renderer trait, RenderedDocument, RenderContext
//!     ├── registry.rs         # RendererRegistry for discovery and selection
//!     ├── style.rs            # StyleSettings, margin presets, built-in templates
//!     └── renderers
//!         ├── docx.rs         # binary Word document (OOXML)
//!         ├── html.rs         # standalone HTML preview document
//!         └── json.rs         # block/run dump for inspection
//!
//! Renderer choices
//!
//!     Word output is the reason this toolchain exists, so docx is the one binary
//!     renderer. HTML doubles as the live-preview surface and as a print source
//!     (print-to-PDF from a browser covers the PDF story without a second binary
//!     pipeline). The JSON renderer exists for debugging and for tests: it shows
//!     exactly what a renderer receives.

pub mod error;
pub mod renderer;
pub mod renderers;
pub mod registry;
pub mod style;

pub use error::RenderError;
pub use renderer::{RenderContext, RenderedDocument, Renderer};
pub use registry::RendererRegistry;
pub use style::{MarginPreset, StyleSettings};
