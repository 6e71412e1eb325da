//! Error types for render operations

use std::fmt;

/// Errors that can occur while selecting or running a renderer.
///
/// Parsing never fails, so everything here belongs to the generation boundary
/// and is always surfaced to the user as a non-fatal message.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Renderer not found in the registry
    RendererNotFound(String),
    /// Renderer cannot fulfill the request (e.g. binary output to stdout)
    NotSupported(String),
    /// Building or packaging the artifact failed
    Serialization(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::RendererNotFound(name) => write!(f, "Renderer '{name}' not found"),
            RenderError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
            RenderError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}
