//! Shared configuration loader for the mdocx toolchain.
//!
//! `defaults/mdocx.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MdocxConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdocx_render::{MarginPreset, StyleSettings};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mdocx.default.toml");

/// Top-level configuration consumed by mdocx applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdocxConfig {
    pub style: StyleConfig,
    pub convert: ConvertConfig,
    pub inspect: InspectConfig,
}

impl MdocxConfig {
    /// Resolve the `[style]` table into the settings value renderers consume.
    pub fn style_settings(&self) -> StyleSettings {
        StyleSettings::from(&self.style)
    }
}

/// Mirrors the knobs exposed by [`StyleSettings`].
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    pub body_font: String,
    pub latin_font: Option<String>,
    pub body_size: f32,
    pub heading_font: String,
    pub code_font: String,
    pub line_spacing: f32,
    pub first_indent: u32,
    pub page_margin: MarginPresetConfig,
    pub header_text: Option<String>,
    pub page_numbers: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum MarginPresetConfig {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "narrow")]
    Narrow,
    #[serde(rename = "wide")]
    Wide,
}

impl From<MarginPresetConfig> for MarginPreset {
    fn from(config: MarginPresetConfig) -> Self {
        match config {
            MarginPresetConfig::Normal => MarginPreset::Normal,
            MarginPresetConfig::Narrow => MarginPreset::Narrow,
            MarginPresetConfig::Wide => MarginPreset::Wide,
        }
    }
}

impl From<StyleConfig> for StyleSettings {
    fn from(config: StyleConfig) -> Self {
        StyleSettings::from(&config)
    }
}

impl From<&StyleConfig> for StyleSettings {
    fn from(config: &StyleConfig) -> Self {
        StyleSettings {
            body_font: config.body_font.clone(),
            latin_font: config.latin_font.clone().filter(|f| !f.is_empty()),
            body_size: config.body_size,
            heading_font: config.heading_font.clone(),
            code_font: config.code_font.clone(),
            line_spacing: config.line_spacing,
            first_indent: config.first_indent,
            page_margin: config.page_margin.into(),
            header_text: config.header_text.clone().filter(|t| !t.is_empty()),
            page_numbers: config.page_numbers,
        }
    }
}

/// Conversion defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    /// Editor profile the source is parsed under.
    pub dialect: String,
}

/// Controls inspect output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub runs: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdocxConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdocxConfig, ConfigError> {
    Loader::new().build()
}
