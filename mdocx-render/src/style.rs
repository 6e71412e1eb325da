//! Style settings and built-in templates
//!
//! [`StyleSettings`] is the flat record of rendering preferences a user can
//! adjust: fonts, sizes, spacing, margins, header line, page numbers. It is
//! built once per invocation (template, config file, command line) and passed
//! into rendering as an immutable value - renderers never reach into shared
//! state.
//!
//! Sizes here are user-facing units (points, characters, a line-spacing
//! multiplier). The docx renderer converts to Word units at its own boundary.

/// Page margin presets; each maps to a fixed quadruple of margin units in the
/// docx renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginPreset {
    Normal,
    Narrow,
    Wide,
}

impl MarginPreset {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "normal" => Some(MarginPreset::Normal),
            "narrow" => Some(MarginPreset::Narrow),
            "wide" => Some(MarginPreset::Wide),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarginPreset::Normal => "normal",
            MarginPreset::Narrow => "narrow",
            MarginPreset::Wide => "wide",
        }
    }
}

/// Rendering preferences, independent of document content.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSettings {
    /// Body font family. For CJK-first documents this is the east-asian
    /// family; see `latin_font`.
    pub body_font: String,
    /// Optional separate family for latin text (the docx renderer puts it in
    /// the ASCII font slot, with `body_font` covering east-asian characters).
    pub latin_font: Option<String>,
    /// Body size in points.
    pub body_size: f32,
    /// Heading font family.
    pub heading_font: String,
    /// Font family for code blocks and inline code runs.
    pub code_font: String,
    /// Line spacing multiplier (1.5 = one-and-a-half lines).
    pub line_spacing: f32,
    /// First-line indent of body paragraphs, in characters; 0 disables.
    pub first_indent: u32,
    pub page_margin: MarginPreset,
    /// Optional page-header line.
    pub header_text: Option<String>,
    /// Page number in the footer.
    pub page_numbers: bool,
}

impl StyleSettings {
    /// Look up a built-in template by name.
    pub fn template(name: &str) -> Option<Self> {
        let base = StyleSettings::default();
        match name {
            "default" => Some(base),
            "academic" => Some(StyleSettings {
                latin_font: Some("Times New Roman".to_string()),
                line_spacing: 2.0,
                ..base
            }),
            "business" => Some(StyleSettings {
                body_font: "微软雅黑".to_string(),
                heading_font: "微软雅黑".to_string(),
                body_size: 10.5,
                first_indent: 0,
                ..base
            }),
            "minimal" => Some(StyleSettings {
                body_font: "Arial".to_string(),
                heading_font: "Arial".to_string(),
                body_size: 11.0,
                first_indent: 0,
                page_margin: MarginPreset::Narrow,
                ..base
            }),
            _ => None,
        }
    }

    /// All template names, in presentation order.
    pub fn template_names() -> &'static [&'static str] {
        &["default", "academic", "business", "minimal"]
    }
}

impl Default for StyleSettings {
    fn default() -> Self {
        StyleSettings {
            body_font: "宋体".to_string(),
            latin_font: None,
            body_size: 12.0,
            heading_font: "黑体".to_string(),
            code_font: "Consolas".to_string(),
            line_spacing: 1.5,
            first_indent: 2,
            page_margin: MarginPreset::Normal,
            header_text: None,
            page_numbers: false,
        }
    }
}
