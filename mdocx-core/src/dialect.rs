//! Editor dialect presets
//!
//! A [`Dialect`] describes which parsing capabilities an editor profile enables.
//! The four built-in presets correspond to the shipped editor profiles; all of
//! them share the same parser and tokenizer, parameterized by this value.

use serde::Serialize;

/// Which inline markers the tokenizer recognizes.
///
/// Disabled markers are left in the text as literal characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkerSet {
    /// `**bold**`
    pub bold: bool,
    /// `*italic*`
    pub italic: bool,
    /// `~~strikethrough~~`
    pub strike: bool,
    /// `` `inline code` ``
    pub code: bool,
    /// `$inline math$`
    pub math: bool,
}

/// Capability configuration for one editor profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dialect {
    /// Profile name ("general", "academic", "developer", "office").
    pub name: String,
    pub markers: MarkerSet,
    /// Derive list indent depth from leading whitespace (two spaces per level).
    /// When off, every list item sits at depth 0.
    pub track_indent: bool,
    /// Keep the text after the opening fence as the code block's language tag.
    pub capture_lang: bool,
    /// Font family substituted into inline-code runs.
    pub code_font: String,
    /// Font family substituted into inline-math runs (math runs also italicize).
    pub math_font: Option<String>,
}

impl Dialect {
    /// The general-purpose profile: every marker except math, indented lists,
    /// language tags on fences.
    pub fn general() -> Self {
        Dialect {
            name: "general".to_string(),
            markers: MarkerSet {
                bold: true,
                italic: true,
                strike: true,
                code: true,
                math: false,
            },
            track_indent: true,
            capture_lang: true,
            code_font: "Consolas".to_string(),
            math_font: None,
        }
    }

    /// The academic profile trades strikethrough for `$…$` math runs and keeps
    /// lists flat.
    pub fn academic() -> Self {
        Dialect {
            name: "academic".to_string(),
            markers: MarkerSet {
                bold: true,
                italic: true,
                strike: false,
                code: true,
                math: true,
            },
            track_indent: false,
            capture_lang: false,
            code_font: "Consolas".to_string(),
            math_font: Some("Cambria Math".to_string()),
        }
    }

    /// The developer profile: minimal marker set, language tags kept so code
    /// blocks can be labeled. The code font is user-configurable, see
    /// [`Dialect::with_code_font`].
    pub fn developer() -> Self {
        Dialect {
            name: "developer".to_string(),
            markers: MarkerSet {
                bold: true,
                italic: true,
                strike: false,
                code: true,
                math: false,
            },
            track_indent: false,
            capture_lang: true,
            code_font: "Consolas".to_string(),
            math_font: None,
        }
    }

    /// The office profile: same markers as general, flat lists, no language
    /// tags.
    pub fn office() -> Self {
        Dialect {
            name: "office".to_string(),
            markers: MarkerSet {
                bold: true,
                italic: true,
                strike: true,
                code: true,
                math: false,
            },
            track_indent: false,
            capture_lang: false,
            code_font: "Consolas".to_string(),
            math_font: None,
        }
    }

    /// Look up a preset by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "general" => Some(Self::general()),
            "academic" => Some(Self::academic()),
            "developer" => Some(Self::developer()),
            "office" => Some(Self::office()),
            _ => None,
        }
    }

    /// All preset names, in presentation order.
    pub fn preset_names() -> &'static [&'static str] {
        &["general", "academic", "developer", "office"]
    }

    /// Override the inline-code font (the developer profile exposes this as a
    /// user setting).
    pub fn with_code_font(mut self, font: impl Into<String>) -> Self {
        self.code_font = font.into();
        self
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::general()
    }
}
