//! JSON rendering (blocks → inspection dump)
//!
//! Serializes exactly what a renderer receives: the dialect name and the
//! ordered block sequence, optionally with the tokenized runs for every
//! text-bearing block. Used by the CLI's inspect command and by tests.

use crate::error::RenderError;
use crate::renderer::{RenderContext, RenderedDocument, Renderer};
use mdocx_core::{tokenize, BlockElement, StyledRun};
use serde::Serialize;

/// Block/run dump renderer.
#[derive(Default)]
pub struct JsonRenderer {
    include_runs: bool,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also dump the tokenized runs of paragraphs and list items.
    pub fn with_runs() -> Self {
        JsonRenderer { include_runs: true }
    }
}

impl Renderer for JsonRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON dump of the parsed block sequence"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn render(
        &self,
        blocks: &[BlockElement],
        ctx: &RenderContext,
    ) -> Result<RenderedDocument, RenderError> {
        document_json(blocks, ctx, self.include_runs).map(RenderedDocument::Text)
    }
}

#[derive(Serialize)]
struct DocumentDump<'a> {
    dialect: &'a str,
    blocks: Vec<BlockDump<'a>>,
}

#[derive(Serialize)]
struct BlockDump<'a> {
    #[serde(flatten)]
    block: &'a BlockElement,
    #[serde(skip_serializing_if = "Option::is_none")]
    runs: Option<Vec<StyledRun>>,
}

/// Serialize the block sequence as pretty JSON. With `include_runs`, blocks
/// whose text gets tokenized at render time (paragraphs and list items) also
/// carry their run sequence.
pub fn document_json(
    blocks: &[BlockElement],
    ctx: &RenderContext,
    include_runs: bool,
) -> Result<String, RenderError> {
    let base = ctx.body_style();
    let dump = DocumentDump {
        dialect: &ctx.dialect().name,
        blocks: blocks
            .iter()
            .map(|block| {
                let runs = if include_runs {
                    match block {
                        BlockElement::Paragraph { content }
                        | BlockElement::Bullet { content, .. }
                        | BlockElement::Numbered { content, .. } => {
                            Some(tokenize(content, &base, ctx.dialect()))
                        }
                        _ => None,
                    }
                } else {
                    None
                };
                BlockDump { block, runs }
            })
            .collect(),
    };
    serde_json::to_string_pretty(&dump)
        .map_err(|e| RenderError::Serialization(format!("json encoding failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleSettings;
    use mdocx_core::{parse, Dialect};

    fn ctx_fixture(settings: &StyleSettings) -> RenderContext<'_> {
        RenderContext::new(settings, &Dialect::general())
    }

    #[test]
    fn dump_shape() {
        let settings = StyleSettings::default();
        let ctx = ctx_fixture(&settings);
        let blocks = parse("## Title\n\nHello **world**", &Dialect::general());
        let json = document_json(&blocks, &ctx, false).unwrap();

        insta::assert_snapshot!(json, @r#"
        {
          "dialect": "general",
          "blocks": [
            {
              "type": "heading",
              "level": 2,
              "content": "Title"
            },
            {
              "type": "paragraph",
              "content": "Hello **world**"
            }
          ]
        }
        "#);
    }

    #[test]
    fn runs_are_included_on_request() {
        let settings = StyleSettings::default();
        let ctx = ctx_fixture(&settings);
        let blocks = parse("Hello **world**", &Dialect::general());
        let json = document_json(&blocks, &ctx, true).unwrap();

        assert!(json.contains("\"runs\""));
        assert!(json.contains("\"bold\": true"));
        assert!(json.contains("\"text\": \"world\""));
    }

    #[test]
    fn aggregate_blocks_never_carry_runs() {
        let settings = StyleSettings::default();
        let ctx = ctx_fixture(&settings);
        let blocks = parse("```\ncode\n```", &Dialect::general());
        let json = document_json(&blocks, &ctx, true).unwrap();
        assert!(!json.contains("\"runs\""));
    }
}
