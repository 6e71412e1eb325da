//! HTML rendering (blocks → standalone preview document)
//!
//! Produces a self-contained HTML5 document with a small embedded stylesheet.
//! This is the preview surface: consecutive list items are grouped into
//! `<ul>`/`<ol>` elements, runs become semantic inline tags, and all text is
//! escaped. Printing the page from a browser is also the supported route to
//! PDF, so the stylesheet keeps print output sane.

use crate::error::RenderError;
use crate::renderer::{RenderContext, RenderedDocument, Renderer};
use mdocx_core::{tokenize, BlockElement, StyledRun};

/// Standalone HTML preview renderer.
pub struct HtmlRenderer;

const CSS: &str = "\
body { margin: 2rem auto; max-width: 48rem; line-height: 1.6; \
font-family: Georgia, 'Songti SC', serif; color: #222; }
h1, h2, h3, h4, h5, h6 { line-height: 1.25; }
blockquote { margin-left: 0; padding-left: 1rem; border-left: 3px solid #667eea; \
color: #666; font-style: italic; }
pre { background: #f4f4f4; padding: 0.75rem; overflow-x: auto; }
code { font-family: Consolas, monospace; font-size: 0.9em; }
.math { font-style: italic; font-family: 'Cambria Math', serif; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: left; }
th { background: #f8f9fa; }
hr { border: none; border-top: 1px solid #ccc; margin: 1.5rem 0; }
li.indent-1 { margin-left: 1.5rem; }
li.indent-2 { margin-left: 3rem; }
@media print { body { margin: 0; max-width: none; } }
";

impl Renderer for HtmlRenderer {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Standalone HTML preview document"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn render(
        &self,
        blocks: &[BlockElement],
        ctx: &RenderContext,
    ) -> Result<RenderedDocument, RenderError> {
        let title = document_title(blocks);
        let mut body = String::new();
        let mut list: Option<ListKind> = None;

        for block in blocks {
            // Close an open list when the block stream leaves it.
            let next_kind = list_kind(block);
            if list != next_kind {
                if let Some(kind) = list.take() {
                    body.push_str(kind.close());
                    body.push('\n');
                }
                if let Some(kind) = next_kind {
                    body.push_str(kind.open());
                    body.push('\n');
                    list = Some(kind);
                }
            }

            render_block(&mut body, block, ctx);
        }
        if let Some(kind) = list {
            body.push_str(kind.close());
            body.push('\n');
        }

        log::debug!("rendered {} blocks into an html preview", blocks.len());
        Ok(RenderedDocument::Text(format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
            escape(&title),
            CSS,
            body
        )))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn open(self) -> &'static str {
        match self {
            ListKind::Unordered => "<ul>",
            ListKind::Ordered => "<ol>",
        }
    }

    fn close(self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        }
    }
}

fn list_kind(block: &BlockElement) -> Option<ListKind> {
    match block {
        BlockElement::Bullet { .. } => Some(ListKind::Unordered),
        BlockElement::Numbered { .. } => Some(ListKind::Ordered),
        _ => None,
    }
}

/// The first heading names the document; otherwise a generic title.
fn document_title(blocks: &[BlockElement]) -> String {
    blocks
        .iter()
        .find_map(|b| match b {
            BlockElement::Heading { content, .. } => Some(content.clone()),
            _ => None,
        })
        .unwrap_or_else(|| "Document".to_string())
}

fn render_block(out: &mut String, block: &BlockElement, ctx: &RenderContext) {
    match block {
        BlockElement::Heading { level, content } => {
            out.push_str(&format!("<h{level}>{}</h{level}>\n", escape(content)));
        }
        BlockElement::Paragraph { content } => {
            out.push_str(&format!("<p>{}</p>\n", inline_html(content, ctx)));
        }
        BlockElement::Bullet { content, indent } | BlockElement::Numbered { content, indent } => {
            let class = match indent {
                0 => String::new(),
                depth => format!(" class=\"indent-{}\"", depth.min(&2)),
            };
            out.push_str(&format!(
                "<li{class}>{}</li>\n",
                inline_html(content, ctx)
            ));
        }
        BlockElement::Quote { content } => {
            out.push_str(&format!(
                "<blockquote>{}</blockquote>\n",
                escape(content)
            ));
        }
        BlockElement::Code { content, lang } => {
            let class = match lang {
                Some(lang) => format!(" class=\"language-{}\"", escape(lang)),
                None => String::new(),
            };
            out.push_str(&format!(
                "<pre><code{class}>{}</code></pre>\n",
                escape(content)
            ));
        }
        BlockElement::Table { rows } => {
            out.push_str("<table>\n");
            for (row_index, row) in rows.iter().enumerate() {
                let tag = if row_index == 0 { "th" } else { "td" };
                out.push_str("<tr>");
                for cell in row {
                    out.push_str(&format!("<{tag}>{}</{tag}>", inline_html(cell, ctx)));
                }
                out.push_str("</tr>\n");
            }
            out.push_str("</table>\n");
        }
        BlockElement::Rule => {
            out.push_str("<hr>\n");
        }
    }
}

/// Tokenize a line and wrap each run in the matching inline tags.
fn inline_html(text: &str, ctx: &RenderContext) -> String {
    let base = ctx.body_style();
    tokenize(text, &base, ctx.dialect())
        .iter()
        .map(|run| run_html(run, ctx))
        .collect()
}

fn run_html(run: &StyledRun, ctx: &RenderContext) -> String {
    let mut html = escape(&run.text);
    let dialect = ctx.dialect();

    let is_code = run.style.font == dialect.code_font && !run.style.bold && !run.style.italic;
    let is_math = dialect
        .math_font
        .as_deref()
        .is_some_and(|f| run.style.font == f);

    if is_code && run.style.font != ctx.settings.body_font {
        html = format!("<code>{html}</code>");
    } else if is_math {
        html = format!("<span class=\"math\">{html}</span>");
    } else {
        if run.style.bold {
            html = format!("<strong>{html}</strong>");
        }
        if run.style.italic {
            html = format!("<em>{html}</em>");
        }
        if run.style.strike {
            html = format!("<del>{html}</del>");
        }
    }
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
