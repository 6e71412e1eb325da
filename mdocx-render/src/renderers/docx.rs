//! Word document rendering (blocks → .docx bytes)
//!
//! Everything Word-specific is confined to this file: run sizes double into
//! half-points, the line-spacing multiplier scales ×240 into twips, margin
//! presets become twip quadruples, and each dialect carries the heading size
//! ladder its editor profile ships with. The document is packed into a zip
//! archive in memory; no file I/O happens here.

use crate::error::RenderError;
use crate::renderer::{RenderContext, RenderedDocument, Renderer};
use crate::style::MarginPreset;
use docx_rs::{
    AbstractNumbering, AlignmentType, Docx, Footer, Header, IndentLevel, Level, LevelJc,
    LevelText, LineSpacing, LineSpacingType, NumberFormat, Numbering, NumberingId, PageMargin,
    PageNum, Paragraph, Run, RunFonts, ShdType, Shading, SpecialIndentType, Start, Table,
    TableCell, TableRow,
};
use mdocx_core::{tokenize, BlockElement, RunStyle, StyledRun};

/// Numbering definition ids (abstract and concrete share the id).
const BULLET_NUMBERING: usize = 1;
const DECIMAL_NUMBERING: usize = 2;

/// Spacing after body paragraphs / list items, in twips.
const PARAGRAPH_AFTER: u32 = 120;
const LIST_AFTER: u32 = 60;

/// Binary Word-document renderer built on the OOXML package format.
pub struct DocxRenderer;

impl Renderer for DocxRenderer {
    fn name(&self) -> &str {
        "docx"
    }

    fn description(&self) -> &str {
        "Word document output (OOXML)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn render(
        &self,
        blocks: &[BlockElement],
        ctx: &RenderContext,
    ) -> Result<RenderedDocument, RenderError> {
        let docx = build_document(blocks, ctx);
        let mut buf = std::io::Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buf)
            .map_err(|e| RenderError::Serialization(format!("docx packaging failed: {e}")))?;
        log::debug!("packed {} blocks into a docx document", blocks.len());
        Ok(RenderedDocument::Binary(buf.into_inner()))
    }
}

fn build_document(blocks: &[BlockElement], ctx: &RenderContext) -> Docx {
    let settings = ctx.settings;
    let line = (settings.line_spacing * 240.0).round() as i32;
    let base = ctx.body_style();

    let mut docx = Docx::new()
        .add_abstract_numbering(bullet_numbering())
        .add_numbering(Numbering::new(BULLET_NUMBERING, BULLET_NUMBERING))
        .add_abstract_numbering(decimal_numbering())
        .add_numbering(Numbering::new(DECIMAL_NUMBERING, DECIMAL_NUMBERING))
        .page_margin(page_margin(settings.page_margin));

    if let Some(text) = &settings.header_text {
        docx = docx.header(
            Header::new().add_paragraph(
                Paragraph::new()
                    .add_run(styled_run(
                        &StyledRun {
                            text: text.clone(),
                            style: RunStyle {
                                size: 10.0,
                                color: Some("888888".to_string()),
                                ..base.clone()
                            },
                        },
                        ctx,
                    ))
                    .align(AlignmentType::Center),
            ),
        );
    }
    if settings.page_numbers {
        docx = docx.footer(
            Footer::new().add_paragraph(
                Paragraph::new()
                    .add_page_num(PageNum::new())
                    .align(AlignmentType::Center),
            ),
        );
    }

    for block in blocks {
        match block {
            BlockElement::Heading { level, content } => {
                docx = docx.add_paragraph(heading_paragraph(*level, content, ctx, line));
            }
            BlockElement::Paragraph { content } => {
                let runs = tokenize(content, &base, ctx.dialect());
                let mut para = runs
                    .iter()
                    .fold(Paragraph::new(), |p, r| p.add_run(styled_run(r, ctx)))
                    .line_spacing(body_spacing(line).after(PARAGRAPH_AFTER));
                if settings.first_indent > 0 {
                    let twips = settings.first_indent as i32 * 240;
                    para = para.indent(None, Some(SpecialIndentType::FirstLine(twips)), None, None);
                }
                docx = docx.add_paragraph(para);
            }
            BlockElement::Bullet { content, indent } => {
                docx = docx.add_paragraph(list_paragraph(
                    content,
                    BULLET_NUMBERING,
                    *indent,
                    ctx,
                    line,
                ));
            }
            BlockElement::Numbered { content, indent } => {
                docx = docx.add_paragraph(list_paragraph(
                    content,
                    DECIMAL_NUMBERING,
                    *indent,
                    ctx,
                    line,
                ));
            }
            BlockElement::Quote { content } => {
                docx = docx.add_paragraph(quote_paragraph(content, ctx, line));
            }
            BlockElement::Code { content, lang } => {
                docx = code_paragraphs(docx, content, lang.as_deref(), ctx);
            }
            BlockElement::Table { rows } => {
                docx = docx
                    .add_table(table(rows, ctx))
                    .add_paragraph(Paragraph::new());
            }
            BlockElement::Rule => {
                docx = docx.add_paragraph(rule_paragraph());
            }
        }
    }

    docx
}

/// A run with its style applied; the one place core styles meet Word units.
fn styled_run(run: &StyledRun, ctx: &RenderContext) -> Run {
    let mut out = Run::new()
        .add_text(run.text.as_str())
        .size(half_points(run.style.size))
        .fonts(run_fonts(&run.style.font, ctx));
    if run.style.bold {
        out = out.bold();
    }
    if run.style.italic {
        out = out.italic();
    }
    if run.style.strike {
        out = out.strike();
    }
    if let Some(color) = &run.style.color {
        out = out.color(color.clone());
    }
    out
}

/// Points to half-points.
fn half_points(size: f32) -> usize {
    (size * 2.0).round() as usize
}

/// Body text in CJK documents uses the latin font for the ASCII slot when one
/// is configured; override fonts (code, math, headings) fill both slots.
fn run_fonts(family: &str, ctx: &RenderContext) -> RunFonts {
    match &ctx.settings.latin_font {
        Some(latin) if family == ctx.settings.body_font => {
            RunFonts::new().ascii(latin).east_asia(family)
        }
        _ => RunFonts::new().ascii(family).east_asia(family),
    }
}

fn body_spacing(line: i32) -> LineSpacing {
    LineSpacing::new().line_rule(LineSpacingType::Auto).line(line)
}

/// Heading size ladders, in half-points, per editor profile.
fn heading_half_points(dialect_name: &str, level: u8) -> usize {
    let ladder: [usize; 6] = match dialect_name {
        "academic" => [44, 36, 32, 28, 26, 24],
        "developer" | "office" => [48, 40, 32, 28, 24, 22],
        _ => [64, 52, 44, 36, 32, 28],
    };
    ladder[usize::from(level.clamp(1, 6)) - 1]
}

/// Headings render their content verbatim (inline markers inside a heading
/// stay literal).
fn heading_paragraph(level: u8, content: &str, ctx: &RenderContext, line: i32) -> Paragraph {
    let run = Run::new()
        .add_text(content)
        .bold()
        .size(heading_half_points(&ctx.dialect().name, level))
        .fonts(run_fonts(&ctx.settings.heading_font, ctx));
    Paragraph::new()
        .add_run(run)
        .line_spacing(body_spacing(line).before(240).after(PARAGRAPH_AFTER))
}

fn list_paragraph(
    content: &str,
    numbering: usize,
    indent: usize,
    ctx: &RenderContext,
    line: i32,
) -> Paragraph {
    let base = ctx.body_style();
    tokenize(content, &base, ctx.dialect())
        .iter()
        .fold(Paragraph::new(), |p, r| p.add_run(styled_run(r, ctx)))
        .numbering(NumberingId::new(numbering), IndentLevel::new(indent))
        .line_spacing(body_spacing(line).after(LIST_AFTER))
}

fn quote_paragraph(content: &str, ctx: &RenderContext, line: i32) -> Paragraph {
    let indent = if ctx.dialect().name == "developer" { 480 } else { 720 };
    let style = RunStyle {
        italic: true,
        color: Some("666666".to_string()),
        ..ctx.body_style()
    };
    Paragraph::new()
        .add_run(styled_run(
            &StyledRun {
                text: content.to_string(),
                style,
            },
            ctx,
        ))
        .indent(Some(indent), None, None, None)
        .line_spacing(body_spacing(line).after(PARAGRAPH_AFTER))
}

/// Code blocks render one tight mono paragraph per line (empty lines keep a
/// space so the paragraph is not collapsed), followed by a blank paragraph.
/// The developer profile labels the block with its language tag first.
fn code_paragraphs(mut docx: Docx, content: &str, lang: Option<&str>, ctx: &RenderContext) -> Docx {
    let code_font = ctx.dialect().code_font.clone();
    let code_color = match ctx.dialect().name.as_str() {
        "developer" => Some("abb2bf"),
        _ => None,
    };

    if ctx.dialect().name == "developer" {
        if let Some(lang) = lang {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(
                    Run::new()
                        .add_text(lang)
                        .size(18)
                        .color("888888")
                        .fonts(RunFonts::new().ascii(&code_font).east_asia(&code_font)),
                ),
            );
        }
    }

    for code_line in content.split('\n') {
        let text = if code_line.is_empty() { " " } else { code_line };
        let mut run = Run::new()
            .add_text(text)
            .size(20)
            .fonts(RunFonts::new().ascii(&code_font).east_asia(&code_font));
        if let Some(color) = code_color {
            run = run.color(color);
        }
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(run)
                .line_spacing(LineSpacing::new().line_rule(LineSpacingType::Auto).line(240)),
        );
    }
    docx.add_paragraph(Paragraph::new())
}

fn table(rows: &[Vec<String>], ctx: &RenderContext) -> Table {
    let body_size = half_points(ctx.settings.body_size);
    let table_rows: Vec<TableRow> = rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let cells: Vec<TableCell> = row
                .iter()
                .map(|cell| {
                    let mut run = Run::new()
                        .add_text(cell.as_str())
                        .size(body_size)
                        .fonts(run_fonts(&ctx.settings.body_font, ctx));
                    if row_index == 0 {
                        run = run.bold();
                    }
                    let mut table_cell =
                        TableCell::new().add_paragraph(Paragraph::new().add_run(run));
                    if row_index == 0 {
                        table_cell = table_cell
                            .shading(Shading::new().shd_type(ShdType::Clear).fill("F8F9FA"));
                    }
                    table_cell
                })
                .collect();
            TableRow::new(cells)
        })
        .collect();

    Table::new(table_rows)
}

/// docx has no paragraph borders in this builder, so the rule degrades to a
/// dim line of box-drawing characters.
fn rule_paragraph() -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text("─".repeat(40)).size(16).color("cccccc"))
        .align(AlignmentType::Center)
        .line_spacing(LineSpacing::new().before(240).after(240))
}

fn page_margin(preset: MarginPreset) -> PageMargin {
    let twips = match preset {
        MarginPreset::Normal => 1440,
        MarginPreset::Narrow => 720,
        MarginPreset::Wide => 1800,
    };
    PageMargin::new()
        .top(twips)
        .bottom(twips)
        .left(twips)
        .right(twips)
}

fn bullet_numbering() -> AbstractNumbering {
    let mut numbering = AbstractNumbering::new(BULLET_NUMBERING);
    for level in 0..3usize {
        numbering = numbering.add_level(
            Level::new(
                level,
                Start::new(1),
                NumberFormat::new("bullet"),
                LevelText::new("•"),
                LevelJc::new("left"),
            )
            .indent(
                Some(720 * (level as i32 + 1)),
                Some(SpecialIndentType::Hanging(360)),
                None,
                None,
            ),
        );
    }
    numbering
}

fn decimal_numbering() -> AbstractNumbering {
    let texts = ["%1.", "%1.%2.", "%1.%2.%3."];
    let mut numbering = AbstractNumbering::new(DECIMAL_NUMBERING);
    for (level, text) in texts.iter().enumerate() {
        numbering = numbering.add_level(
            Level::new(
                level,
                Start::new(1),
                NumberFormat::new("decimal"),
                LevelText::new(*text),
                LevelJc::new("left"),
            )
            .indent(
                Some(720 * (level as i32 + 1)),
                Some(SpecialIndentType::Hanging(360)),
                None,
                None,
            ),
        );
    }
    numbering
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleSettings;
    use mdocx_core::{parse, Dialect};

    fn render_bytes(source: &str, settings: &StyleSettings, dialect: &Dialect) -> Vec<u8> {
        let blocks = parse(source, dialect);
        let ctx = RenderContext::new(settings, dialect);
        match DocxRenderer.render(&blocks, &ctx) {
            Ok(RenderedDocument::Binary(bytes)) => bytes,
            other => panic!("expected binary output, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn renders_a_zip_package() {
        let settings = StyleSettings::default();
        let bytes = render_bytes(
            "# Title\n\nBody **bold** text.\n\n- item\n\n| a |\n| 1 |",
            &settings,
            &Dialect::general(),
        );
        // OOXML documents are zip archives.
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn header_and_page_numbers_do_not_break_packing() {
        let settings = StyleSettings {
            header_text: Some("Quarterly Report".to_string()),
            page_numbers: true,
            ..StyleSettings::default()
        };
        let bytes = render_bytes("# Report\n\nparagraph", &settings, &Dialect::office());
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn heading_ladders_differ_by_profile() {
        assert_eq!(heading_half_points("general", 1), 64);
        assert_eq!(heading_half_points("academic", 1), 44);
        assert_eq!(heading_half_points("developer", 1), 48);
        assert_eq!(heading_half_points("office", 6), 22);
        // Unknown profiles fall back to the general ladder.
        assert_eq!(heading_half_points("custom", 2), 52);
    }

    #[test]
    fn half_point_conversion_rounds() {
        assert_eq!(half_points(12.0), 24);
        assert_eq!(half_points(10.5), 21);
        assert_eq!(half_points(11.0), 22);
    }

    #[test]
    fn latin_font_setting_packs_cleanly() {
        let settings = StyleSettings::template("academic").unwrap();
        let bytes = render_bytes("Body text with $x$ math", &settings, &Dialect::academic());
        assert_eq!(&bytes[..2], b"PK");
    }
}
