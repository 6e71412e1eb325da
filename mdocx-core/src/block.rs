//! Line-oriented block parsing
//!
//! [`parse`] turns raw Markdown text into a flat, ordered sequence of
//! [`BlockElement`] values. The pass is a single forward walk over the source
//! lines driven by a three-state machine: outside of any multi-line construct
//! each line is classified on its own; an open code fence or table carries
//! state to the following lines.
//!
//! The parser is total. There is no error path: anything that does not match a
//! recognized construct becomes a paragraph, and truncated constructs degrade
//! (an unterminated table is flushed at end of input, an unterminated fence
//! discards its accumulated lines - the latter is long-standing behavior that
//! downstream consumers rely on, so it is pinned by tests rather than changed).

use crate::dialect::Dialect;
use serde::Serialize;

/// One classified structural unit of parsed Markdown.
///
/// The sequence produced by [`parse`] preserves source order. A code block or
/// table spans several source lines but appears as a single element; blank
/// lines and table separator rows are never emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockElement {
    Heading {
        /// 1 through 6.
        level: u8,
        content: String,
    },
    Paragraph {
        content: String,
    },
    Bullet {
        content: String,
        /// Leading whitespace divided by two, floored; 0 when the dialect does
        /// not track indentation.
        indent: usize,
    },
    Numbered {
        content: String,
        indent: usize,
    },
    Quote {
        content: String,
    },
    Code {
        content: String,
        lang: Option<String>,
    },
    Table {
        /// First row is the header. Rows may be ragged but are never empty.
        rows: Vec<Vec<String>>,
    },
    Rule,
}

const FENCE: &str = "```";

enum State {
    Normal,
    InFence {
        lang: Option<String>,
        content: String,
    },
    InTable {
        rows: Vec<Vec<String>>,
    },
}

/// Parse Markdown source into an ordered block sequence.
///
/// Pure and deterministic; never fails. See the module docs for the
/// degradation rules applied to malformed input.
pub fn parse(source: &str, dialect: &Dialect) -> Vec<BlockElement> {
    let mut blocks = Vec::new();
    let mut state = State::Normal;

    for raw in source.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        state = step(state, line, dialect, &mut blocks);
    }

    match state {
        // An unterminated fence drops its accumulated content.
        State::InFence { .. } => {}
        State::InTable { rows } => {
            if !rows.is_empty() {
                blocks.push(BlockElement::Table { rows });
            }
        }
        State::Normal => {}
    }

    blocks
}

/// Advance the state machine by one line.
fn step(state: State, line: &str, dialect: &Dialect, blocks: &mut Vec<BlockElement>) -> State {
    match state {
        State::InFence { lang, mut content } => {
            if is_fence_marker(line) {
                if content.ends_with('\n') {
                    content.pop();
                }
                blocks.push(BlockElement::Code { content, lang });
                State::Normal
            } else {
                // Everything inside a fence is verbatim, even lines that
                // would otherwise open a table or heading.
                content.push_str(line);
                content.push('\n');
                State::InFence { lang, content }
            }
        }
        State::InTable { mut rows } => {
            if is_table_row(line) {
                if !is_separator_row(line) {
                    rows.push(split_table_row(line));
                }
                State::InTable { rows }
            } else {
                // The table ends on the first non-row line; that line is then
                // classified normally, it is not consumed here.
                if !rows.is_empty() {
                    blocks.push(BlockElement::Table { rows });
                }
                classify_line(line, dialect, blocks)
            }
        }
        State::Normal => classify_line(line, dialect, blocks),
    }
}

/// Classify a single line outside of any carry-over state, emitting at most
/// one block and returning the state the next line starts in.
fn classify_line(line: &str, dialect: &Dialect, blocks: &mut Vec<BlockElement>) -> State {
    if let Some(rest) = fence_opening(line) {
        let lang = if dialect.capture_lang && !rest.is_empty() {
            Some(rest.to_string())
        } else {
            None
        };
        return State::InFence {
            lang,
            content: String::new(),
        };
    }

    if is_table_row(line) {
        let mut rows = Vec::new();
        if !is_separator_row(line) {
            rows.push(split_table_row(line));
        }
        return State::InTable { rows };
    }

    if line.trim().is_empty() {
        return State::Normal;
    }

    if let Some((level, content)) = parse_heading(line) {
        blocks.push(BlockElement::Heading { level, content });
        return State::Normal;
    }

    if is_horizontal_rule(line) {
        blocks.push(BlockElement::Rule);
        return State::Normal;
    }

    if let Some(rest) = line.strip_prefix('>') {
        blocks.push(BlockElement::Quote {
            content: rest.trim_start().to_string(),
        });
        return State::Normal;
    }

    if let Some((content, indent)) = parse_bullet(line, dialect) {
        blocks.push(BlockElement::Bullet { content, indent });
        return State::Normal;
    }

    if let Some((content, indent)) = parse_numbered(line, dialect) {
        blocks.push(BlockElement::Numbered { content, indent });
        return State::Normal;
    }

    blocks.push(BlockElement::Paragraph {
        content: line.to_string(),
    });
    State::Normal
}

/// A fence marker is a line whose trimmed content starts with three backticks.
fn is_fence_marker(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

/// For an opening fence, the trailing text on the marker line (trimmed) is the
/// language tag.
fn fence_opening(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix(FENCE).map(str::trim)
}

/// A candidate table row: trimmed line starting with a pipe.
fn is_table_row(line: &str) -> bool {
    line.trim().starts_with('|')
}

/// Separator rows (`| --- | :--: |` and friends) delimit the header from the
/// body. They consist of nothing but dashes, colons, pipes and whitespace, and
/// are dropped wherever they appear in a table.
fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c == '-' || c == ':' || c == '|' || c.is_whitespace())
}

/// Split a table row on pipes: empty leading/trailing cells (from the edge
/// pipes) are discarded, interior cells are kept trimmed.
fn split_table_row(line: &str) -> Vec<String> {
    let mut cells: Vec<&str> = line.split('|').collect();
    while cells.first().is_some_and(|c| c.trim().is_empty()) {
        cells.remove(0);
    }
    while cells.last().is_some_and(|c| c.trim().is_empty()) {
        cells.pop();
    }
    cells.into_iter().map(|c| c.trim().to_string()).collect()
}

/// One to six `#` characters, then at least one whitespace character, then
/// non-empty text.
fn parse_heading(line: &str) -> Option<(u8, String)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let content = rest.trim_start();
    if content.is_empty() {
        return None;
    }
    Some((hashes as u8, content.to_string()))
}

/// Three or more characters drawn from `-`, `*`, `_` and nothing else.
fn is_horizontal_rule(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| matches!(c, '-' | '*' | '_'))
}

/// Leading whitespace, a `-`/`*`/`+` marker, then at least one whitespace
/// character. The content is everything after the marker's whitespace.
fn parse_bullet(line: &str, dialect: &Dialect) -> Option<(String, usize)> {
    let trimmed = line.trim_start();
    let rest = trimmed.strip_prefix(['-', '*', '+'])?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((rest.trim_start().to_string(), indent_depth(line, trimmed, dialect)))
}

/// Leading whitespace, one or more digits, a dot, then at least one whitespace
/// character.
fn parse_numbered(line: &str, dialect: &Dialect) -> Option<(String, usize)> {
    let trimmed = line.trim_start();
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = trimmed[digits..].strip_prefix('.')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((rest.trim_start().to_string(), indent_depth(line, trimmed, dialect)))
}

fn indent_depth(line: &str, trimmed: &str, dialect: &Dialect) -> usize {
    if !dialect.track_indent {
        return 0;
    }
    let leading = line.chars().count() - trimmed.chars().count();
    leading / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_general(source: &str) -> Vec<BlockElement> {
        parse(source, &Dialect::general())
    }

    #[test]
    fn heading_then_paragraph() {
        let blocks = parse_general("## Title\n\nHello **world**");
        assert_eq!(
            blocks,
            vec![
                BlockElement::Heading {
                    level: 2,
                    content: "Title".to_string()
                },
                BlockElement::Paragraph {
                    content: "Hello **world**".to_string()
                },
            ]
        );
    }

    #[test]
    fn heading_levels_cap_at_six() {
        let blocks = parse_general("###### deep\n####### too deep");
        assert_eq!(
            blocks,
            vec![
                BlockElement::Heading {
                    level: 6,
                    content: "deep".to_string()
                },
                BlockElement::Paragraph {
                    content: "####### too deep".to_string()
                },
            ]
        );
    }

    #[test]
    fn hash_without_space_is_a_paragraph() {
        let blocks = parse_general("#nospace");
        assert_eq!(
            blocks,
            vec![BlockElement::Paragraph {
                content: "#nospace".to_string()
            }]
        );
    }

    #[test]
    fn blank_lines_emit_nothing() {
        assert!(parse_general("\n   \n\t\n").is_empty());
    }

    #[test]
    fn horizontal_rules() {
        assert_eq!(parse_general("---"), vec![BlockElement::Rule]);
        assert_eq!(parse_general("*****"), vec![BlockElement::Rule]);
        assert_eq!(parse_general("-_-"), vec![BlockElement::Rule]);
        // Too short, or carrying other characters: plain paragraphs.
        assert_eq!(
            parse_general("--"),
            vec![BlockElement::Paragraph {
                content: "--".to_string()
            }]
        );
        assert_eq!(
            parse_general("--- x"),
            vec![BlockElement::Paragraph {
                content: "--- x".to_string()
            }]
        );
    }

    #[test]
    fn quote_strips_one_marker_and_whitespace() {
        assert_eq!(
            parse_general(">   quoted text"),
            vec![BlockElement::Quote {
                content: "quoted text".to_string()
            }]
        );
        // Only the first marker is stripped.
        assert_eq!(
            parse_general(">> nested"),
            vec![BlockElement::Quote {
                content: "> nested".to_string()
            }]
        );
    }

    #[test]
    fn bullet_indent_is_halved_and_floored() {
        let blocks = parse_general("- item one\n  - item two\n   - item three");
        assert_eq!(
            blocks,
            vec![
                BlockElement::Bullet {
                    content: "item one".to_string(),
                    indent: 0
                },
                BlockElement::Bullet {
                    content: "item two".to_string(),
                    indent: 1
                },
                BlockElement::Bullet {
                    content: "item three".to_string(),
                    indent: 1
                },
            ]
        );
    }

    #[test]
    fn indent_is_flat_when_not_tracked() {
        let blocks = parse("- a\n    - b", &Dialect::office());
        assert_eq!(
            blocks,
            vec![
                BlockElement::Bullet {
                    content: "a".to_string(),
                    indent: 0
                },
                BlockElement::Bullet {
                    content: "b".to_string(),
                    indent: 0
                },
            ]
        );
    }

    #[test]
    fn star_without_space_is_not_a_bullet() {
        assert_eq!(
            parse_general("*emphasis* only"),
            vec![BlockElement::Paragraph {
                content: "*emphasis* only".to_string()
            }]
        );
    }

    #[test]
    fn numbered_items() {
        let blocks = parse_general("1. first\n12. twelfth\n  3. indented");
        assert_eq!(
            blocks,
            vec![
                BlockElement::Numbered {
                    content: "first".to_string(),
                    indent: 0
                },
                BlockElement::Numbered {
                    content: "twelfth".to_string(),
                    indent: 0
                },
                BlockElement::Numbered {
                    content: "indented".to_string(),
                    indent: 1
                },
            ]
        );
    }

    #[test]
    fn fenced_code_with_language() {
        let blocks = parse_general("```js\nlet x = 1;\n\nlet y = 2;\n```");
        assert_eq!(
            blocks,
            vec![BlockElement::Code {
                content: "let x = 1;\n\nlet y = 2;".to_string(),
                lang: Some("js".to_string()),
            }]
        );
    }

    #[test]
    fn fence_language_dropped_when_not_captured() {
        let blocks = parse("```js\ncode\n```", &Dialect::office());
        assert_eq!(
            blocks,
            vec![BlockElement::Code {
                content: "code".to_string(),
                lang: None,
            }]
        );
    }

    #[test]
    fn fence_swallows_heading_and_table_lines() {
        let blocks = parse_general("```\n# not a heading\n| not | a | table |\n```");
        assert_eq!(
            blocks,
            vec![BlockElement::Code {
                content: "# not a heading\n| not | a | table |".to_string(),
                lang: None,
            }]
        );
    }

    #[test]
    fn unterminated_fence_drops_its_content() {
        // Documented degradation: content accumulated into an open fence is
        // discarded at end of input.
        assert!(parse_general("```js\ncode here").is_empty());
        let blocks = parse_general("before\n```\nlost");
        assert_eq!(
            blocks,
            vec![BlockElement::Paragraph {
                content: "before".to_string()
            }]
        );
    }

    #[test]
    fn empty_fenced_block() {
        let blocks = parse_general("```\n```");
        assert_eq!(
            blocks,
            vec![BlockElement::Code {
                content: String::new(),
                lang: None,
            }]
        );
    }

    #[test]
    fn table_with_separator_row() {
        let blocks = parse_general("| a | b |\n|---|---|\n| 1 | 2 |");
        assert_eq!(
            blocks,
            vec![BlockElement::Table {
                rows: vec![
                    vec!["a".to_string(), "b".to_string()],
                    vec!["1".to_string(), "2".to_string()],
                ],
            }]
        );
    }

    #[test]
    fn separator_rows_dropped_mid_table() {
        let blocks = parse_general("| a |\n| 1 |\n|---|\n| 2 |");
        assert_eq!(
            blocks,
            vec![BlockElement::Table {
                rows: vec![
                    vec!["a".to_string()],
                    vec!["1".to_string()],
                    vec!["2".to_string()],
                ],
            }]
        );
    }

    #[test]
    fn all_separator_table_emits_nothing() {
        assert!(parse_general("|---|---|\n|:--|--:|").is_empty());
    }

    #[test]
    fn table_flushes_at_end_of_input() {
        let blocks = parse_general("| a | b |\n| 1 | 2 |");
        assert_eq!(
            blocks,
            vec![BlockElement::Table {
                rows: vec![
                    vec!["a".to_string(), "b".to_string()],
                    vec!["1".to_string(), "2".to_string()],
                ],
            }]
        );
    }

    #[test]
    fn table_ends_on_non_row_line_which_is_reclassified() {
        let blocks = parse_general("| a |\n| 1 |\n# After");
        assert_eq!(
            blocks,
            vec![
                BlockElement::Table {
                    rows: vec![vec!["a".to_string()], vec!["1".to_string()]],
                },
                BlockElement::Heading {
                    level: 1,
                    content: "After".to_string()
                },
            ]
        );
    }

    #[test]
    fn ragged_table_rows_are_kept() {
        let blocks = parse_general("| a | b | c |\n| 1 |");
        assert_eq!(
            blocks,
            vec![BlockElement::Table {
                rows: vec![
                    vec!["a".to_string(), "b".to_string(), "c".to_string()],
                    vec!["1".to_string()],
                ],
            }]
        );
    }

    #[test]
    fn table_interior_empty_cells_are_kept() {
        let blocks = parse_general("| a |  | c |");
        assert_eq!(
            blocks,
            vec![BlockElement::Table {
                rows: vec![vec!["a".to_string(), String::new(), "c".to_string()]],
            }]
        );
    }

    #[test]
    fn crlf_input_parses_like_lf() {
        let blocks = parse_general("# Title\r\nbody\r\n");
        assert_eq!(
            blocks,
            vec![
                BlockElement::Heading {
                    level: 1,
                    content: "Title".to_string()
                },
                BlockElement::Paragraph {
                    content: "body".to_string()
                },
            ]
        );
    }

    #[test]
    fn classification_is_idempotent_for_simple_blocks() {
        // Re-parsing the emitted content of a non-aggregate block on its own
        // yields the same block type again (the content carries no markers).
        for source in ["plain paragraph", "> quoted", "- item", "3. item"] {
            let first = parse_general(source);
            assert_eq!(first.len(), 1);
            let content = match &first[0] {
                BlockElement::Paragraph { content }
                | BlockElement::Quote { content }
                | BlockElement::Bullet { content, .. }
                | BlockElement::Numbered { content, .. } => content.clone(),
                other => panic!("unexpected block {other:?}"),
            };
            let again = parse_general(&content);
            assert_eq!(again.len(), 1);
            assert!(matches!(again[0], BlockElement::Paragraph { .. }));
        }
    }

    #[test]
    fn source_order_is_preserved_across_aggregates() {
        let blocks = parse_general("| t |\n| 1 |\n```\ncode\n```\npara");
        assert_eq!(
            blocks,
            vec![
                BlockElement::Table {
                    rows: vec![vec!["t".to_string()], vec!["1".to_string()]],
                },
                BlockElement::Code {
                    content: "code".to_string(),
                    lang: None,
                },
                BlockElement::Paragraph {
                    content: "para".to_string()
                },
            ]
        );
    }
}
