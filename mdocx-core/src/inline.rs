//! Inline run tokenization
//!
//! [`tokenize`] splits one line of text into styled runs. The scan is greedy
//! and left to right: at each position the enabled markers are tried in a
//! fixed priority order (bold before italic before strikethrough before code
//! before math), and a marker only matches when it opens exactly at the
//! cursor and its closing counterpart occurs later in the line. Text between
//! markers becomes plain runs.
//!
//! Nesting is intentionally not supported: the inner text of a matched span
//! is taken literally. A marker that never finds its closing counterpart is
//! emitted as literal text one character at a time, which keeps the scan
//! moving and leaves malformed markup visible instead of losing it.
//!
//! Concatenating the text of the returned runs reproduces the input with
//! well-formed marker pairs stripped exactly once and everything else intact.

use crate::dialect::{Dialect, MarkerSet};
use serde::Serialize;

/// Style state attached to a run of text.
///
/// Sizes are plain points. Output-format units (half-points, twips) are a
/// renderer concern and never appear here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStyle {
    pub font: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub strike: bool,
    pub color: Option<String>,
}

impl RunStyle {
    /// A plain style with the given font family and point size.
    pub fn plain(font: impl Into<String>, size: f32) -> Self {
        RunStyle {
            font: font.into(),
            size,
            bold: false,
            italic: false,
            strike: false,
            color: None,
        }
    }
}

/// A contiguous text fragment tagged with one formatting state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledRun {
    pub text: String,
    pub style: RunStyle,
}

/// Split one line into styled runs against a base style.
///
/// Total and deterministic; the result is never empty (an empty input yields
/// a single empty plain run).
pub fn tokenize(line: &str, base: &RunStyle, dialect: &Dialect) -> Vec<StyledRun> {
    let markers = &dialect.markers;
    let mut runs = Vec::new();
    let mut remaining = line;

    while !remaining.is_empty() {
        if let Some((run, consumed)) = match_marker(remaining, base, dialect) {
            runs.push(run);
            remaining = &remaining[consumed..];
            continue;
        }

        match next_marker_pos(remaining, markers) {
            // No marker ahead: the rest of the line is one plain run.
            None => {
                runs.push(plain_run(remaining, base));
                break;
            }
            // A marker opens here but failed to match (no closing
            // counterpart): degrade it to a literal character.
            Some(0) => {
                let ch_len = remaining
                    .chars()
                    .next()
                    .map(char::len_utf8)
                    .unwrap_or(remaining.len());
                runs.push(plain_run(&remaining[..ch_len], base));
                remaining = &remaining[ch_len..];
            }
            // Plain text up to the next marker candidate.
            Some(pos) => {
                runs.push(plain_run(&remaining[..pos], base));
                remaining = &remaining[pos..];
            }
        }
    }

    if runs.is_empty() {
        runs.push(plain_run(line, base));
    }
    runs
}

fn plain_run(text: &str, base: &RunStyle) -> StyledRun {
    StyledRun {
        text: text.to_string(),
        style: base.clone(),
    }
}

/// Try the enabled markers, in priority order, at the start of `remaining`.
/// On success returns the produced run and the number of bytes consumed
/// (markers included).
fn match_marker(remaining: &str, base: &RunStyle, dialect: &Dialect) -> Option<(StyledRun, usize)> {
    let markers = &dialect.markers;

    if markers.bold {
        if let Some((inner, consumed)) = match_span(remaining, "**", "**") {
            let mut style = base.clone();
            style.bold = true;
            return Some((styled(inner, style), consumed));
        }
    }
    if markers.italic {
        if let Some((inner, consumed)) = match_span(remaining, "*", "*") {
            let mut style = base.clone();
            style.italic = true;
            return Some((styled(inner, style), consumed));
        }
    }
    if markers.strike {
        if let Some((inner, consumed)) = match_span(remaining, "~~", "~~") {
            let mut style = base.clone();
            style.strike = true;
            return Some((styled(inner, style), consumed));
        }
    }
    if markers.code {
        if let Some((inner, consumed)) = match_span(remaining, "`", "`") {
            let mut style = base.clone();
            style.font = dialect.code_font.clone();
            return Some((styled(inner, style), consumed));
        }
    }
    if markers.math {
        if let Some((inner, consumed)) = match_span(remaining, "$", "$") {
            let mut style = base.clone();
            if let Some(font) = &dialect.math_font {
                style.font = font.clone();
            }
            style.italic = true;
            return Some((styled(inner, style), consumed));
        }
    }
    None
}

fn styled(text: &str, style: RunStyle) -> StyledRun {
    StyledRun {
        text: text.to_string(),
        style,
    }
}

/// Match `open` at position 0 with a non-empty inner text and `close` later
/// in the string. Returns the inner text and the total matched length.
fn match_span<'a>(s: &'a str, open: &str, close: &str) -> Option<(&'a str, usize)> {
    let rest = s.strip_prefix(open)?;
    let close_at = match rest.find(close) {
        // The inner text must be non-empty; a closer at position 0 may still
        // serve as the first inner character (e.g. `*` inside `*…*`).
        Some(0) => rest[1..].find(close).map(|i| i + 1)?,
        Some(i) => i,
        None => return None,
    };
    let inner = &rest[..close_at];
    Some((inner, open.len() + close_at + close.len()))
}

/// Byte position of the nearest enabled marker candidate, if any. Single `~`
/// is not a candidate (only the `~~` pair is), matching the scan the editors
/// perform.
fn next_marker_pos(s: &str, markers: &MarkerSet) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut consider = |p: Option<usize>| {
        if let Some(p) = p {
            best = Some(best.map_or(p, |b| b.min(p)));
        }
    };
    if markers.bold || markers.italic {
        consider(s.find('*'));
    }
    if markers.strike {
        consider(s.find("~~"));
    }
    if markers.code {
        consider(s.find('`'));
    }
    if markers.math {
        consider(s.find('$'));
    }
    best
}
