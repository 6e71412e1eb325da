//! Document model and Markdown parsing core for mdocx
//!
//!     This crate is the foundation the rest of the toolchain builds on. It owns the
//!     flat document model (blocks and styled runs), the line-oriented Markdown block
//!     parser, and the inline run tokenizer. It performs no I/O and knows nothing about
//!     output formats; renderers live in mdocx-render and consume the values produced
//!     here.
//!
//! Architecture
//!
//!     Parsing is split into two independent passes:
//!
//!     - The block parser walks the source line by line and classifies each line into
//!       a flat, ordered sequence of [`BlockElement`] values. Code fences and tables
//!       span multiple lines, so the parser carries a small amount of state between
//!       lines; everything else is decided from the line alone.
//!     - The inline tokenizer takes one line of text and splits it into styled runs
//!       (bold, italic, strikethrough, inline code, inline math). Runs are the atomic
//!       unit a renderer turns into rich text.
//!
//!     Both passes are total: no input makes them fail or panic. Malformed markup
//!     degrades into plain paragraphs or literal marker characters instead of errors.
//!
//! Dialects
//!
//!     The toolchain ships several editor profiles (general, academic, developer,
//!     office) that enable slightly different feature sets - which inline markers are
//!     live, whether list indentation is tracked, whether a fence's language tag is
//!     kept. Those differences are captured by the [`Dialect`] value threaded through
//!     both passes rather than by separate parser implementations.
//!
//!     The file structure:
//!     .
//!     ├── block.rs        # BlockElement + the line classifier state machine
//!     ├── inline.rs       # RunStyle / StyledRun + the run tokenizer
//!     ├── dialect.rs      # Dialect capability presets
//!     └── lib.rs

pub mod block;
pub mod dialect;
pub mod inline;

pub use block::{parse, BlockElement};
pub use dialect::{Dialect, MarkerSet};
pub use inline::{tokenize, RunStyle, StyledRun};
