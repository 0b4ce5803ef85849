//! Markdown-to-document-tree conversion.
//!
//! Converts the restricted Markdown dialect produced upstream (assistant
//! replies, investigation reports, raw human messages) into a [`Document`]:
//! headings, paragraphs with bold/code marks, bullet and numbered lists,
//! fenced code blocks and horizontal rules.
//!
//! Conversion is a single synchronous pass over the input lines. It performs
//! no I/O and never fails; malformed constructs degrade to literal text.

mod accumulator;
mod assembler;
pub mod blocks;
pub mod document;
pub mod inline;
mod unescape;

use tracing::{debug, instrument};

use ticketdoc_shared::ConverterConfig;

pub use document::{
    Block, DOCUMENT_VERSION, Document, Inline, ListItem, Mark, PLAIN_LANGUAGE,
};
pub use inline::scan_inline;
pub use unescape::unescape;

use crate::assembler::Assembler;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Options for markdown conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Strip backslash escapes before parsing.
    pub unescape: bool,
}

impl From<&ConverterConfig> for ConvertOptions {
    fn from(config: &ConverterConfig) -> Self {
        Self {
            unescape: config.unescape,
        }
    }
}

// ---------------------------------------------------------------------------
// Converter
// ---------------------------------------------------------------------------

/// Convert markdown with default options.
pub fn parse(markdown: &str) -> Document {
    convert(markdown, &ConvertOptions::default())
}

/// Convert markdown into a [`Document`].
///
/// Accepts `\n` and `\r\n` line endings. The empty string yields an empty
/// document.
#[instrument(skip_all, fields(input_len = markdown.len(), unescape = opts.unescape))]
pub fn convert(markdown: &str, opts: &ConvertOptions) -> Document {
    let source = if opts.unescape {
        unescape(markdown)
    } else {
        std::borrow::Cow::Borrowed(markdown)
    };

    let mut assembler = Assembler::new();
    for line in source.lines() {
        assembler.feed(line);
    }
    let blocks = assembler.finish();

    debug!(blocks = blocks.len(), "conversion complete");

    Document::new(blocks)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
