//! Semantic document tree produced by the converter.
//!
//! Block and inline variants are closed enums so every consumer (the JSON
//! dump, the tracker wire serializer) must match them exhaustively.

use serde::Serialize;
use serde::ser::SerializeStruct;

/// Current version tag written on every [`Document`].
pub const DOCUMENT_VERSION: u32 = 1;

/// Code block language used when the opening fence names none.
pub const PLAIN_LANGUAGE: &str = "plain";

/// Lowest heading level the tree carries.
pub const MIN_HEADING_LEVEL: u8 = 2;

/// Highest heading level the tree carries.
pub const MAX_HEADING_LEVEL: u8 = 6;

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Root of a converted document: an ordered sequence of blocks.
///
/// Serializes as `{ "kind": "doc", "version": 1, "blocks": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    version: u32,
    blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            blocks,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Blocks in input order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}

impl Serialize for Document {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Document", 3)?;
        state.serialize_field("kind", "doc")?;
        state.serialize_field("version", &self.version)?;
        state.serialize_field("blocks", &self.blocks)?;
        state.end()
    }
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// A structural element occupying its own visual block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Paragraph {
        content: Vec<Inline>,
    },
    /// Heading text is plain; it is never scanned for marks.
    Heading {
        level: u8,
        text: String,
    },
    /// Raw code, line breaks and whitespace preserved exactly.
    CodeBlock {
        language: String,
        text: String,
    },
    BulletList {
        items: Vec<ListItem>,
    },
    OrderedList {
        items: Vec<ListItem>,
    },
    Rule,
}

impl Block {
    /// Build a heading, clamping `level` into the supported range.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::Heading {
            level: level.clamp(MIN_HEADING_LEVEL, MAX_HEADING_LEVEL),
            text: text.into(),
        }
    }

    /// Build a code block; an empty language falls back to [`PLAIN_LANGUAGE`].
    pub fn code_block(language: &str, text: impl Into<String>) -> Self {
        let language = if language.is_empty() {
            PLAIN_LANGUAGE
        } else {
            language
        };
        Self::CodeBlock {
            language: language.to_string(),
            text: text.into(),
        }
    }

    pub fn paragraph(content: Vec<Inline>) -> Self {
        Self::Paragraph { content }
    }
}

/// One entry of a bullet or ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub content: Vec<Inline>,
}

// ---------------------------------------------------------------------------
// Inlines
// ---------------------------------------------------------------------------

/// A text span embedded within a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String },
    /// Text carrying exactly one mark. Marks never nest or combine.
    Marked { mark: Mark, text: String },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::Marked {
            mark: Mark::Bold,
            text: text.into(),
        }
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self::Marked {
            mark: Mark::Code,
            text: text.into(),
        }
    }
}

/// Character-level formatting attached to an inline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Bold,
    Code,
}
