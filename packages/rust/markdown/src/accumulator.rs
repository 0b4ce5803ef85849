//! Buffers for multi-line constructs: lists and fenced code.

use crate::blocks::ListKind;
use crate::document::{Block, Inline, ListItem};

/// Consecutive list items of one kind.
#[derive(Debug)]
pub(crate) struct ListBuffer {
    kind: ListKind,
    items: Vec<ListItem>,
}

impl ListBuffer {
    pub(crate) fn new(kind: ListKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    pub(crate) fn kind(&self) -> ListKind {
        self.kind
    }

    pub(crate) fn push(&mut self, content: Vec<Inline>) {
        self.items.push(ListItem { content });
    }

    /// The list node, or `None` when nothing was buffered.
    pub(crate) fn into_block(self) -> Option<Block> {
        if self.items.is_empty() {
            return None;
        }
        Some(match self.kind {
            ListKind::Bullet => Block::BulletList { items: self.items },
            ListKind::Numbered => Block::OrderedList { items: self.items },
        })
    }
}

/// Raw lines between an opening fence and its closing fence.
#[derive(Debug)]
pub(crate) struct CodeBuffer {
    language: String,
    lines: Vec<String>,
}

impl CodeBuffer {
    pub(crate) fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
            lines: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    /// Lines are joined with `\n`; an empty buffer gives an empty code block.
    pub(crate) fn into_block(self) -> Block {
        Block::code_block(&self.language, self.lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_flushes_to_nothing() {
        assert_eq!(ListBuffer::new(ListKind::Bullet).into_block(), None);
        assert_eq!(ListBuffer::new(ListKind::Numbered).into_block(), None);
    }

    #[test]
    fn list_kind_selects_block_variant() {
        let mut bullets = ListBuffer::new(ListKind::Bullet);
        bullets.push(vec![Inline::text("a")]);
        assert!(matches!(
            bullets.into_block(),
            Some(Block::BulletList { items }) if items.len() == 1
        ));

        let mut numbered = ListBuffer::new(ListKind::Numbered);
        numbered.push(vec![Inline::text("a")]);
        numbered.push(vec![Inline::text("b")]);
        assert!(matches!(
            numbered.into_block(),
            Some(Block::OrderedList { items }) if items.len() == 2
        ));
    }

    #[test]
    fn code_lines_keep_whitespace() {
        let mut code = CodeBuffer::new("py");
        code.push("def f():");
        code.push("    return 1  ");
        code.push("");
        assert_eq!(
            code.into_block(),
            Block::CodeBlock {
                language: "py".into(),
                text: "def f():\n    return 1  \n".into()
            }
        );
    }

    #[test]
    fn unnamed_code_is_plain() {
        assert_eq!(
            CodeBuffer::new("").into_block(),
            Block::CodeBlock {
                language: "plain".into(),
                text: String::new()
            }
        );
    }
}
