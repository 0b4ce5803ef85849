//! Line-by-line document assembly.
//!
//! At most one multi-line buffer is open at a time. While a code block is
//! open every line goes into it until the closing fence; otherwise each line
//! is classified and may flush the open list before emitting its own block.

use crate::accumulator::{CodeBuffer, ListBuffer};
use crate::blocks::{self, LineKind, ListKind};
use crate::document::{Block, Inline};
use crate::inline::scan_inline;

#[derive(Debug, Default)]
enum Open {
    #[default]
    Nothing,
    Code(CodeBuffer),
    List(ListBuffer),
}

/// Accumulates blocks in input order.
#[derive(Debug, Default)]
pub(crate) struct Assembler {
    blocks: Vec<Block>,
    open: Open,
}

impl Assembler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feed the next input line (without its line terminator).
    pub(crate) fn feed(&mut self, line: &str) {
        if let Open::Code(code) = &mut self.open {
            if blocks::is_closing_fence(line) {
                self.flush();
            } else {
                code.push(line);
            }
            return;
        }

        match blocks::classify(line) {
            LineKind::Fence { language } => {
                self.flush();
                self.open = Open::Code(CodeBuffer::new(language));
            }
            LineKind::Heading { level, text } => {
                self.flush();
                self.blocks.push(Block::heading(level, text));
            }
            LineKind::ListItem { kind, rest } => {
                self.push_item(kind, scan_inline(rest));
            }
            LineKind::Rule => {
                self.flush();
                self.blocks.push(Block::Rule);
            }
            LineKind::Blank => self.flush(),
            LineKind::Text => {
                self.flush();
                self.blocks.push(Block::paragraph(scan_inline(line)));
            }
        }
    }

    /// Flush whatever is still open and return the blocks.
    pub(crate) fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }

    fn push_item(&mut self, kind: ListKind, content: Vec<Inline>) {
        match &mut self.open {
            Open::List(list) if list.kind() == kind => list.push(content),
            _ => {
                self.flush();
                let mut list = ListBuffer::new(kind);
                list.push(content);
                self.open = Open::List(list);
            }
        }
    }

    fn flush(&mut self) {
        match std::mem::take(&mut self.open) {
            Open::Nothing => {}
            Open::Code(code) => self.blocks.push(code.into_block()),
            Open::List(list) => {
                if let Some(block) = list.into_block() {
                    self.blocks.push(block);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ListItem;

    fn assemble(lines: &[&str]) -> Vec<Block> {
        let mut asm = Assembler::new();
        for line in lines {
            asm.feed(line);
        }
        asm.finish()
    }

    fn item(text: &str) -> ListItem {
        ListItem {
            content: vec![Inline::text(text)],
        }
    }

    #[test]
    fn code_block_swallows_markers() {
        let blocks = assemble(&["```", "## not a heading", "- not an item", "---", "```"]);
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: "plain".into(),
                text: "## not a heading\n- not an item\n---".into()
            }]
        );
    }

    #[test]
    fn fence_with_language_inside_code_is_content() {
        let blocks = assemble(&["```md", "```rust", "```"]);
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: "md".into(),
                text: "```rust".into()
            }]
        );
    }

    #[test]
    fn fence_info_string_keeps_fences_paired() {
        let blocks = assemble(&["```js extra", "code", "```", "## Next"]);
        assert_eq!(
            blocks,
            vec![
                Block::CodeBlock {
                    language: "js".into(),
                    text: "code".into()
                },
                Block::heading(2, "Next"),
            ]
        );
    }

    #[test]
    fn fence_flushes_open_list() {
        let blocks = assemble(&["- a", "```sh", "ls", "```"]);
        assert_eq!(
            blocks,
            vec![
                Block::BulletList {
                    items: vec![item("a")]
                },
                Block::CodeBlock {
                    language: "sh".into(),
                    text: "ls".into()
                },
            ]
        );
    }

    #[test]
    fn heading_and_rule_flush_open_list() {
        let blocks = assemble(&["1. a", "## Next", "- b", "---"]);
        assert_eq!(
            blocks,
            vec![
                Block::OrderedList {
                    items: vec![item("a")]
                },
                Block::heading(2, "Next"),
                Block::BulletList {
                    items: vec![item("b")]
                },
                Block::Rule,
            ]
        );
    }

    #[test]
    fn list_kind_change_starts_new_list() {
        let blocks = assemble(&["- a", "- b", "1. c", "- d"]);
        assert_eq!(
            blocks,
            vec![
                Block::BulletList {
                    items: vec![item("a"), item("b")]
                },
                Block::OrderedList {
                    items: vec![item("c")]
                },
                Block::BulletList {
                    items: vec![item("d")]
                },
            ]
        );
    }

    #[test]
    fn blank_line_splits_lists_of_same_kind() {
        let blocks = assemble(&["- a", "", "- b"]);
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| matches!(b, Block::BulletList { .. })));
    }

    #[test]
    fn plain_line_ends_list() {
        let blocks = assemble(&["- a", "after"]);
        assert_eq!(
            blocks,
            vec![
                Block::BulletList {
                    items: vec![item("a")]
                },
                Block::paragraph(vec![Inline::text("after")]),
            ]
        );
    }

    #[test]
    fn blank_lines_alone_emit_nothing() {
        assert!(assemble(&["", "  ", "\t"]).is_empty());
    }

    #[test]
    fn open_list_flushes_at_end() {
        let blocks = assemble(&["1. only"]);
        assert_eq!(
            blocks,
            vec![Block::OrderedList {
                items: vec![item("only")]
            }]
        );
    }
}
