//! Wire serializer for the tracker's rich-text document format.
//!
//! Renders a [`Document`] into the JSON node tree the tracker API expects
//! (`type`, `content`, `attrs`, `marks`). Empty text runs are dropped because
//! the API rejects text nodes with no characters.

use serde_json::{Value, json};

use ticketdoc_markdown::{Block, Document, Inline, ListItem, Mark};

/// Render a whole document.
pub fn to_adf(doc: &Document) -> Value {
    json!({
        "type": "doc",
        "version": doc.version(),
        "content": doc.blocks().iter().map(block_to_adf).collect::<Vec<_>>(),
    })
}

fn block_to_adf(block: &Block) -> Value {
    match block {
        Block::Paragraph { content } => paragraph(content),
        Block::Heading { level, text } => json!({
            "type": "heading",
            "attrs": { "level": level },
            "content": text_node(text, None).into_iter().collect::<Vec<_>>(),
        }),
        Block::CodeBlock { language, text } => json!({
            "type": "codeBlock",
            "attrs": { "language": language },
            "content": text_node(text, None).into_iter().collect::<Vec<_>>(),
        }),
        Block::BulletList { items } => list("bulletList", items),
        Block::OrderedList { items } => list("orderedList", items),
        Block::Rule => json!({ "type": "rule" }),
    }
}

fn paragraph(spans: &[Inline]) -> Value {
    json!({
        "type": "paragraph",
        "content": spans.iter().filter_map(inline_to_adf).collect::<Vec<_>>(),
    })
}

fn list(kind: &str, items: &[ListItem]) -> Value {
    let items: Vec<Value> = items
        .iter()
        .map(|item| {
            json!({
                "type": "listItem",
                "content": [paragraph(&item.content)],
            })
        })
        .collect();

    json!({ "type": kind, "content": items })
}

fn inline_to_adf(span: &Inline) -> Option<Value> {
    match span {
        Inline::Text { text } => text_node(text, None),
        Inline::Marked { mark, text } => text_node(text, Some(*mark)),
    }
}

fn text_node(text: &str, mark: Option<Mark>) -> Option<Value> {
    if text.is_empty() {
        return None;
    }

    let mut node = json!({ "type": "text", "text": text });
    if let Some(mark) = mark {
        node["marks"] = json!([{ "type": mark_type(mark) }]);
    }
    Some(node)
}

fn mark_type(mark: Mark) -> &'static str {
    match mark {
        Mark::Bold => "strong",
        Mark::Code => "code",
    }
}
