//! Inline span scanning: bold (`**...**`) and inline code (`` `...` ``).

use std::sync::LazyLock;

use regex::Regex;

use crate::document::Inline;

/// Earliest bold or code pair. Bold is the first alternative, so it wins when
/// both could start at the same offset.
static SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^*]+?)\*\*|`([^`]+?)`").expect("valid regex")
});

/// Split one line into plain-text runs and marked spans.
///
/// Unterminated delimiters stay in the surrounding text. The texts of the
/// returned spans, concatenated with their delimiters restored, reproduce
/// `line` exactly. An empty line yields an empty vector.
pub fn scan_inline(line: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in SPAN_RE.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };

        if whole.start() > cursor {
            spans.push(Inline::text(&line[cursor..whole.start()]));
        }

        if let Some(bold) = caps.get(1) {
            spans.push(Inline::bold(bold.as_str()));
        } else if let Some(code) = caps.get(2) {
            spans.push(Inline::code(code.as_str()));
        }

        cursor = whole.end();
    }

    if cursor < line.len() {
        spans.push(Inline::text(&line[cursor..]));
    }

    spans
}
