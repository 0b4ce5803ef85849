//! Line classification.
//!
//! Each input line is one of a small set of constructs. Patterns are checked
//! in priority order and the first match wins; the caller decides what a
//! construct means given the buffer it currently has open.

use std::sync::LazyLock;

use regex::Regex;

/// Kind of list a list-item line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Numbered,
}

/// What a single line (outside a code block) starts or is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Opening fence; `language` is the first word of the info string, empty
    /// when none was given.
    Fence { language: &'a str },
    /// `## text` or `### text`; `text` is already trimmed.
    Heading { level: u8, text: &'a str },
    /// `- rest` or `12. rest`; `rest` is the unscanned remainder.
    ListItem { kind: ListKind, rest: &'a str },
    Rule,
    Blank,
    Text,
}

// Exactly three backticks; the rest of the line is an info string.
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```([^`]*)$").expect("valid regex"));

static CLOSING_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```\s*$").expect("valid regex"));

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{2,3}) (.*)$").expect("valid regex"));

static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\. (.*)$").expect("valid regex"));

static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-{3,}\s*$").expect("valid regex"));

/// Classify a line that is not inside a code block.
pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(caps) = FENCE_RE.captures(line) {
        let info = caps.get(1).map_or("", |m| m.as_str());
        let language = info.split_whitespace().next().unwrap_or("");
        return LineKind::Fence { language };
    }

    if let Some(caps) = HEADING_RE.captures(line) {
        let level = caps[1].len() as u8;
        let text = caps.get(2).map_or("", |m| m.as_str().trim());
        return LineKind::Heading { level, text };
    }

    if let Some(rest) = line.strip_prefix("- ") {
        return LineKind::ListItem {
            kind: ListKind::Bullet,
            rest,
        };
    }

    if let Some(caps) = NUMBERED_RE.captures(line) {
        let rest = caps.get(1).map_or("", |m| m.as_str());
        return LineKind::ListItem {
            kind: ListKind::Numbered,
            rest,
        };
    }

    if RULE_RE.is_match(line) {
        return LineKind::Rule;
    }

    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    LineKind::Text
}

/// Whether `line` closes an open code block.
pub fn is_closing_fence(line: &str) -> bool {
    CLOSING_FENCE_RE.is_match(line)
}
