//! Optional pre-parse pass removing backslash escapes.
//!
//! Upstream writers sometimes escape markdown punctuation (`\*`, `` \` ``,
//! `\#`, ...) even though this dialect has no escape syntax. With the pass
//! enabled the backslash is dropped and the character is parsed normally.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static ESCAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\([*`_#|\[\]()])").expect("valid regex"));

/// Replace `\X` with `X` for every escapable punctuation character `X`.
pub fn unescape(md: &str) -> Cow<'_, str> {
    ESCAPE_RE.replace_all(md, "$1")
}
