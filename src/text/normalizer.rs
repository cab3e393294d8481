// Text normalizer for PDF page text
use regex::Regex;
use std::sync::LazyLock;

/// Anything outside printable ASCII, including tabs and newlines
static NON_PRINTABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x20-\x7E]+").expect("valid regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// A hyphen left behind by a line-break word split
static HYPHEN_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\s+").expect("valid regex"));

/// Clean raw extracted text.
///
/// Non-printable and non-ASCII runs become a single space, whitespace runs
/// collapse to one space, line-break hyphenation is joined
/// (`"employ- ment"` -> `"employment"`) and the result is trimmed.
/// Never fails; empty input gives empty output.
pub fn clean_text(raw: &str) -> String {
    let printable = NON_PRINTABLE.replace_all(raw, " ");
    let collapsed = WHITESPACE_RUN.replace_all(&printable, " ");
    let joined = HYPHEN_BREAK.replace_all(&collapsed, "");
    joined.trim().to_string()
}

/// Truncate to at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
