use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Markdown code fences (```` ``` ```` or ```` ```json ````) left behind when the
/// text went through a chat-style extractor.
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_-]*").expect("valid code fence regex"));

/// Removes markdown code-fence markers, leaving the fenced content in place.
pub fn strip_code_fences(text: &str) -> Cow<'_, str> {
    CODE_FENCE.replace_all(text, "")
}

/// Splits text into trimmed, non-blank lines in original order.
pub fn segment_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
