//! Normalisers for the free-text profile fields.

use std::sync::LazyLock;

use regex::Regex;

/// Glyphs authors use as list bullets.
pub const BULLET_GLYPHS: &[char] = &['•', '-', '*', '·'];

/// Skill separators: newlines, commas, round bullets anywhere, and `-`/`*`
/// runs standing alone between whitespace.
static SKILL_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n,•·]|\s[-*]+\s").expect("valid skill separator regex"));

static SKILLS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^skills\s*:").expect("valid skills label regex"));

/// Trims and collapses every whitespace run to a single space.
pub fn clean_paragraph(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turns a skills span written with bullets, newlines or commas into a single
/// `a, b, c` line. Applying it to its own output changes nothing.
pub fn clean_skills(text: &str) -> String {
    SKILL_SEPARATOR
        .split(text)
        .map(clean_skill_item)
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn clean_skill_item(raw: &str) -> String {
    let mut item = raw;
    loop {
        let trimmed = item.trim_matches(|c: char| c.is_whitespace() || BULLET_GLYPHS.contains(&c));
        let unlabelled = match SKILLS_LABEL.find(trimmed) {
            Some(label) => &trimmed[label.end()..],
            None => trimmed,
        };
        if unlabelled == item {
            break;
        }
        item = unlabelled;
    }
    clean_paragraph(item)
}

/// Strips one leading bullet glyph run and the whitespace after it.
pub fn strip_bullet(line: &str) -> &str {
    line.trim_start()
        .trim_start_matches(BULLET_GLYPHS)
        .trim_start()
}
