use regex::Regex;
use std::sync::OnceLock;

/// Marker that turns a note's first line into a tag annotation line.
pub const TAG_LINE_MARKER: &str = "//";

fn tag_token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\+\w+").expect("tag token pattern is a valid regex"))
}

/// Extract tag tokens from a note's first line.
///
/// Only a line starting with `//` is treated as an annotation line; every
/// `+word` run in it becomes one token (marker stripped), left to right.
/// Anything else yields no tags. Duplicates are kept in source order.
pub fn decode_tags(line: &str) -> Vec<String> {
    if !line.starts_with(TAG_LINE_MARKER) {
        return Vec::new();
    }
    tag_token_pattern()
        .find_iter(line)
        .map(|m| m.as_str()[1..].to_string())
        .collect()
}

/// Serialize a free-text tag phrase back into the first-line convention.
///
/// Each whitespace-separated word gets a `+` prefix exactly once, so words
/// the user already prefixed are not doubled. An empty or all-whitespace
/// phrase yields `None` and the caller omits the line entirely.
pub fn encode_tag_line(phrase: &str) -> Option<String> {
    let words: Vec<String> = phrase
        .split_whitespace()
        .map(|word| {
            if let Some(stripped) = word.strip_prefix('+') {
                format!("+{stripped}")
            } else {
                format!("+{word}")
            }
        })
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(format!("{} {}", TAG_LINE_MARKER, words.join(" ")))
    }
}
