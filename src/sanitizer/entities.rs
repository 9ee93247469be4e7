/*!
 * HTML entity escaping.
 *
 * Covers the five markup-significant characters. `&nbsp;` is understood when
 * unescaping but never produced.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Character to entity, `&` first
pub const ESCAPE_TABLE: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#39;"),
];

static UNESCAPE_TABLE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("&amp;", "&"),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&nbsp;", " "),
    ])
});

static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:amp|lt|gt|quot|#39|nbsp);").expect("Invalid entity regex")
});

/// Escape `& < > " '`.
///
/// Works in one pass over the characters, so an `&` introduced by an
/// entity is never escaped a second time.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ESCAPE_TABLE.iter().find(|(c, _)| *c == ch) {
            Some((_, entity)) => result.push_str(entity),
            None => result.push(ch),
        }
    }
    result
}

/// Reverse [`escape_html`], plus `&nbsp;` to a plain space.
///
/// Single pass: `&amp;lt;` becomes `&lt;`, not `<`.
pub fn unescape_html(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &Captures| {
            UNESCAPE_TABLE
                .get(&caps[0])
                .copied()
                .unwrap_or_default()
                .to_string()
        })
        .into_owned()
}

/// Drop the `&` of every recognised entity, leaving its name as plain text
/// (`&amp;lt;` becomes `amp;lt;`).
///
/// Single pass: a stray `&` in front can pair up with the remaining name,
/// so `&&amp;lt;` becomes `&amp;lt;`.
pub(crate) fn strip_entity_ampersands(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &Captures| caps[0][1..].to_string())
        .into_owned()
}
