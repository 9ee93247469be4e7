/*!
 * Dangerous-pattern library and lexical tag stripping.
 *
 * Every sanitizer preset and the threat detector share this single table, so
 * adding a pattern here protects all call sites at once. Bump
 * [`PATTERN_LIBRARY_VERSION`] whenever the table changes.
 *
 * Matching is lexical. Payloads split across several encodings or nested in
 * ways the patterns do not anticipate can survive a single pass; the text
 * sanitizer repeats its passes until the output is stable to narrow that gap.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version of the dangerous-pattern table
pub const PATTERN_LIBRARY_VERSION: u32 = 2;

/// Category of dangerous markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatTag {
    ScriptTag,
    Iframe,
    SvgTag,
    FormTag,
    EventHandler,
    JavascriptUrl,
    DataUrl,
    HtmlComment,
}

impl ThreatTag {
    /// Every tag, in declaration order
    pub const ALL: [ThreatTag; 8] = [
        Self::ScriptTag,
        Self::Iframe,
        Self::SvgTag,
        Self::FormTag,
        Self::EventHandler,
        Self::JavascriptUrl,
        Self::DataUrl,
        Self::HtmlComment,
    ];

    /// Wire name of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ScriptTag => "script_tag",
            Self::Iframe => "iframe",
            Self::SvgTag => "svg_tag",
            Self::FormTag => "form_tag",
            Self::EventHandler => "event_handler",
            Self::JavascriptUrl => "javascript_url",
            Self::DataUrl => "data_url",
            Self::HtmlComment => "html_comment",
        }
    }
}

impl fmt::Display for ThreatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the pattern library
#[derive(Debug)]
pub struct DangerousPattern {
    /// Category reported when the pattern matches
    pub tag: ThreatTag,
    /// Matcher; every match is removed
    pub regex: Regex,
}

impl DangerousPattern {
    fn new(tag: ThreatTag, pattern: &str) -> Self {
        Self {
            tag,
            regex: Regex::new(pattern).expect("Invalid dangerous pattern regex"),
        }
    }
}

/// Element pattern: a complete element, or a stray open/close tag of it
fn element_pattern(name: &str) -> String {
    format!(
        r"(?is)<{name}\b[^>]*>.*?</{name}\s*>|</?{name}\b[^>]*>",
        name = name
    )
}

/// The pattern library, in removal order. Comments go first so nothing
/// hidden inside one survives the later steps.
pub static DANGEROUS_PATTERNS: Lazy<Vec<DangerousPattern>> = Lazy::new(|| {
    vec![
        // Unterminated comments run to the end of the text
        DangerousPattern::new(ThreatTag::HtmlComment, r"(?s)<!--.*?(?:-->|\z)"),
        DangerousPattern::new(ThreatTag::ScriptTag, &element_pattern("script")),
        DangerousPattern::new(ThreatTag::Iframe, &element_pattern("iframe")),
        DangerousPattern::new(ThreatTag::SvgTag, &element_pattern("svg")),
        DangerousPattern::new(ThreatTag::FormTag, &element_pattern("form")),
        DangerousPattern::new(
            ThreatTag::EventHandler,
            r#"(?i)\bon[a-z]{3,}\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#,
        ),
        DangerousPattern::new(ThreatTag::JavascriptUrl, r"(?i)(?:java|vb)\s*script\s*:"),
        // `data:` followed by a MIME type, or by the `,`/`;` of an untyped URL
        DangerousPattern::new(
            ThreatTag::DataUrl,
            r"(?i)\bdata\s*:\s*(?:[a-z]+/[a-z0-9.+-]+|[,;])",
        ),
    ]
});

/// Output of [`remove_dangerous_patterns`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalResult {
    /// Text with every dangerous match removed
    pub text: String,
    /// Categories removed, each listed once, in discovery order
    pub removed: Vec<ThreatTag>,
}

/// Remove every dangerous pattern, in library order.
///
/// The table is applied repeatedly until nothing matches, so removing an
/// inner payload cannot splice the surrounding text into a new one
/// (`<scr<script></script>ipt>`). Each removal shortens the text, so this
/// always terminates.
pub fn remove_dangerous_patterns(text: &str) -> RemovalResult {
    let mut current = text.to_string();
    let mut removed = Vec::new();

    loop {
        let mut changed = false;
        for pattern in DANGEROUS_PATTERNS.iter() {
            if !pattern.regex.is_match(&current) {
                continue;
            }
            current = pattern.regex.replace_all(&current, "").into_owned();
            changed = true;
            if !removed.contains(&pattern.tag) {
                removed.push(pattern.tag);
            }
        }
        if !changed {
            break;
        }
    }

    RemovalResult { text: current, removed }
}

/// Comments and every other `<...>` span that holds no nested angle bracket
static TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->|<[^<>]*>").expect("Invalid tag regex"));

/// Remove every `<...>` span.
///
/// Lexical only, not an HTML parser. Handles self-closing tags and repeats
/// until no span is left, so fragments that join into a new tag are also
/// removed. Any span counts, so `a < b > c` loses ` b ` along with its
/// brackets. A `<` with no closing `>` after it (`I <3 you`) is kept.
pub fn strip_html_tags(text: &str) -> String {
    let mut current = text.to_string();
    while TAG_REGEX.is_match(&current) {
        current = TAG_REGEX.replace_all(&current, "").into_owned();
    }
    current
}
