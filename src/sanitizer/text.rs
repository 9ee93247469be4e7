/*!
 * Configurable subtitle text sanitizer.
 *
 * Every policy runs the same fixed sequence:
 *
 * 1. remove dangerous patterns (always, whatever the options)
 * 2. strip all tags, or filter them against the formatting allowlist
 * 3. unescape entities, then normalize whitespace
 * 4. truncate to `max_length`
 *
 * Steps 1-3 repeat until the text stops changing, so markup resurrected by
 * unescaping is judged again by step 1. Every layer of encoding costs at
 * least one pass, so the pass budget grows with the input length. The result
 * is stable: sanitizing an already sanitized string returns it unchanged.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::css::StyleSanitizer;
use super::entities::{strip_entity_ampersands, unescape_html};
use super::patterns::{remove_dangerous_patterns, strip_html_tags};
use crate::subtitle::Cue;

/// Tags kept when formatting is allowed
pub const ALLOWED_TAGS: [&str; 5] = ["b", "i", "u", "br", "span"];

/// Minimum pass budget; longer inputs get one pass per byte
const MAX_PASSES: usize = 16;

/// Every `<...>` span; tag-shaped ones capture the tag name and attribute run
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9]*)([^<>]*)>|<[^<>]*>")
        .expect("Invalid tag regex")
});

static STYLE_ATTR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bstyle\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("Invalid style attribute regex")
});

/// Sanitizer policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeOptions {
    /// Keep `b, i, u, br, span` and a filtered `style` attribute
    pub allow_formatting: bool,
    /// Allow color properties in kept styles (needs `allow_formatting`)
    pub allow_colors: bool,
    /// Remove every tag, overriding `allow_formatting`
    pub strip_all_html: bool,
    /// Hard limit in characters, applied last
    pub max_length: Option<usize>,
}

impl SanitizeOptions {
    /// Formatting and colors kept, for rendering WebVTT cues
    pub const VTT_CUE: SanitizeOptions = SanitizeOptions {
        allow_formatting: true,
        allow_colors: true,
        strip_all_html: false,
        max_length: None,
    };

    /// All markup removed
    pub const PLAIN_TEXT: SanitizeOptions = SanitizeOptions {
        allow_formatting: false,
        allow_colors: false,
        strip_all_html: true,
        max_length: None,
    };

    /// Same policy with a length limit
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    fn keeps_formatting(&self) -> bool {
        self.allow_formatting && !self.strip_all_html
    }
}

/// Sanitized text and whether it differs from the whitespace-normalized input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizeResult {
    pub text: String,
    pub was_modified: bool,
}

/// Sanitized cues plus the number whose text changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSanitizeResult {
    pub cues: Vec<Cue>,
    pub total_modified: usize,
}

/// Sanitize one piece of subtitle text under `options`. Never fails.
pub fn sanitize_subtitle_text(text: &str, options: &SanitizeOptions) -> SanitizeResult {
    let baseline = normalize_whitespace(text);
    let pass_limit = MAX_PASSES.max(text.len());
    let mut current = text.to_string();
    let mut stable = false;

    for _ in 0..pass_limit {
        let next = sanitize_pass(&current, options);
        if next == current {
            stable = true;
            break;
        }
        current = next;
    }

    if !stable {
        warn!("Sanitizer did not settle after {} passes, neutralising markup", pass_limit);
        current = neutralise(&current);
    }

    if let Some(max_length) = options.max_length {
        current = truncate_chars(&current, max_length);
    }

    let was_modified = current != baseline;
    SanitizeResult {
        text: current,
        was_modified,
    }
}

fn sanitize_pass(text: &str, options: &SanitizeOptions) -> String {
    let removal = remove_dangerous_patterns(text);
    if !removal.removed.is_empty() {
        debug!("Removed dangerous content: {:?}", removal.removed);
    }

    let tags_handled = if options.keeps_formatting() {
        filter_allowed_tags(&removal.text, StyleSanitizer::new(options.allow_colors))
    } else {
        strip_html_tags(&removal.text)
    };

    normalize_whitespace(&unescape_html(&tags_handled))
}

/// Drop angle brackets, entity ampersands and dangerous patterns until none
/// is left. Every step only deletes, so the loop ends, and its output passes
/// through [`sanitize_pass`] unchanged.
fn neutralise(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let stripped = strip_entity_ampersands(&current.replace(['<', '>'], ""));
        let next = normalize_whitespace(&remove_dangerous_patterns(&stripped).text);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Keep allowlisted tags (attributes dropped except a filtered `style`),
/// remove everything else that looks like a tag.
fn filter_allowed_tags(text: &str, styles: StyleSanitizer) -> String {
    TAG_REGEX
        .replace_all(text, |caps: &Captures| {
            let Some(name) = caps.get(2) else {
                return String::new();
            };
            let name = name.as_str().to_ascii_lowercase();
            if !ALLOWED_TAGS.contains(&name.as_str()) {
                return String::new();
            }

            let closing = !caps[1].is_empty();
            if name == "br" {
                return if closing { String::new() } else { "<br>".to_string() };
            }
            if closing {
                return format!("</{}>", name);
            }

            let style = STYLE_ATTR_REGEX
                .captures(&caps[3])
                .and_then(|attr| attr.get(1).or_else(|| attr.get(2)))
                .map(|value| styles.sanitize_style(value.as_str()))
                .filter(|style| !style.is_empty());

            match style {
                Some(style) => format!("<{} style=\"{}\">", name, style),
                None => format!("<{}>", name),
            }
        })
        .into_owned()
}

/// Collapse every whitespace run, line breaks included, to one space and trim
/// both ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_length).collect();
    normalize_whitespace(&truncated)
}

/// Sanitize every cue's text with `options`; timing and speaker are copied.
pub fn sanitize_cues_with(cues: &[Cue], options: &SanitizeOptions) -> BatchSanitizeResult {
    let mut total_modified = 0;
    let sanitized = cues
        .iter()
        .map(|cue| {
            let result = sanitize_subtitle_text(&cue.text, options);
            if result.text != cue.text {
                total_modified += 1;
            }
            cue.with_text(result.text)
        })
        .collect();

    BatchSanitizeResult {
        cues: sanitized,
        total_modified,
    }
}

/// Sanitize a cue list with the default (strip-all-tags) policy
pub fn sanitize_subtitle_cues(cues: &[Cue]) -> BatchSanitizeResult {
    let result = sanitize_cues_with(cues, &SanitizeOptions::default());
    debug!(
        "Sanitized {} cues, {} modified",
        result.cues.len(),
        result.total_modified
    );
    result
}
