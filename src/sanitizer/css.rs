/*!
 * Inline style filtering.
 *
 * Declarations survive only when the property is on the presentational
 * allowlist and the value carries nothing executable.
 */

use log::trace;

use super::patterns::DANGEROUS_PATTERNS;

/// Typography properties, always allowed
pub const TYPOGRAPHY_PROPERTIES: [&str; 6] = [
    "font-family",
    "font-size",
    "font-weight",
    "font-style",
    "text-decoration",
    "text-align",
];

/// Color properties, allowed only when colors are enabled
pub const COLOR_PROPERTIES: [&str; 2] = ["color", "background-color"];

/// Substrings that disqualify a value (checked lowercased, whitespace removed)
const FORBIDDEN_VALUE_FRAGMENTS: [&str; 3] = ["javascript:", "expression(", "url("];

/// Characters that could break out of the attribute or hide CSS escapes
const FORBIDDEN_VALUE_CHARS: [char; 5] = ['<', '>', '"', '\\', '&'];

/// Allowlist-based style filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSanitizer {
    allow_colors: bool,
}

impl StyleSanitizer {
    /// Create a filter; `allow_colors` adds [`COLOR_PROPERTIES`] to the allowlist
    pub const fn new(allow_colors: bool) -> Self {
        Self { allow_colors }
    }

    /// Whether a property name is on the allowlist
    pub fn is_allowed_property(&self, property: &str) -> bool {
        let property = property.trim().to_ascii_lowercase();
        TYPOGRAPHY_PROPERTIES.contains(&property.as_str())
            || (self.allow_colors && COLOR_PROPERTIES.contains(&property.as_str()))
    }

    /// Return the trimmed value if the declaration may be kept
    pub fn sanitize_value<'a>(&self, property: &str, value: &'a str) -> Option<&'a str> {
        let value = value.trim();
        if value.is_empty() || !self.is_allowed_property(property) || is_dangerous_value(value) {
            trace!("Dropping style declaration {}: {}", property.trim(), value);
            return None;
        }
        Some(value)
    }

    /// Filter a `prop: value; prop: value` string, rejoining with `; `
    pub fn sanitize_style(&self, style: &str) -> String {
        style
            .split(';')
            .filter_map(|declaration| {
                let (property, value) = declaration.split_once(':')?;
                let value = self.sanitize_value(property, value)?;
                Some(format!("{}: {}", property.trim().to_ascii_lowercase(), value))
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for StyleSanitizer {
    fn default() -> Self {
        Self::new(true)
    }
}

fn is_dangerous_value(value: &str) -> bool {
    if value.contains(FORBIDDEN_VALUE_CHARS) {
        return true;
    }

    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    if FORBIDDEN_VALUE_FRAGMENTS.iter().any(|fragment| compact.contains(fragment)) {
        return true;
    }

    DANGEROUS_PATTERNS.iter().any(|pattern| pattern.regex.is_match(value))
}

/// Check a single declaration against the full allowlist (colors included).
///
/// Returns `None` when the pair must be dropped.
pub fn sanitize_css_value(property: &str, value: &str) -> Option<String> {
    StyleSanitizer::default()
        .sanitize_value(property, value)
        .map(str::to_string)
}

/// Filter a style attribute value against the full allowlist
pub fn sanitize_style(style: &str) -> String {
    StyleSanitizer::default().sanitize_style(style)
}
