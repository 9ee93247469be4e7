/*!
 * Sanitization of untrusted subtitle text.
 *
 * - `entities`: HTML escape / unescape tables
 * - `patterns`: the shared dangerous-pattern library and tag stripper
 * - `css`: inline style allowlist
 * - `text`: the configurable sanitizer and batch sanitizer
 * - `presets`: fixed policies for rendering, plain text, DOM and providers
 * - `threats`: read-only detection
 */

pub mod css;
pub mod entities;
pub mod patterns;
pub mod presets;
pub mod text;
pub mod threats;

// Re-export main types
pub use css::{sanitize_css_value, sanitize_style, StyleSanitizer};
pub use entities::{escape_html, unescape_html};
pub use patterns::{
    remove_dangerous_patterns, strip_html_tags, RemovalResult, ThreatTag, PATTERN_LIBRARY_VERSION,
};
pub use presets::{
    sanitize_for_dom, sanitize_plain_text, sanitize_translation, sanitize_vtt_cue, SanitizePreset,
};
pub use text::{
    sanitize_cues_with, sanitize_subtitle_cues, sanitize_subtitle_text, BatchSanitizeResult,
    SanitizeOptions, SanitizeResult,
};
pub use threats::{
    audit_cues, contains_dangerous_content, detect_threats, is_subtitle_text_safe, CueThreats,
};
