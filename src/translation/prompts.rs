/*!
 * Prompt construction and response parsing for batch translation.
 *
 * Cue text is untrusted: it goes through `sanitize_translation` before it is
 * placed in a prompt, so no raw markup ever reaches a provider.
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use super::batch::TranslationBatch;
use crate::sanitizer::sanitize_translation;

pub const PREVIOUS_CONTEXT_MARKER: &str = "[PREVIOUS CONTEXT - DO NOT TRANSLATE]";
pub const TO_TRANSLATE_MARKER: &str = "[TO TRANSLATE]";
pub const FOLLOWING_CONTEXT_MARKER: &str = "[FOLLOWING CONTEXT - DO NOT TRANSLATE]";
pub const OUTPUT_FORMAT_MARKER: &str = "[OUTPUT FORMAT]";

/// `1. text`, `1: text` or `1) text`
static NUMBERED_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s*[.:)]\s*(.+)$").expect("Invalid numbered line regex")
});

/// Display names for common target languages
const LANGUAGE_NAMES: [(&str, &str); 8] = [
    ("zh-TW", "Traditional Chinese"),
    ("zh-CN", "Simplified Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
];

/// Human-readable language name, or the code itself when unknown
pub fn language_name(code: &str) -> &str {
    LANGUAGE_NAMES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// One prompt line per cue: sanitized, line breaks folded into spaces
fn prompt_text(text: &str) -> String {
    sanitize_translation(text)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the prompt for one batch
pub fn build_translation_prompt(batch: &TranslationBatch, target_language: &str) -> String {
    let mut parts = vec![
        format!(
            "You are a professional subtitle translator. \
             Translate the following subtitles into {}.",
            language_name(target_language)
        ),
        "Keep the original meaning and make each line read naturally as a subtitle.".to_string(),
        String::new(),
    ];

    if !batch.prev_context.is_empty() {
        parts.push(PREVIOUS_CONTEXT_MARKER.to_string());
        parts.extend(batch.prev_context.iter().map(|cue| format!("- {}", prompt_text(&cue.text))));
        parts.push(String::new());
    }

    parts.push(TO_TRANSLATE_MARKER.to_string());
    parts.extend(
        batch
            .cues
            .iter()
            .enumerate()
            .map(|(i, cue)| format!("{}. {}", i + 1, prompt_text(&cue.text))),
    );
    parts.push(String::new());

    if !batch.next_context.is_empty() {
        parts.push(FOLLOWING_CONTEXT_MARKER.to_string());
        parts.extend(batch.next_context.iter().map(|cue| format!("- {}", prompt_text(&cue.text))));
        parts.push(String::new());
    }

    parts.push(OUTPUT_FORMAT_MARKER.to_string());
    parts.push(
        "Reply with the translations only, one per line, numbered like the input:".to_string(),
    );
    parts.push("1. [translation 1]".to_string());
    parts.push("2. [translation 2]".to_string());
    parts.push("...".to_string());

    parts.join("\n")
}

/// Split a numbered line into its number and text, stripping wrapping quotes
pub fn numbered_line(line: &str) -> Option<(usize, String)> {
    let caps = NUMBERED_LINE_REGEX.captures(line.trim())?;
    let number: usize = caps[1].parse().ok()?;
    let mut text = caps[2].trim();

    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            text = &text[1..text.len() - 1];
            break;
        }
    }

    Some((number, text.to_string()))
}

/// Read numbered translations out of a completion.
///
/// Missing numbers become empty strings; the result always has exactly
/// `expected_count` entries.
pub fn parse_translation_response(response: &str, expected_count: usize) -> Vec<String> {
    let mut translations: Vec<String> = Vec::new();

    for (number, text) in response.lines().filter_map(numbered_line) {
        if number == 0 || number > expected_count {
            continue;
        }
        if translations.len() < number {
            translations.resize(number, String::new());
        }
        translations[number - 1] = text;
    }

    let found = translations.iter().filter(|t| !t.is_empty()).count();
    if found != expected_count {
        warn!("Translation count mismatch: expected {}, got {}", expected_count, found);
    }

    translations.resize(expected_count, String::new());
    translations
}
