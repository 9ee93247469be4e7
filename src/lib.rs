/*!
 * # subsafe - subtitle parsing and sanitization
 *
 * A Rust library that reads SRT and WebVTT subtitles into timed cues and
 * strips injection payloads from untrusted cue text before it is rendered,
 * stored or sent to a translation provider.
 *
 * ## Features
 *
 * - Tolerant SRT and WebVTT parsing (malformed blocks are dropped, never fatal)
 * - Format detection and SRT / WebVTT output
 * - Configurable sanitizer with named presets:
 *   - formatting allowlist (`b`, `i`, `u`, `br`, `span`) with a CSS allowlist
 *   - plain text, DOM-safe and provider-safe policies
 * - Read-only threat detection
 * - Batched, concurrent translation through a pluggable provider
 *
 * ## Architecture
 *
 * - `subtitle`: cue model, timestamps, parsers, detection and writers
 * - `sanitizer`: entity tables, dangerous patterns, CSS allowlist,
 *   the sanitizer engine, presets and threat detection
 * - `translation`: batching, prompts and the batch translator
 * - `providers`: the provider trait and a mock implementation
 * - `app_config`: `conf.json` handling
 * - `errors`: custom error types
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
// Test names follow test_fnName_withCondition_shouldResult
#![cfg_attr(test, allow(non_snake_case))]

// Public modules
pub mod app_config;
pub mod errors;
pub mod providers;
pub mod sanitizer;
pub mod subtitle;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, SubtitleError, TranslationError};
pub use sanitizer::{
    detect_threats, is_subtitle_text_safe, sanitize_for_dom, sanitize_plain_text,
    sanitize_subtitle_cues, sanitize_subtitle_text, sanitize_translation, sanitize_vtt_cue,
    SanitizeOptions, SanitizePreset, SanitizeResult, ThreatTag,
};
pub use subtitle::{
    detect_format, parse_srt, parse_subtitles, parse_webvtt, Cue, ParseResult, SubtitleFormat,
};
pub use translation::BatchTranslator;
