/*!
 * Format sniffing.
 *
 * These are routing hints for picking a parser, not a security boundary.
 * The literal `WEBVTT` header always wins over SRT-looking content.
 */

use log::debug;

use super::cue::ParseResult;
use super::srt::{is_bare_integer, parse_srt, parse_timing_line};
use super::webvtt::{parse_webvtt, WEBVTT_HEADER};
use super::{SubtitleFormat, BOM};
use crate::errors::SubtitleError;

fn trim_leading(content: &str) -> &str {
    content.trim_start_matches(|c: char| c == BOM || c.is_whitespace())
}

/// Heuristic SRT check.
///
/// True when the content (BOM and leading whitespace removed) does not start
/// with the WebVTT header and its first line is a bare integer or an SRT
/// timing line.
pub fn is_srt_format(content: &str) -> bool {
    let trimmed = trim_leading(content);
    if trimmed.starts_with(WEBVTT_HEADER) {
        return false;
    }

    let Some(first_line) = trimmed.lines().next() else {
        return false;
    };

    is_bare_integer(first_line) || parse_timing_line(first_line).is_ok()
}

/// True when SRT parsing yields at least one cue
pub fn is_valid_srt(content: &str) -> bool {
    !parse_srt(content).is_empty()
}

/// True when the content parses as WebVTT; zero cues is still valid
pub fn is_valid_webvtt(content: &str) -> bool {
    parse_webvtt(content).is_ok()
}

/// Guess the format of a subtitle blob
pub fn detect_format(content: &str) -> Option<SubtitleFormat> {
    if trim_leading(content).starts_with(WEBVTT_HEADER) {
        Some(SubtitleFormat::WebVtt)
    } else if is_srt_format(content) {
        Some(SubtitleFormat::Srt)
    } else {
        None
    }
}

/// Detect the format and parse with the matching parser
pub fn parse_subtitles(content: &str) -> Result<ParseResult, SubtitleError> {
    match detect_format(content) {
        Some(SubtitleFormat::WebVtt) => parse_webvtt(content),
        Some(SubtitleFormat::Srt) => Ok(parse_srt(content)),
        None => {
            debug!("Could not detect subtitle format ({} bytes)", content.len());
            Err(SubtitleError::format(
                SubtitleFormat::Srt,
                "content is neither WebVTT nor SRT",
            ))
        }
    }
}
