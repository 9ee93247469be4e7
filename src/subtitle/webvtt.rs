/*!
 * WebVTT block parser.
 *
 * The first non-blank line must start with `WEBVTT`. STYLE, REGION and NOTE
 * blocks are skipped. Cue blocks carry an optional identifier line, a timing
 * line with period-only timestamps, and text lines that may open with a
 * `<v Speaker>` voice tag.
 *
 * Inline markup is kept in the cue text so the sanitizer can judge it;
 * [`strip_webvtt_tags`] removes it on demand.
 */

use log::{debug, trace, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::cue::{Cue, ParseMetadata, ParseResult};
use super::srt::TIMING_LINE_REGEX;
use super::timestamp::parse_vtt_timestamp;
use super::{join_text_lines, normalize_newlines, split_blocks, SubtitleFormat};
use crate::errors::SubtitleError;
use crate::sanitizer::entities::unescape_html;

/// Literal token every WebVTT document starts with (case-sensitive)
pub const WEBVTT_HEADER: &str = "WEBVTT";

/// Block keywords whose whole block is skipped
const SKIPPED_BLOCK_KEYWORDS: [&str; 3] = ["STYLE", "REGION", "NOTE"];

/// Opening voice tag, optionally with classes: `<v Bob>`, `<v.loud Bob>`
static VOICE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<v(?:\.[^\s>]+)?\s+([^>]*)>").expect("Invalid voice tag regex")
});

/// Any inline cue tag, including `<00:00:01.000>` karaoke timestamps
static CUE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>").expect("Invalid cue tag regex")
});

/// Parse WebVTT text into cues.
///
/// Fails with [`SubtitleError::FormatParse`] only when the header is missing;
/// individual malformed cue blocks are dropped.
pub fn parse_webvtt(content: &str) -> Result<ParseResult, SubtitleError> {
    let normalized = normalize_newlines(content);
    let blocks = split_blocks(&normalized);

    let (header_block, body) = blocks
        .split_first()
        .ok_or_else(|| SubtitleError::format(SubtitleFormat::WebVtt, "document is empty"))?;

    let header_line = header_block[0].trim_start();
    let after_token = header_line.strip_prefix(WEBVTT_HEADER).ok_or_else(|| {
        SubtitleError::format(
            SubtitleFormat::WebVtt,
            format!("first line does not start with {}", WEBVTT_HEADER),
        )
    })?;

    let header = after_token
        .trim_start_matches([' ', '\t', '-'])
        .trim();
    let metadata = ParseMetadata {
        header: (!header.is_empty()).then(|| header.to_string()),
    };

    let mut cues = Vec::new();

    // Header metadata lines (Kind:, Language:, X-TIMESTAMP-MAP=) are ignored,
    // but a cue glued to the header without a blank line is still read.
    if let Some(position) = header_block.iter().skip(1).position(|line| line.contains("-->")) {
        push_cue(&mut cues, &header_block[position + 1..], 0);
    }

    for (block_number, block) in body.iter().enumerate() {
        if let Some(keyword) = skipped_keyword(block[0]) {
            trace!("Skipping {} block {}", keyword, block_number + 1);
            continue;
        }
        push_cue(&mut cues, block, block_number + 1);
    }

    debug!("Parsed {} WebVTT cues from {} blocks", cues.len(), blocks.len());

    Ok(ParseResult { cues, metadata })
}

fn push_cue(cues: &mut Vec<Cue>, block: &[&str], block_number: usize) {
    match parse_cue_block(block, cues.len()) {
        Ok(cue) => cues.push(cue),
        Err(e) => warn!("Skipping WebVTT block {}: {}", block_number, e),
    }
}

fn skipped_keyword(line: &str) -> Option<&'static str> {
    let line = line.trim_end();
    SKIPPED_BLOCK_KEYWORDS.iter().copied().find(|keyword| {
        line.strip_prefix(keyword)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
    })
}

fn parse_cue_block(lines: &[&str], index: usize) -> Result<Cue, SubtitleError> {
    // An identifier line never contains the arrow
    let rest = if lines[0].contains("-->") { lines } else { &lines[1..] };

    let (timing_line, text_lines) = rest.split_first().ok_or_else(|| {
        SubtitleError::format(SubtitleFormat::WebVtt, "cue identifier without timing line")
    })?;

    let caps = TIMING_LINE_REGEX
        .captures(timing_line)
        .ok_or_else(|| SubtitleError::timestamp(SubtitleFormat::WebVtt, timing_line))?;
    let start_time = parse_vtt_timestamp(&caps[1])?;
    let end_time = parse_vtt_timestamp(&caps[2])?;

    if end_time <= start_time {
        return Err(SubtitleError::format(
            SubtitleFormat::WebVtt,
            format!("cue ends at {}ms, not after its start at {}ms", end_time, start_time),
        ));
    }

    let text = join_text_lines(text_lines);
    let (speaker, text) = extract_voice(&text);

    let mut cue = Cue::new(index, start_time, end_time, text);
    cue.speaker = speaker;
    Ok(cue)
}

/// Split a leading `<v Name>` tag off the cue text.
///
/// The wrapper (and its first `</v>`) is removed; the inner text is kept.
pub fn extract_voice(text: &str) -> (Option<String>, String) {
    let Some(caps) = VOICE_TAG_REGEX.captures(text) else {
        return (None, text.to_string());
    };

    let name = caps[1].trim();
    let speaker = (!name.is_empty()).then(|| name.to_string());

    let inner = &text[caps[0].len()..];
    let inner = inner.replacen("</v>", "", 1);

    (speaker, inner.trim().to_string())
}

/// Remove inline WebVTT markup (b, i, u, c, lang, ruby, timestamps) and
/// unescape HTML entities. Not applied during parsing.
pub fn strip_webvtt_tags(text: &str) -> String {
    let stripped = CUE_TAG_REGEX.replace_all(text, "");
    unescape_html(&stripped)
}
