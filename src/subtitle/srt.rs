/*!
 * SRT block parser.
 *
 * Each block is an optional bare-integer index (discarded), a timing line
 * `start --> end` and any number of text lines. Blocks whose timing cannot be
 * read are dropped; parsing continues with the next block.
 */

use log::{debug, trace, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::cue::{Cue, ParseMetadata, ParseResult};
use super::timestamp::parse_srt_timestamp;
use super::{join_text_lines, normalize_newlines, split_blocks, SubtitleFormat};
use crate::errors::SubtitleError;

/// `start --> end`, with anything after the end timestamp ignored
pub(crate) static TIMING_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\S+?)\s*-->\s*(\S+)(?:\s+.*)?$").expect("Invalid timing line regex")
});

/// Parse SRT text into cues.
///
/// Never fails: empty input gives an empty result and broken blocks are
/// skipped. Cue indices are assigned in emission order.
pub fn parse_srt(content: &str) -> ParseResult {
    let normalized = normalize_newlines(content);
    let blocks = split_blocks(&normalized);
    let mut cues = Vec::with_capacity(blocks.len());

    for (block_number, block) in blocks.iter().enumerate() {
        match parse_block(block) {
            Ok((start_time, end_time, text)) => {
                trace!("SRT block {} -> cue {}", block_number, cues.len());
                cues.push(Cue::new(cues.len(), start_time, end_time, text));
            }
            Err(e) => {
                warn!("Skipping SRT block {}: {}", block_number, e);
            }
        }
    }

    debug!("Parsed {} SRT cues from {} blocks", cues.len(), blocks.len());

    ParseResult {
        cues,
        metadata: ParseMetadata::default(),
    }
}

fn parse_block(lines: &[&str]) -> Result<(u64, u64, String), SubtitleError> {
    let mut rest = lines;
    if rest.first().is_some_and(|line| is_bare_integer(line)) {
        rest = &rest[1..];
    }

    let (timing_line, text_lines) = rest
        .split_first()
        .ok_or_else(|| SubtitleError::format(SubtitleFormat::Srt, "block has no timing line"))?;

    let (start_time, end_time) = parse_timing_line(timing_line)?;
    if end_time <= start_time {
        return Err(SubtitleError::format(
            SubtitleFormat::Srt,
            format!("cue ends at {}ms, not after its start at {}ms", end_time, start_time),
        ));
    }

    Ok((start_time, end_time, join_text_lines(text_lines)))
}

/// Read both timestamps of an SRT timing line
pub(crate) fn parse_timing_line(line: &str) -> Result<(u64, u64), SubtitleError> {
    let caps = TIMING_LINE_REGEX
        .captures(line)
        .ok_or_else(|| SubtitleError::timestamp(SubtitleFormat::Srt, line))?;

    Ok((parse_srt_timestamp(&caps[1])?, parse_srt_timestamp(&caps[2])?))
}

pub(crate) fn is_bare_integer(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}
