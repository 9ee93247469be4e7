/*!
 * Subtitle parsing for SRT and WebVTT.
 *
 * Both parsers split the input into blank-line delimited blocks and turn each
 * block into a [`Cue`]. A malformed block is logged and dropped; only a WebVTT
 * document without its header is rejected as a whole.
 *
 * - `timestamp`: the two timestamp grammars
 * - `srt`: SRT block parser
 * - `webvtt`: WebVTT block parser, voice tags and tag stripping
 * - `detect`: format sniffing and dispatch
 * - `writer`: SRT / WebVTT serialisation
 */

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod cue;
pub mod detect;
pub mod srt;
pub mod timestamp;
pub mod webvtt;
pub mod writer;

pub use cue::{Cue, ParseMetadata, ParseResult};
pub use detect::{detect_format, is_srt_format, is_valid_srt, is_valid_webvtt, parse_subtitles};
pub use srt::parse_srt;
pub use timestamp::{
    format_srt_timestamp, format_vtt_timestamp, parse_srt_timestamp, parse_vtt_timestamp,
};
pub use webvtt::{parse_webvtt, strip_webvtt_tags, WEBVTT_HEADER};
pub use writer::{to_srt, to_srt_windows, to_webvtt};

/// Byte-order mark stripped before parsing
pub(crate) const BOM: char = '\u{feff}';

/// Supported subtitle formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    Srt,
    WebVtt,
}

impl SubtitleFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::WebVtt => "vtt",
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Srt => write!(f, "SRT"),
            Self::WebVtt => write!(f, "WebVTT"),
        }
    }
}

/// Strip a leading BOM and fold CRLF / lone CR into LF.
pub(crate) fn normalize_newlines(content: &str) -> String {
    let content = content.strip_prefix(BOM).unwrap_or(content);
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split normalized text into runs of non-blank lines.
///
/// Leading blank lines and any number of consecutive blank lines between
/// blocks collapse away.
pub(crate) fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Join text lines, dropping trailing whitespace on each line.
pub(crate) fn join_text_lines(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
