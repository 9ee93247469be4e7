/*!
 * Parsed subtitle data.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use super::timestamp::format_srt_timestamp;

// @struct: Single timed cue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cue {
    // @field: Zero-based emission order, never the index found in the source
    pub index: usize,

    // @field: Start time in ms
    pub start_time: u64,

    // @field: End time in ms, always greater than start_time
    pub end_time: u64,

    // @field: Cue text, lines joined with '\n'
    pub text: String,

    // @field: Voice tag name (WebVTT only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

impl Cue {
    /// Creates a cue without a speaker
    pub fn new(index: usize, start_time: u64, end_time: u64, text: impl Into<String>) -> Self {
        Cue {
            index,
            start_time,
            end_time,
            text: text.into(),
            speaker: None,
        }
    }

    /// Attaches a speaker name
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = Some(speaker.into());
        self
    }

    /// Returns a copy carrying different text; timing and speaker are kept.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Cue {
            text: text.into(),
            ..self.clone()
        }
    }

    /// Duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index + 1)?;
        writeln!(
            f,
            "{} --> {}",
            format_srt_timestamp(self.start_time),
            format_srt_timestamp(self.end_time)
        )?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Document-level data found outside the cues
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseMetadata {
    /// Free text after the WEBVTT token, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

/// Output of either block parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Cues in source order
    pub cues: Vec<Cue>,
    /// Header metadata
    pub metadata: ParseMetadata,
}

impl ParseResult {
    /// Number of cues
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Whether no cue survived parsing
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}
