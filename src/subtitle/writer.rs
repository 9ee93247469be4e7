/*!
 * Serialisation of cues back to SRT and WebVTT text.
 */

use std::fmt::Write;

use super::cue::Cue;
use super::timestamp::format_vtt_timestamp;
use super::{BOM, WEBVTT_HEADER};

/// Render cues as an SRT document, numbered from 1 in slice order.
pub fn to_srt(cues: &[Cue]) -> String {
    let mut output = String::new();
    for (i, cue) in cues.iter().enumerate() {
        // Renumber so the output is sequential even for filtered slices
        let numbered = Cue { index: i, ..cue.clone() };
        let _ = write!(output, "{}", numbered);
    }
    output
}

/// SRT with CRLF line endings and a leading BOM, for players that need them
pub fn to_srt_windows(cues: &[Cue]) -> String {
    let mut output = String::new();
    output.push(BOM);
    output.push_str(&to_srt(cues).replace('\n', "\r\n"));
    output
}

/// Render cues as a WebVTT document. Speakers become `<v Name>` voice tags.
pub fn to_webvtt(cues: &[Cue], header: Option<&str>) -> String {
    let mut output = String::from(WEBVTT_HEADER);
    if let Some(header) = header.map(str::trim).filter(|h| !h.is_empty()) {
        output.push(' ');
        output.push_str(header);
    }
    output.push_str("\n\n");

    for cue in cues {
        let _ = writeln!(
            output,
            "{} --> {}",
            format_vtt_timestamp(cue.start_time),
            format_vtt_timestamp(cue.end_time)
        );
        match &cue.speaker {
            Some(speaker) => {
                let _ = writeln!(output, "<v {}>{}</v>", speaker, cue.text);
            }
            None => {
                let _ = writeln!(output, "{}", cue.text);
            }
        }
        output.push('\n');
    }

    output
}
