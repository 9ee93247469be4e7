/*!
 * Timestamp grammars for SRT and WebVTT.
 *
 * SRT:    `H+:MM:SS,mmm` or `H+:MM:SS.mmm`
 * WebVTT: `HH:MM:SS.mmm` or `MM:SS.mmm` (period only)
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::SubtitleFormat;
use crate::errors::SubtitleError;

static SRT_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{2}):(\d{2})[,.](\d{3})$").expect("Invalid SRT timestamp regex")
});

static VTT_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d{2,}):)?(\d{2}):(\d{2})\.(\d{3})$").expect("Invalid WebVTT timestamp regex")
});

/// Parse an SRT timestamp to milliseconds.
///
/// Hours take one or more digits, minutes and seconds exactly two, milliseconds
/// exactly three. Comma and period separators give the same value.
pub fn parse_srt_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
    let trimmed = timestamp.trim();
    let caps = SRT_TIMESTAMP_REGEX
        .captures(trimmed)
        .ok_or_else(|| SubtitleError::timestamp(SubtitleFormat::Srt, timestamp))?;

    to_millis(
        caps.get(1).map(|m| m.as_str()),
        &caps[2],
        &caps[3],
        &caps[4],
    )
    .ok_or_else(|| SubtitleError::timestamp(SubtitleFormat::Srt, timestamp))
}

/// Parse a WebVTT timestamp to milliseconds. Hours default to zero when omitted.
pub fn parse_vtt_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
    let trimmed = timestamp.trim();
    let caps = VTT_TIMESTAMP_REGEX
        .captures(trimmed)
        .ok_or_else(|| SubtitleError::timestamp(SubtitleFormat::WebVtt, timestamp))?;

    to_millis(
        caps.get(1).map(|m| m.as_str()),
        &caps[2],
        &caps[3],
        &caps[4],
    )
    .ok_or_else(|| SubtitleError::timestamp(SubtitleFormat::WebVtt, timestamp))
}

fn to_millis(hours: Option<&str>, minutes: &str, seconds: &str, millis: &str) -> Option<u64> {
    let hours: u64 = match hours {
        Some(h) => h.parse().ok()?,
        None => 0,
    };
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    let millis: u64 = millis.parse().ok()?;

    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    hours
        .checked_mul(3_600_000)?
        .checked_add(minutes * 60_000 + seconds * 1_000 + millis)
}

/// Format milliseconds as an SRT timestamp (HH:MM:SS,mmm)
pub fn format_srt_timestamp(ms: u64) -> String {
    let (hours, minutes, seconds, millis) = split_millis(ms);
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Format milliseconds as a WebVTT timestamp (HH:MM:SS.mmm)
pub fn format_vtt_timestamp(ms: u64) -> String {
    let (hours, minutes, seconds, millis) = split_millis(ms);
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

fn split_millis(ms: u64) -> (u64, u64, u64, u64) {
    (
        ms / 3_600_000,
        (ms % 3_600_000) / 60_000,
        (ms % 60_000) / 1_000,
        ms % 1_000,
    )
}
