/*!
 * Fixed sanitizer policies for the common call sites.
 *
 * Each preset is a named configuration over the same engine, so call sites
 * cannot drift apart on policy.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::entities::escape_html;
use super::patterns::remove_dangerous_patterns;
use super::text::{
    sanitize_cues_with, sanitize_subtitle_text, BatchSanitizeResult, SanitizeOptions,
};
use crate::subtitle::Cue;

/// Render-safe WebVTT cue text: formatting and colors kept
pub fn sanitize_vtt_cue(text: &str) -> String {
    sanitize_subtitle_text(text, &SanitizeOptions::VTT_CUE).text
}

/// All markup removed
pub fn sanitize_plain_text(text: &str) -> String {
    sanitize_subtitle_text(text, &SanitizeOptions::PLAIN_TEXT).text
}

/// Text for a plain-text DOM sink: dangerous patterns removed, everything
/// else escaped. Never allowlist-filtered.
pub fn sanitize_for_dom(text: &str) -> String {
    escape_html(&remove_dangerous_patterns(text).text)
}

/// Text leaving for a translation provider. Same policy as [`sanitize_for_dom`].
pub fn sanitize_translation(text: &str) -> String {
    sanitize_for_dom(text)
}

/// Named sanitizer policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitizePreset {
    /// Leave text untouched
    None,
    /// Default options: strip all tags
    #[default]
    Default,
    /// [`sanitize_vtt_cue`]
    Vtt,
    /// [`sanitize_plain_text`]
    Plain,
    /// [`sanitize_for_dom`]
    Dom,
    /// [`sanitize_translation`]
    Translation,
}

impl SanitizePreset {
    /// Apply the preset to one string
    pub fn apply(&self, text: &str) -> String {
        match self {
            Self::None => text.to_string(),
            Self::Default => sanitize_subtitle_text(text, &SanitizeOptions::default()).text,
            Self::Vtt => sanitize_vtt_cue(text),
            Self::Plain => sanitize_plain_text(text),
            Self::Dom => sanitize_for_dom(text),
            Self::Translation => sanitize_translation(text),
        }
    }

    /// Apply the preset to every cue, with an optional character limit.
    ///
    /// The limit only applies to presets built on the configurable sanitizer.
    pub fn apply_to_cues(&self, cues: &[Cue], max_length: Option<usize>) -> BatchSanitizeResult {
        let options = match self {
            Self::Default => Some(SanitizeOptions::default()),
            Self::Vtt => Some(SanitizeOptions::VTT_CUE),
            Self::Plain => Some(SanitizeOptions::PLAIN_TEXT),
            Self::None | Self::Dom | Self::Translation => None,
        };

        if let Some(mut options) = options {
            options.max_length = max_length;
            return sanitize_cues_with(cues, &options);
        }

        let mut total_modified = 0;
        let cues = cues
            .iter()
            .map(|cue| {
                let text = self.apply(&cue.text);
                if text != cue.text {
                    total_modified += 1;
                }
                cue.with_text(text)
            })
            .collect();

        BatchSanitizeResult {
            cues,
            total_modified,
        }
    }

    /// Lowercase preset name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Default => "default",
            Self::Vtt => "vtt",
            Self::Plain => "plain",
            Self::Dom => "dom",
            Self::Translation => "translation",
        }
    }
}

impl fmt::Display for SanitizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SanitizePreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "default" => Ok(Self::Default),
            "vtt" => Ok(Self::Vtt),
            "plain" => Ok(Self::Plain),
            "dom" => Ok(Self::Dom),
            "translation" => Ok(Self::Translation),
            _ => Err(anyhow::anyhow!("Invalid sanitize preset: {}", s)),
        }
    }
}
