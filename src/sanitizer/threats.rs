/*!
 * Read-only threat detection over the shared pattern library.
 */

use serde::{Deserialize, Serialize};

use super::patterns::{ThreatTag, DANGEROUS_PATTERNS};
use crate::subtitle::Cue;

/// True when any dangerous pattern matches
pub fn contains_dangerous_content(text: &str) -> bool {
    DANGEROUS_PATTERNS.iter().any(|pattern| pattern.regex.is_match(text))
}

/// Distinct threat categories present in `text`, in library order
pub fn detect_threats(text: &str) -> Vec<ThreatTag> {
    let mut threats = Vec::new();
    for pattern in DANGEROUS_PATTERNS.iter() {
        if pattern.regex.is_match(text) && !threats.contains(&pattern.tag) {
            threats.push(pattern.tag);
        }
    }
    threats
}

/// Negation of [`contains_dangerous_content`]
pub fn is_subtitle_text_safe(text: &str) -> bool {
    !contains_dangerous_content(text)
}

/// Threats found in one cue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueThreats {
    /// Index of the cue
    pub index: usize,
    /// Categories matched in its text
    pub threats: Vec<ThreatTag>,
}

/// Audit a cue list, listing only cues with at least one threat
pub fn audit_cues(cues: &[Cue]) -> Vec<CueThreats> {
    cues.iter()
        .filter_map(|cue| {
            let threats = detect_threats(&cue.text);
            (!threats.is_empty()).then_some(CueThreats {
                index: cue.index,
                threats,
            })
        })
        .collect()
}
