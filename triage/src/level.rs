//! Triage scale and the keyword classifier.
//!
//! DESIGN
//! ======
//! The upstream model answers in free text. Its system instruction asks it to
//! label the case with one of three marker tokens, and [`classify_text`] scans
//! the reply for those markers (or their plain-English phrases) in a fixed
//! order: severe, then mild, then moderate. Anything unrecognized falls back to
//! [`TriageLevel::Moderate`] so a wording change upstream can never silently
//! under-triage a case as low risk.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker token the system instruction asks the model to emit for severe cases.
pub const SEVERE_MARKER: &str = "🔴 Severe";
/// Marker token for mild (self-care) cases.
pub const MILD_MARKER: &str = "🟢 Mild";
/// Marker token for moderate cases.
pub const MODERATE_MARKER: &str = "🟡 Moderate";

/// Checked in order; the first rule whose marker or phrase appears wins.
const RULES: [(&str, &str, TriageLevel); 3] = [
    (SEVERE_MARKER, "seek immediate care", TriageLevel::Severe),
    (MILD_MARKER, "self-care at home", TriageLevel::Low),
    (MODERATE_MARKER, "see doctor soon", TriageLevel::Moderate),
];

/// Level assigned when no rule matches.
pub const FALLBACK_LEVEL: TriageLevel = TriageLevel::Moderate;

/// Coarse severity of a symptom description.
///
/// Serialized with the external colour names: `green`, `yellow`, `red`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriageLevel {
    /// Self-care at home.
    #[serde(rename = "green")]
    Low,
    /// See a doctor soon.
    #[serde(rename = "yellow")]
    Moderate,
    /// Seek immediate care.
    #[serde(rename = "red")]
    Severe,
}

impl TriageLevel {
    /// External colour name used on the wire.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Moderate => "yellow",
            Self::Severe => "red",
        }
    }

    /// Severity badge shown next to an assistant turn.
    #[must_use]
    pub fn badge(self) -> &'static str {
        match self {
            Self::Low => "Low Risk - Monitor at Home",
            Self::Moderate => "Moderate - See Doctor Soon",
            Self::Severe => "High Risk - Seek Immediate Care",
        }
    }
}

impl fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Classify raw model output into a triage level.
///
/// Marker tokens match exactly; phrases match case-insensitively. The order of
/// checks is significant: cautionary text often mentions milder options next
/// to a severe label, so severe wins over mild, and mild wins over moderate.
#[must_use]
pub fn classify_text(text: &str) -> TriageLevel {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find(|(marker, phrase, _)| text.contains(marker) || lower.contains(phrase))
        .map_or(FALLBACK_LEVEL, |&(_, _, level)| level)
}

#[cfg(test)]
#[path = "level_test.rs"]
mod tests;
