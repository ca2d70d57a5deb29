use super::*;

// =============================================================================
// classify_text: markers
// =============================================================================

#[test]
fn severe_marker_is_severe() {
    assert_eq!(classify_text("**Triage Level:** 🔴 Severe"), TriageLevel::Severe);
}

#[test]
fn mild_marker_is_low() {
    assert_eq!(classify_text("**Triage Level:** 🟢 Mild"), TriageLevel::Low);
}

#[test]
fn moderate_marker_is_moderate() {
    assert_eq!(classify_text("**Triage Level:** 🟡 Moderate"), TriageLevel::Moderate);
}

#[test]
fn marker_match_is_exact() {
    // Lowercased marker word without the phrase does not count.
    assert_eq!(classify_text("🔴 severe pain noted"), TriageLevel::Moderate);
    assert_eq!(classify_text("🟢 mild case"), TriageLevel::Moderate);
}

// =============================================================================
// classify_text: phrases
// =============================================================================

#[test]
fn phrases_match_case_insensitively() {
    assert_eq!(classify_text("Please SEEK IMMEDIATE CARE."), TriageLevel::Severe);
    assert_eq!(classify_text("Self-Care at Home is fine for now."), TriageLevel::Low);
    assert_eq!(classify_text("You should See Doctor Soon."), TriageLevel::Moderate);
}

// =============================================================================
// classify_text: precedence and fallback
// =============================================================================

#[test]
fn severe_beats_mild() {
    let text = "🟢 Mild symptoms can escalate. 🔴 Severe: seek immediate care if breathing worsens.";
    assert_eq!(classify_text(text), TriageLevel::Severe);
}

#[test]
fn mild_beats_moderate() {
    let text = "🟡 Moderate concerns are unlikely; 🟢 Mild (Self-care at Home).";
    assert_eq!(classify_text(text), TriageLevel::Low);
}

#[test]
fn severe_phrase_beats_mild_marker() {
    assert_eq!(classify_text("🟢 Mild, but seek immediate care if fever exceeds 40C"), TriageLevel::Severe);
}

#[test]
fn unrecognized_text_falls_back_to_moderate() {
    assert_eq!(classify_text("I could not determine anything useful."), TriageLevel::Moderate);
    assert_eq!(classify_text("Unable to analyze symptoms"), FALLBACK_LEVEL);
}

#[test]
fn empty_text_falls_back_to_moderate() {
    assert_eq!(classify_text(""), TriageLevel::Moderate);
}

#[test]
fn full_instruction_echo_is_severe() {
    // A model that parrots the whole label menu contains every marker.
    let echoed = "One of these — 🟢 Mild (Self-care at Home), 🟡 Moderate (See Doctor Soon), 🔴 Severe (Seek Immediate Care)";
    assert_eq!(classify_text(echoed), TriageLevel::Severe);
}

// =============================================================================
// wire names
// =============================================================================

#[test]
fn serializes_as_colour_names() {
    assert_eq!(serde_json::to_string(&TriageLevel::Low).unwrap(), "\"green\"");
    assert_eq!(serde_json::to_string(&TriageLevel::Moderate).unwrap(), "\"yellow\"");
    assert_eq!(serde_json::to_string(&TriageLevel::Severe).unwrap(), "\"red\"");
}

#[test]
fn rejects_unknown_colour() {
    assert!(serde_json::from_str::<TriageLevel>("\"purple\"").is_err());
}

#[test]
fn display_matches_wire_name() {
    for level in [TriageLevel::Low, TriageLevel::Moderate, TriageLevel::Severe] {
        assert_eq!(level.to_string(), level.wire_name());
    }
}

#[test]
fn badges_name_the_action() {
    assert!(TriageLevel::Severe.badge().contains("Seek Immediate Care"));
    assert!(TriageLevel::Moderate.badge().contains("See Doctor Soon"));
    assert!(TriageLevel::Low.badge().contains("Monitor at Home"));
}
