//! Structural section vocabulary and the local presence fallback used when
//! the scoring service omits its section map.

use std::collections::BTreeMap;

/// The fixed vocabulary of recognized resume section labels.
pub const SECTION_LABELS: [&str; 10] = [
    "summary",
    "objective",
    "experience",
    "employment",
    "work history",
    "education",
    "skills",
    "projects",
    "certifications",
    "awards",
];

/// Computes section presence by case-insensitive containment over the
/// extracted text. Presence affects reporting only — the highlighter wraps
/// every recognized label it finds regardless of this flag.
pub fn detect_sections(text: &str) -> BTreeMap<String, bool> {
    let lower = text.to_lowercase();
    SECTION_LABELS
        .iter()
        .map(|label| (label.to_string(), lower.contains(label)))
        .collect()
}
