//! Keyword Set Deriver — computes matched/missing keyword sets from the job
//! description and resume text when the scoring service did not supply them.
//!
//! Comparison is case-insensitive and whole-word only. A "word" is a maximal
//! run of ASCII alphabetic characters; tokens of length ≤ 2 are discarded.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The missing list is truncated to this many entries, preserving
/// job-description encounter order.
pub const MISSING_KEYWORD_CAP: usize = 50;

static ALPHA_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("alphabetic-run regex should compile"));

/// Where a keyword set came from. Service-supplied sets are authoritative and
/// are never merged with or overridden by local derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordSource {
    Service,
    Derived,
}

/// Matched/missing keyword sets for one review, plus their provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordSets {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub source: KeywordSource,
}

/// Extracts the ordered vocabulary of a text: maximal alphabetic runs,
/// lowercased, length > 2, deduplicated preserving first-encounter order.
pub fn vocabulary(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for m in ALPHA_RUNS.find_iter(text) {
        if m.as_str().len() <= 2 {
            continue;
        }
        let token = m.as_str().to_lowercase();
        if seen.insert(token.clone()) {
            ordered.push(token);
        }
    }
    ordered
}

/// Derives matched/missing sets by comparing JD vocabulary against resume
/// vocabulary. Both lists keep JD encounter order; missing is capped at
/// [`MISSING_KEYWORD_CAP`].
pub fn derive(job_description: &str, resume_text: &str) -> KeywordSets {
    let resume_vocab: HashSet<String> = vocabulary(resume_text).into_iter().collect();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for token in vocabulary(job_description) {
        if resume_vocab.contains(&token) {
            matched.push(token);
        } else if missing.len() < MISSING_KEYWORD_CAP {
            missing.push(token);
        }
    }

    KeywordSets {
        matched,
        missing,
        source: KeywordSource::Derived,
    }
}

/// Resolves the authoritative keyword sets for a review.
///
/// The scoring service reports keyword arrays as optional fields: an absent
/// array means "not computed" and triggers local derivation, while a present
/// array — even an empty one — is authoritative and passes through
/// unmodified.
pub fn resolve(
    service_matched: Option<Vec<String>>,
    service_missing: Option<Vec<String>>,
    job_description: &str,
    resume_text: &str,
) -> KeywordSets {
    if service_matched.is_some() || service_missing.is_some() {
        return KeywordSets {
            matched: service_matched.unwrap_or_default(),
            missing: service_missing.unwrap_or_default(),
            source: KeywordSource::Service,
        };
    }
    derive(job_description, resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_drops_short_tokens_and_dedups_in_order() {
        let vocab = vocabulary("Go is a language; go beats Go at go");
        // "go", "is", "a", "at" all have length ≤ 2
        assert_eq!(vocab, vec!["language", "beats"]);
    }

    #[test]
    fn test_vocabulary_splits_on_non_alphabetic() {
        let vocab = vocabulary("node.js/react_native c++17");
        assert_eq!(vocab, vec!["node", "react", "native"]);
    }

    #[test]
    fn test_derive_matches_spec_example() {
        let sets = derive(
            "Looking for a Python and SQL engineer",
            "Experienced Python developer",
        );
        assert_eq!(sets.matched, vec!["python"]);
        assert_eq!(sets.missing, vec!["looking", "and", "sql", "engineer"]);
        assert_eq!(sets.source, KeywordSource::Derived);
    }

    #[test]
    fn test_derive_matched_and_missing_are_disjoint() {
        let sets = derive(
            "Rust developer with Kubernetes and Rust experience",
            "Senior Rust engineer",
        );
        for kw in &sets.matched {
            assert!(!sets.missing.contains(kw), "{kw} appears in both sets");
        }
    }

    #[test]
    fn test_missing_capped_at_50_in_encounter_order() {
        let jd: String = (0..80)
            .map(|i| format!("keyword{} ", to_alpha(i)))
            .collect();
        let sets = derive(&jd, "");
        assert_eq!(sets.missing.len(), MISSING_KEYWORD_CAP);
        assert_eq!(sets.missing[0], "keywordaa");
        assert_eq!(sets.missing[49], format!("keyword{}", to_alpha(49)));
        assert!(sets.matched.is_empty());
    }

    #[test]
    fn test_empty_job_description_yields_empty_sets() {
        let sets = derive("", "Plenty of resume text here");
        assert!(sets.matched.is_empty());
        assert!(sets.missing.is_empty());
    }

    #[test]
    fn test_service_sets_pass_through_unmodified() {
        let sets = resolve(
            Some(vec!["python".into()]),
            Some(vec!["sql".into(), "docker".into()]),
            // Local derivation over these texts would disagree entirely.
            "Looking for a Java architect",
            "Kernel hacker",
        );
        assert_eq!(sets.source, KeywordSource::Service);
        assert_eq!(sets.matched, vec!["python"]);
        assert_eq!(sets.missing, vec!["sql", "docker"]);
    }

    #[test]
    fn test_service_empty_array_still_suppresses_derivation() {
        // Present-but-empty means "computed as truly empty", not "derive".
        let sets = resolve(Some(vec![]), None, "Python and SQL engineer", "");
        assert_eq!(sets.source, KeywordSource::Service);
        assert!(sets.matched.is_empty());
        assert!(sets.missing.is_empty());
    }

    #[test]
    fn test_absent_service_sets_trigger_derivation() {
        let sets = resolve(None, None, "Python engineer", "Python developer");
        assert_eq!(sets.source, KeywordSource::Derived);
        assert_eq!(sets.matched, vec!["python"]);
        assert_eq!(sets.missing, vec!["engineer"]);
    }

    /// Stable two-letter suffix so generated tokens stay unique and ordered.
    fn to_alpha(i: usize) -> String {
        let a = (b'a' + (i / 26) as u8) as char;
        let b = (b'a' + (i % 26) as u8) as char;
        format!("{a}{b}")
    }
}
