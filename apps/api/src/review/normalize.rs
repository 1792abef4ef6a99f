//! Document Text Normalizer — produces the comparable plain-text
//! representation of the selected document.
//!
//! Precedence: an authoritative extracted text from the scoring service is
//! used verbatim; otherwise plain text is derived by stripping the rich
//! markup (text-node contents only) and collapsing whitespace runs to single
//! spaces; otherwise the text is empty.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

static WORD_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word-run regex should compile"));

/// Strips markup down to its text-node contents, collapsing all whitespace
/// runs to single spaces and trimming the ends.
pub fn strip_markup(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let chunks: Vec<&str> = fragment.root_element().text().collect();
    chunks
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Chooses the extracted text for a review: authoritative service text when
/// non-blank, else text derived from the rich markup, else empty.
pub fn resolve_text(authoritative: Option<&str>, markup: Option<&str>) -> String {
    if let Some(text) = authoritative {
        if !text.trim().is_empty() {
            return text.to_string();
        }
    }
    match markup {
        Some(m) => strip_markup(m),
        None => String::new(),
    }
}

/// Local word count fallback used when the scoring service omits it.
pub fn word_count(text: &str) -> u64 {
    WORD_CHARS.find_iter(text).count() as u64
}
