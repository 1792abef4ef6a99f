//! Highlight Renderer — wraps keyword and section-heading occurrences in
//! `<mark>` elements without deleting or reordering any original content.
//!
//! Three ordered passes: missing keywords, then matched keywords, then
//! recognized section headings. Matching is case-insensitive and whole-word;
//! the replacement reinserts the exact matched substring, so displayed casing
//! is never altered. The transformation is additive and NOT idempotent:
//! re-applying it to already-annotated output will nest markers inside the
//! previously inserted ones. That is accepted behavior, not a defect.
//!
//! For rich markup the input is lexed into tag and text segments and the
//! passes run over text segments only, so existing tag syntax can never be
//! corrupted. Words split across inline tags (`Py<b>thon</b>`) are not
//! matched; that limitation is inherent to segment-local matching.

use regex::{Captures, Regex};

/// CSS class names attached to the inserted markers. These are stable
/// semantic names; light/dark theming is a stylesheet concern on the client
/// and never changes which text gets wrapped.
#[derive(Debug, Clone)]
pub struct MarkClasses {
    pub missing: &'static str,
    pub matched: &'static str,
    pub section: &'static str,
}

impl Default for MarkClasses {
    fn default() -> Self {
        Self {
            missing: "kw-missing",
            matched: "kw-matched",
            section: "section-heading",
        }
    }
}

/// The ordered rule list for one rendering: which keywords and section
/// labels to wrap, and under which classes.
#[derive(Debug, Clone, Default)]
pub struct HighlightSpec {
    pub missing: Vec<String>,
    pub matched: Vec<String>,
    /// Section labels to wrap. Presence flags are reporting-only and must
    /// not influence this list.
    pub sections: Vec<String>,
    pub classes: MarkClasses,
}

/// Applies the three passes over a plain-text string.
pub fn annotate_plain(text: &str, spec: &HighlightSpec) -> String {
    apply_passes(text, spec)
}

/// Applies the three passes over a rich-markup string, touching text
/// segments only. Tag segments (anything from `<` to the next `>`) pass
/// through byte-for-byte; an unterminated tag passes through untouched.
pub fn annotate_markup(markup: &str, spec: &HighlightSpec) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(tag_start) = rest.find('<') {
        let (text, tail) = rest.split_at(tag_start);
        out.push_str(&apply_passes(text, spec));
        match tail.find('>') {
            Some(tag_end) => {
                out.push_str(&tail[..=tag_end]);
                rest = &tail[tag_end + 1..];
            }
            None => {
                out.push_str(tail);
                return out;
            }
        }
    }
    out.push_str(&apply_passes(rest, spec));
    out
}

fn apply_passes(text: &str, spec: &HighlightSpec) -> String {
    let annotated = wrap_keywords(text, &spec.missing, spec.classes.missing);
    let annotated = wrap_keywords(&annotated, &spec.matched, spec.classes.matched);
    wrap_sections(&annotated, &spec.sections, spec.classes.section)
}

fn wrap_keywords(text: &str, keywords: &[String], class: &str) -> String {
    let mut out = text.to_string();
    for keyword in keywords {
        if keyword.is_empty() {
            continue;
        }
        let pattern = keyword_pattern(keyword);
        out = pattern
            .replace_all(&out, |caps: &Captures| {
                format!("<mark class=\"{class}\">{}</mark>", &caps[0])
            })
            .into_owned();
    }
    out
}

/// Wraps each section heading found at a line start, leaving any leading
/// whitespace and trailing colon in place outside the marker.
fn wrap_sections(text: &str, labels: &[String], class: &str) -> String {
    let mut out = text.to_string();
    for label in labels {
        if label.is_empty() {
            continue;
        }
        let pattern = heading_pattern(label);
        out = pattern
            .replace_all(&out, |caps: &Captures| {
                format!("{}<mark class=\"{class}\">{}</mark>{}", &caps[1], &caps[2], &caps[3])
            })
            .into_owned();
    }
    out
}

// Keyword text is escaped before compilation, so arbitrary input can never
// produce an invalid or semantically different pattern. A failure here is a
// programming defect, not a runtime condition.
fn keyword_pattern(keyword: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword)))
        .expect("escaped keyword should compile")
}

fn heading_pattern(label: &str) -> Regex {
    Regex::new(&format!(r"(?im)^([ \t]*)({})([ \t]*:|)", regex::escape(label)))
        .expect("escaped section label should compile")
}
