//! Review session state — the single active review and its freshness rules.
//!
//! Document conversion is asynchronous, so a conversion result can arrive
//! after the document it was started for has been replaced. Each selection
//! bumps a generation marker; a conversion result carries the marker from
//! request time and commits only while it still matches. Freshness wins, not
//! completion order.

use bytes::Bytes;
use serde::Serialize;

use crate::review::document::{DocumentFormat, SourceDocument};
use crate::review::highlight::{annotate_markup, annotate_plain, HighlightSpec};

/// The representation selected for display. Rich markup takes precedence
/// over plain text whenever it is available; the plain variant is rendered
/// by clients in a fixed-width viewer.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", content = "content", rename_all = "lowercase")]
pub enum ReviewView {
    Rich(String),
    Plain(String),
}

/// Annotates and selects the displayed representation for one review.
pub fn render_view(text: &str, markup: Option<&str>, spec: &HighlightSpec) -> ReviewView {
    match markup {
        Some(m) => ReviewView::Rich(annotate_markup(m, spec)),
        None => ReviewView::Plain(annotate_plain(text, spec)),
    }
}

/// State for the single active review session. Not shared across sessions
/// and never persisted; the surrounding mutex is the only synchronization.
#[derive(Debug, Default)]
pub struct ReviewSession {
    generation: u64,
    document: Option<SourceDocument>,
    markup: Option<String>,
    /// In-memory handle for direct client preview (PDF only). Released
    /// whenever the document changes or the session ends.
    preview: Option<Bytes>,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selected document wholesale, invalidating any in-flight
    /// conversion and releasing the previous preview handle. Returns the
    /// generation marker conversion results must present at commit time.
    pub fn select_document(&mut self, document: SourceDocument) -> u64 {
        self.generation += 1;
        self.markup = None;
        self.preview = match document.format {
            DocumentFormat::Pdf => Some(document.content.clone()),
            _ => None,
        };
        self.document = Some(document);
        self.generation
    }

    /// Whether a marker still refers to the currently selected document.
    pub fn is_current(&self, marker: u64) -> bool {
        self.document.is_some() && marker == self.generation
    }

    /// Commits a conversion result if its marker is still current. A stale
    /// result is discarded regardless of completion order.
    pub fn commit_markup(&mut self, marker: u64, markup: String) -> bool {
        if !self.is_current(marker) {
            return false;
        }
        self.markup = Some(markup);
        true
    }

    pub fn markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }

    pub fn document(&self) -> Option<&SourceDocument> {
        self.document.as_ref()
    }

    pub fn preview(&self) -> Option<Bytes> {
        self.preview.clone()
    }

    /// Ends the session, releasing the document, markup, and preview handle.
    /// The generation still advances so any in-flight result stays stale.
    pub fn close(&mut self) {
        self.generation += 1;
        self.document = None;
        self.markup = None;
        self.preview = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::highlight::MarkClasses;

    fn doc(name: &str, content_type: Option<&str>) -> SourceDocument {
        SourceDocument::new(name.into(), content_type, Bytes::from_static(b"bytes"))
    }

    #[test]
    fn test_stale_conversion_is_discarded_after_reselection() {
        let mut session = ReviewSession::new();
        let marker_a = session.select_document(doc("a.docx", None));
        let marker_b = session.select_document(doc("b.docx", None));

        // A's conversion resolves late, after B was selected.
        assert!(!session.commit_markup(marker_a, "<p>A</p>".into()));
        assert_eq!(session.markup(), None);

        assert!(session.commit_markup(marker_b, "<p>B</p>".into()));
        assert_eq!(session.markup(), Some("<p>B</p>"));
        assert_eq!(session.document().unwrap().file_name, "b.docx");
    }

    #[test]
    fn test_late_stale_result_cannot_overwrite_fresh_one() {
        let mut session = ReviewSession::new();
        let marker_a = session.select_document(doc("a.docx", None));
        let marker_b = session.select_document(doc("b.docx", None));

        // B's conversion completes first, then A's arrives even later.
        assert!(session.commit_markup(marker_b, "<p>B</p>".into()));
        assert!(!session.commit_markup(marker_a, "<p>A</p>".into()));
        assert_eq!(session.markup(), Some("<p>B</p>"));
    }

    #[test]
    fn test_reselection_clears_previous_markup() {
        let mut session = ReviewSession::new();
        let marker = session.select_document(doc("a.docx", None));
        assert!(session.commit_markup(marker, "<p>A</p>".into()));

        session.select_document(doc("b.docx", None));
        assert_eq!(session.markup(), None);
    }

    #[test]
    fn test_preview_handle_held_for_pdf_and_released_on_change() {
        let mut session = ReviewSession::new();
        session.select_document(doc("a.pdf", Some("application/pdf")));
        assert!(session.preview().is_some());

        session.select_document(doc("b.docx", None));
        assert!(session.preview().is_none());
    }

    #[test]
    fn test_close_releases_state_and_invalidates_markers() {
        let mut session = ReviewSession::new();
        let marker = session.select_document(doc("a.pdf", Some("application/pdf")));
        session.close();

        assert!(session.document().is_none());
        assert!(session.preview().is_none());
        assert!(!session.commit_markup(marker, "<p>late</p>".into()));
    }

    #[test]
    fn test_rich_view_takes_precedence_over_plain() {
        let spec = HighlightSpec {
            missing: vec!["python".into()],
            matched: vec![],
            sections: vec![],
            classes: MarkClasses::default(),
        };
        let view = render_view("Python dev", Some("<p>Python dev</p>"), &spec);
        assert_eq!(
            view,
            ReviewView::Rich("<p><mark class=\"kw-missing\">Python</mark> dev</p>".into())
        );

        let view = render_view("Python dev", None, &spec);
        assert_eq!(
            view,
            ReviewView::Plain("<mark class=\"kw-missing\">Python</mark> dev".into())
        );
    }
}
