//! Review endpoints — drive the full data flow: normalize, derive keyword
//! sets, render highlights, select the displayed view.

use std::collections::BTreeMap;

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::ats_client::ScoreBreakdown;
use crate::errors::AppError;
use crate::review::document::{SourceDocument, DOCX_MIME, PDF_MIME};
use crate::review::highlight::{HighlightSpec, MarkClasses};
use crate::review::keywords::{self, KeywordSource};
use crate::review::normalize;
use crate::review::sections;
use crate::review::session::{render_view, ReviewView};
use crate::state::AppState;

/// Full review payload returned to the client.
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub ats_score: u32,
    pub breakdown: ScoreBreakdown,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<BTreeMap<String, String>>,
    pub extracted_text: String,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub keyword_source: KeywordSource,
    pub sections_present: BTreeMap<String, bool>,
    pub word_count: u64,
    /// The annotated representation selected for display.
    pub view: ReviewView,
}

/// POST /api/v1/review
///
/// Selects the uploaded document, scores it, converts rich formats, and
/// returns the annotated review. If a newer document is selected while this
/// submission is in flight, the stale submission is rejected at commit time.
pub async fn handle_review(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ReviewResponse>, AppError> {
    let (document, job_description) = read_submission(&mut multipart).await?;
    let file_name = document.file_name.clone();
    let format = document.format;
    let content = document.content.clone();

    let marker = state.session.lock().await.select_document(document);

    // Scoring is fatal to this submission; no partial result is displayed.
    let scored = state
        .ats
        .score(&file_name, content.clone(), &job_description)
        .await
        .map_err(AppError::scoring)?;

    // Rich formats get a markup representation. Failure degrades to the
    // plain-text path.
    let markup = if format.requires_rich_markup() {
        match state.converter.to_markup(&content).await {
            Ok(m) => Some(m),
            Err(e) => {
                warn!("document conversion failed, continuing with plain text: {e}");
                None
            }
        }
    } else {
        None
    };

    // Freshness check at commit time: only results for the currently
    // selected document may reach displayed state.
    let markup = {
        let mut session = state.session.lock().await;
        if !session.is_current(marker) {
            return Err(AppError::Superseded);
        }
        if let Some(m) = markup {
            session.commit_markup(marker, m);
        }
        session.markup().map(str::to_string)
    };

    let text = normalize::resolve_text(scored.resume_text.as_deref(), markup.as_deref());

    let keyword_sets = keywords::resolve(
        scored.matched_keywords,
        scored.missing_keywords,
        &job_description,
        &text,
    );
    let sections_present = scored
        .sections_present
        .unwrap_or_else(|| sections::detect_sections(&text));
    let word_count = scored
        .word_count
        .unwrap_or_else(|| normalize::word_count(&text));

    let spec = HighlightSpec {
        missing: keyword_sets.missing.clone(),
        matched: keyword_sets.matched.clone(),
        // Every recognized label is wrapped; presence flags are
        // reporting-only.
        sections: sections_present.keys().cloned().collect(),
        classes: MarkClasses::default(),
    };
    let view = render_view(&text, markup.as_deref(), &spec);

    Ok(Json(ReviewResponse {
        ats_score: scored.ats_score,
        breakdown: scored.breakdown,
        suggestions: scored.suggestions,
        contact_info: scored.extracted,
        extracted_text: text,
        matched_keywords: keyword_sets.matched,
        missing_keywords: keyword_sets.missing,
        keyword_source: keyword_sets.source,
        sections_present,
        word_count,
        view,
    }))
}

/// POST /api/v1/review/refine
///
/// Proxies the refine-export capability and streams back the returned
/// binary under a deterministic attachment name. Failure leaves all review
/// state unchanged.
pub async fn handle_refine(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let (document, job_description) = read_submission(&mut multipart).await?;

    let refined = state
        .ats
        .refine(&document.file_name, document.content.clone(), &job_description)
        .await
        .map_err(AppError::refine)?;

    let name = refined_file_name(document.stem());
    Ok((
        [
            (header::CONTENT_TYPE, DOCX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{name}\""),
            ),
        ],
        refined,
    )
        .into_response())
}

/// GET /api/v1/review/preview
pub async fn handle_preview(State(state): State<AppState>) -> Result<Response, AppError> {
    let preview = state
        .session
        .lock()
        .await
        .preview()
        .ok_or_else(|| AppError::NotFound("No document preview available".to_string()))?;

    Ok(([(header::CONTENT_TYPE, PDF_MIME)], preview).into_response())
}

/// DELETE /api/v1/review
pub async fn handle_close(State(state): State<AppState>) -> StatusCode {
    state.session.lock().await.close();
    StatusCode::NO_CONTENT
}

async fn read_submission(
    multipart: &mut Multipart,
) -> Result<(SourceDocument, String), AppError> {
    let mut document: Option<SourceDocument> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(|ct| ct.to_string());
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
                document = Some(SourceDocument::new(
                    file_name,
                    content_type.as_deref(),
                    content,
                ));
            }
            Some("job_description") => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.to_string()))?;
            }
            _ => {}
        }
    }

    let document = document
        .ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;
    Ok((document, job_description))
}

fn refined_file_name(stem: &str) -> String {
    format!("refined_{stem}.docx")
}
