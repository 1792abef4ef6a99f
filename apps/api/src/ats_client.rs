/// ATS capability client — the single point of entry for the scoring and
/// refine-export services.
///
/// ARCHITECTURAL RULE: no other module may call the ATS service directly.
/// All scoring and refine traffic goes through this module.
use std::collections::BTreeMap;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const SCORE_PATH: &str = "/api/score";
const REFINE_PATH: &str = "/api/refine";
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum AtsClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ATS service error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Per-dimension scores as reported by the scoring service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_match: u32,
    pub formatting: u32,
    pub sections: u32,
    pub contact: u32,
    pub length: u32,
}

/// Scoring response. Everything beyond the score triple is optional; each
/// absent field triggers a local fallback in the review pipeline. The
/// keyword arrays in particular are tri-state: absent means "not computed",
/// present (even empty) means computed and authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub ats_score: u32,
    pub breakdown: ScoreBreakdown,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub extracted: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub matched_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub missing_keywords: Option<Vec<String>>,
    #[serde(default)]
    pub sections_present: Option<BTreeMap<String, bool>>,
    #[serde(default)]
    pub word_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: String,
}

/// HTTP client for the ATS service.
#[derive(Clone)]
pub struct AtsClient {
    client: Client,
    base_url: String,
}

impl AtsClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Submits the document for scoring. Any failure is fatal to the
    /// submission; callers must not display a partial result.
    pub async fn score(
        &self,
        file_name: &str,
        content: Bytes,
        job_description: &str,
    ) -> Result<ScoreResponse, AtsClientError> {
        let response = self
            .client
            .post(format!("{}{SCORE_PATH}", self.base_url))
            .multipart(upload_form(file_name, content, job_description))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AtsClientError::Api {
                status: status.as_u16(),
                message: extract_error_detail(&body),
            });
        }

        let scored: ScoreResponse = response.json().await?;
        debug!(
            "scoring succeeded: ats_score={}, suggestions={}",
            scored.ats_score,
            scored.suggestions.len()
        );
        Ok(scored)
    }

    /// Requests a refined version of the document. Returns the raw binary on
    /// success; callers leave review state untouched on failure.
    pub async fn refine(
        &self,
        file_name: &str,
        content: Bytes,
        job_description: &str,
    ) -> Result<Bytes, AtsClientError> {
        let response = self
            .client
            .post(format!("{}{REFINE_PATH}", self.base_url))
            .multipart(upload_form(file_name, content, job_description))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AtsClientError::Api {
                status: status.as_u16(),
                message: extract_error_detail(&body),
            });
        }

        Ok(response.bytes().await?)
    }
}

fn upload_form(file_name: &str, content: Bytes, job_description: &str) -> Form {
    let part = Part::bytes(content.to_vec()).file_name(file_name.to_string());
    Form::new()
        .part("file", part)
        .text("job_description", job_description.to_string())
}

/// Pulls the `detail` message out of a service error body, falling back to
/// the raw body when it isn't the expected shape.
fn extract_error_detail(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|e| e.detail)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_detail_from_service_body() {
        let body = r#"{"detail": "unsupported file type"}"#;
        assert_eq!(extract_error_detail(body), "unsupported file type");
    }

    #[test]
    fn test_extract_error_detail_falls_back_to_raw_body() {
        assert_eq!(extract_error_detail("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn test_score_response_minimal_fields_deserialize() {
        let json = r#"{
            "ats_score": 72,
            "breakdown": {
                "keyword_match": 64, "formatting": 85, "sections": 70,
                "contact": 100, "length": 90
            },
            "suggestions": ["Add a skills section."]
        }"#;
        let scored: ScoreResponse = serde_json::from_str(json).unwrap();
        assert_eq!(scored.ats_score, 72);
        assert_eq!(scored.breakdown.keyword_match, 64);
        assert!(scored.resume_text.is_none());
        assert!(scored.matched_keywords.is_none());
        assert!(scored.sections_present.is_none());
    }

    #[test]
    fn test_score_response_empty_keyword_arrays_stay_present() {
        let json = r#"{
            "ats_score": 50,
            "breakdown": {
                "keyword_match": 50, "formatting": 50, "sections": 50,
                "contact": 50, "length": 50
            },
            "matched_keywords": [],
            "missing_keywords": []
        }"#;
        let scored: ScoreResponse = serde_json::from_str(json).unwrap();
        // Present-but-empty must be distinguishable from absent.
        assert_eq!(scored.matched_keywords, Some(vec![]));
        assert_eq!(scored.missing_keywords, Some(vec![]));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = AtsClient::new("http://scorer:8000/".into());
        assert_eq!(client.base_url, "http://scorer:8000");
    }
}
