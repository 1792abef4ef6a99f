//! Document-conversion capability — turns rich binary documents (DOCX) into
//! HTML markup. Pluggable behind a trait so the backend can be swapped
//! without touching the review pipeline; carried in `AppState` as
//! `Arc<dyn DocumentConverter>`.
//!
//! Conversion failure is always non-fatal: the caller logs it, leaves rich
//! markup absent, and continues on the plain-text path.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use thiserror::Error;

use crate::review::document::DOCX_MIME;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Conversion service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Conversion service returned empty markup")]
    EmptyMarkup,
}

#[async_trait]
pub trait DocumentConverter: Send + Sync {
    /// Converts raw rich-document bytes into an HTML markup string.
    async fn to_markup(&self, content: &[u8]) -> Result<String, ConvertError>;
}

/// Converter backed by an HTTP conversion service: POST the raw document,
/// receive the markup as the response body.
pub struct HttpDocumentConverter {
    client: Client,
    url: String,
}

impl HttpDocumentConverter {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            url,
        }
    }
}

#[async_trait]
impl DocumentConverter for HttpDocumentConverter {
    async fn to_markup(&self, content: &[u8]) -> Result<String, ConvertError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, DOCX_MIME)
            .body(content.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ConvertError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let markup = response.text().await?;
        if markup.trim().is_empty() {
            return Err(ConvertError::EmptyMarkup);
        }
        Ok(markup)
    }
}
