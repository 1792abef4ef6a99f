//! The uploaded source document under review.

use bytes::Bytes;
use serde::Serialize;

/// Document format classified from the upload's file name and content type,
/// mirroring how clients sniff for DOCX and PDF uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PDF_MIME: &str = "application/pdf";

impl DocumentFormat {
    pub fn classify(file_name: &str, content_type: Option<&str>) -> Self {
        let lower = file_name.to_lowercase();
        if content_type == Some(DOCX_MIME) || lower.ends_with(".docx") {
            DocumentFormat::Docx
        } else if content_type == Some(PDF_MIME) || lower.ends_with(".pdf") {
            DocumentFormat::Pdf
        } else {
            DocumentFormat::PlainText
        }
    }

    /// Whether this format has a rich-markup representation worth deriving.
    pub fn requires_rich_markup(self) -> bool {
        matches!(self, DocumentFormat::Docx)
    }
}

/// Immutable binary content plus format indicator. Replaced wholesale when
/// the user selects a new document.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub file_name: String,
    pub format: DocumentFormat,
    pub content: Bytes,
}

impl SourceDocument {
    pub fn new(file_name: String, content_type: Option<&str>, content: Bytes) -> Self {
        let format = DocumentFormat::classify(&file_name, content_type);
        Self {
            file_name,
            format,
            content,
        }
    }

    /// File name with its final extension stripped.
    pub fn stem(&self) -> &str {
        match self.file_name.rfind('.') {
            Some(idx) if idx > 0 => &self.file_name[..idx],
            _ => &self.file_name,
        }
    }
}
