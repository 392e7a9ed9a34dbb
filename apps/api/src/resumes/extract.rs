//! Uploaded document → plain text.
//!
//! PDF extraction is CPU-bound and can panic on malformed input, so it runs on
//! the blocking pool where a panic surfaces as a `JoinError` instead of taking
//! down the worker.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported document type '{0}', upload a PDF or plain-text file")]
    Unsupported(String),

    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("document contains no text")]
    Empty,
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Unsupported(_) => AppError::UnsupportedMediaType(err.to_string()),
            ExtractError::Pdf(_) | ExtractError::Empty => AppError::Extraction(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Decides from the declared content type, then the file extension, then
    /// the leading bytes. Clients often send `application/octet-stream`.
    pub fn detect(
        content_type: Option<&str>,
        file_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<Self, ExtractError> {
        let mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase())
            .unwrap_or_default();
        match mime.as_str() {
            "application/pdf" => return Ok(Self::Pdf),
            "text/plain" | "text/markdown" => return Ok(Self::PlainText),
            _ => {}
        }

        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => return Ok(Self::Pdf),
            Some("txt" | "md" | "markdown") => return Ok(Self::PlainText),
            _ => {}
        }

        if bytes.starts_with(PDF_MAGIC) {
            return Ok(Self::Pdf);
        }

        let label = match (mime.is_empty(), file_name) {
            (false, _) => mime,
            (true, Some(name)) => name.to_string(),
            (true, None) => "unknown".to_string(),
        };
        Err(ExtractError::Unsupported(label))
    }
}

pub async fn extract_text(kind: DocumentKind, bytes: Bytes) -> Result<String, ExtractError> {
    let text = match kind {
        DocumentKind::PlainText => String::from_utf8_lossy(&bytes).into_owned(),
        DocumentKind::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
        })
        .await
        .map_err(|e| ExtractError::Pdf(format!("extraction task failed: {e}")))??,
    };

    if text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }
    debug!(?kind, chars = text.len(), "extracted document text");
    Ok(text)
}
