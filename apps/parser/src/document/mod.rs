//! Document text extraction — turns a resume file on disk into plain text.
//!
//! Format is chosen from the file extension. PDF goes through `pdf-extract`,
//! DOCX through the zip container's `word/document.xml`, everything text-like
//! is read as (lossy) UTF-8.

use std::path::Path;

use tracing::{debug, info};

use crate::errors::ParseError;

pub mod docx;
pub mod pdf;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// Detects the format from the path's extension (case-insensitive).
    /// A path without an extension is treated as plain text.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("pdf") => Ok(DocumentFormat::Pdf),
            Some("docx") => Ok(DocumentFormat::Docx),
            None | Some("txt") | Some("text") | Some("md") => Ok(DocumentFormat::PlainText),
            Some(other) => Err(ParseError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Text pulled out of a resume document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedDocument {
    pub text: String,
    /// Only known for paginated formats (PDF).
    pub page_count: Option<usize>,
}

impl ExtractedDocument {
    pub fn from_text(text: &str) -> Self {
        Self {
            text: normalize_text(text),
            page_count: None,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Reads and extracts the document at `path`.
pub async fn extract_document(path: &Path) -> Result<ExtractedDocument, ParseError> {
    let format = DocumentFormat::from_path(path)?;

    let bytes = match tokio::fs::read(path).await {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ParseError::FileNotFound(path.display().to_string()));
        }
        Err(e) => return Err(ParseError::Io(e)),
    };
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    let document = extract_bytes(format, &bytes)?;
    info!(
        "Extracted {} chars from {:?} document (pages: {:?})",
        document.text.len(),
        format,
        document.page_count
    );
    Ok(document)
}

/// Extracts text from an in-memory document of a known format.
pub fn extract_bytes(format: DocumentFormat, bytes: &[u8]) -> Result<ExtractedDocument, ParseError> {
    match format {
        DocumentFormat::Pdf => {
            let pages = pdf::extract_pages(bytes)?;
            Ok(ExtractedDocument {
                text: normalize_text(&pages.join("\n")),
                page_count: Some(pages.len()),
            })
        }
        DocumentFormat::Docx => Ok(ExtractedDocument::from_text(&docx::extract_text(bytes)?)),
        DocumentFormat::PlainText => Ok(ExtractedDocument::from_text(&String::from_utf8_lossy(
            bytes,
        ))),
    }
}

/// Unifies line endings and drops control characters extractors leave behind.
fn normalize_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|c| *c != '\0' && *c != '\u{c}')
        .collect()
}
