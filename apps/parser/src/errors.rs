use thiserror::Error;

use crate::llm_client::LlmError;

/// Errors raised by the parsing capability.
/// The binary never recovers from these; they are reported on stderr and the
/// process exits non-zero.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Resume file not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl From<zip::result::ZipError> for ParseError {
    fn from(e: zip::result::ZipError) -> Self {
        ParseError::Docx(e.to_string())
    }
}

impl From<quick_xml::Error> for ParseError {
    fn from(e: quick_xml::Error) -> Self {
        ParseError::Docx(e.to_string())
    }
}
