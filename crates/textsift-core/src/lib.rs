use std::sync::Arc;

use thiserror::Error;

pub mod config;
pub mod config_file;
pub mod strategy;
pub mod text;

// Re-export for convenience
pub use config::ExtractionConfig;
pub use strategy::{ExtractionAttempt, PdfStrategy, StrategyError, StrategyFuture};
pub use text::normalize_whitespace;

/// An uploaded document handed to the extraction pipeline.
///
/// Immutable: raw bytes, the caller-declared media type, and the original
/// file name. The bytes are reference-counted so strategies can hand a
/// cheap clone to a blocking worker without copying the buffer.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    bytes: Arc<[u8]>,
    media_type: String,
    file_name: String,
}

impl SourceDocument {
    pub fn new(
        bytes: impl Into<Arc<[u8]>>,
        media_type: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
            file_name: file_name.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// A shared handle to the raw bytes, for moving into blocking tasks.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Resolve the document's format from its declared media type, falling
    /// back to the file extension. `None` means unsupported.
    pub fn format(&self) -> Option<DocumentFormat> {
        DocumentFormat::resolve(&self.media_type, &self.file_name)
    }
}

/// The three recognized input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    pub const PDF_MEDIA_TYPE: &'static str = "application/pdf";
    pub const DOCX_MEDIA_TYPE: &'static str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
    pub const TEXT_MEDIA_TYPE: &'static str = "text/plain";

    /// Resolve a format from a declared media type and file name.
    ///
    /// The media type wins when it is one of the recognized values;
    /// otherwise the lowercased file extension decides.
    pub fn resolve(media_type: &str, file_name: &str) -> Option<Self> {
        match media_type {
            Self::PDF_MEDIA_TYPE => return Some(Self::Pdf),
            Self::DOCX_MEDIA_TYPE => return Some(Self::Docx),
            Self::TEXT_MEDIA_TYPE => return Some(Self::PlainText),
            _ => {}
        }
        let name = file_name.to_lowercase();
        if name.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if name.ends_with(".docx") {
            Some(Self::Docx)
        } else if name.ends_with(".txt") {
            Some(Self::PlainText)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::PlainText => "text",
        }
    }
}

/// Terminal extraction failure surfaced to the caller.
///
/// For PDFs the message aggregates every strategy's original error text so
/// a human can diagnose which failure mode applies; for DOCX and plain text
/// it carries the single underlying error plus a format suggestion.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unsupported file type `{0}`: upload a PDF, DOCX, or TXT file")]
    UnsupportedType(String),
    #[error("file is empty or corrupt: {0}")]
    EmptyOrCorrupt(String),
    #[error("document is password protected: {0}")]
    ProtectedOrEncrypted(String),
    #[error("extraction timed out: {0}")]
    Timeout(String),
    #[error("no extractable text: {0}")]
    NoExtractableText(String),
    #[error("extraction failed: {0}")]
    UnknownParsingFailure(String),
}

impl ExtractError {
    /// Stable machine-readable tag for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedType(_) => "unsupported_type",
            Self::EmptyOrCorrupt(_) => "empty_or_corrupt",
            Self::ProtectedOrEncrypted(_) => "protected_or_encrypted",
            Self::Timeout(_) => "timeout",
            Self::NoExtractableText(_) => "no_extractable_text",
            Self::UnknownParsingFailure(_) => "unknown_parsing_failure",
        }
    }
}
