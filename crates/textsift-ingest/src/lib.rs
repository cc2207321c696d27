//! Dispatch an uploaded document to the right extraction handler.
//!
//! Formats are resolved from the declared media type with a file-extension
//! fallback:
//! - PDF → the multi-strategy chain in `textsift-pdf`
//! - DOCX → single-strategy raw-text extraction in `textsift-docx`
//! - plain text → lossy UTF-8 decode of the raw bytes
//!
//! DOCX and plain text have exactly one strategy each, so any failure there
//! is immediately terminal; only the PDF chain retries.

// Re-export domain types for convenience
pub use textsift_core::{
    DocumentFormat, ExtractError, ExtractionConfig, SourceDocument,
};

/// Extract a best-effort plain-text representation of `doc`.
///
/// On success the text is usable downstream (for PDFs: non-empty,
/// whitespace-normalized, at or above the minimum-length threshold). On
/// failure the error's message is a human-readable diagnostic; for PDFs it
/// aggregates every attempted strategy's failure.
///
/// The caller-side file-size ceiling is not enforced here; the collaborator
/// that accepts the upload is responsible for it.
pub async fn extract_text(
    doc: &SourceDocument,
    config: &ExtractionConfig,
) -> Result<String, ExtractError> {
    let Some(format) = doc.format() else {
        tracing::debug!(
            media_type = doc.media_type(),
            file = doc.file_name(),
            "unsupported document format"
        );
        return Err(ExtractError::UnsupportedType(declared_type(doc)));
    };

    tracing::debug!(
        format = format.as_str(),
        file = doc.file_name(),
        bytes = doc.len(),
        "extracting document"
    );

    match format {
        DocumentFormat::PlainText => Ok(String::from_utf8_lossy(doc.bytes()).into_owned()),
        DocumentFormat::Docx => textsift_docx::extract_raw_text(doc.bytes()).map_err(|e| {
            ExtractError::UnknownParsingFailure(format!(
                "DOCX extraction failed: {e}. Try uploading the document as PDF or plain text instead"
            ))
        }),
        DocumentFormat::Pdf => textsift_pdf::extract_pdf(doc, config).await,
    }
}

/// What to report for an unsupported document: the declared media type, or
/// the file name when no media type was declared.
fn declared_type(doc: &SourceDocument) -> String {
    if doc.media_type().is_empty() {
        doc.file_name().to_string()
    } else {
        doc.media_type().to_string()
    }
}
