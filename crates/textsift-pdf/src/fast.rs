use std::time::Duration;

use mupdf::Document;

use textsift_core::{
    normalize_whitespace, ExtractionConfig, PdfStrategy, SourceDocument, StrategyError,
    StrategyFuture,
};

use crate::mupdf_text::page_text;

/// First-page-only MuPDF strategy. Cheapest attempt: open the document,
/// read page one, done. An empty first page is a failure so the chain can
/// move on to a full parse.
pub struct FastPath;

impl PdfStrategy for FastPath {
    fn name(&self) -> &'static str {
        "fast"
    }

    fn budget(&self, config: &ExtractionConfig) -> Duration {
        config.fast_timeout
    }

    fn attempt<'a>(
        &'a self,
        doc: &'a SourceDocument,
        _config: &'a ExtractionConfig,
    ) -> StrategyFuture<'a> {
        let bytes = doc.shared_bytes();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || first_page_text(&bytes))
                .await
                .map_err(|e| StrategyError::Worker(e.to_string()))?
        })
    }
}

fn first_page_text(bytes: &[u8]) -> Result<String, StrategyError> {
    let document = Document::from_bytes(bytes, "application/pdf")
        .map_err(|e| StrategyError::Open(e.to_string()))?;
    if document
        .needs_password()
        .map_err(|e| StrategyError::Open(e.to_string()))?
    {
        return Err(StrategyError::Encrypted);
    }

    let mut pages = document
        .pages()
        .map_err(|e| StrategyError::Extraction(e.to_string()))?;
    let first = pages
        .next()
        .ok_or(StrategyError::NoText)?
        .map_err(|e| StrategyError::Extraction(e.to_string()))?;

    let text = normalize_whitespace(&page_text(&first)?);
    if text.is_empty() {
        return Err(StrategyError::NoText);
    }
    Ok(text)
}
