use std::time::{Duration, Instant};

use lopdf::Document;

use textsift_core::{
    normalize_whitespace, ExtractionConfig, PdfStrategy, SourceDocument, StrategyError,
    StrategyFuture,
};

/// Last-resort strategy on a different parser (lopdf, pure Rust).
///
/// Same per-page iteration shape as the full path but with the smaller
/// page cap; a PDF that MuPDF refuses sometimes still yields text here.
pub struct LegacyPath;

impl PdfStrategy for LegacyPath {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn budget(&self, config: &ExtractionConfig) -> Duration {
        config.legacy_timeout
    }

    fn attempt<'a>(
        &'a self,
        doc: &'a SourceDocument,
        config: &'a ExtractionConfig,
    ) -> StrategyFuture<'a> {
        let bytes = doc.shared_bytes();
        let config = config.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || legacy_text(&bytes, &config))
                .await
                .map_err(|e| StrategyError::Worker(e.to_string()))?
        })
    }
}

fn legacy_text(bytes: &[u8], config: &ExtractionConfig) -> Result<String, StrategyError> {
    let document = Document::load_mem(bytes).map_err(|e| StrategyError::Open(e.to_string()))?;
    if document.is_encrypted() {
        return Err(StrategyError::Encrypted);
    }

    let started = Instant::now();
    let stop_after = config.legacy_timeout.saturating_sub(config.page_budget);

    let pages = document.get_pages();
    let mut pages_text: Vec<String> = Vec::new();
    for (index, page_number) in pages.keys().copied().enumerate() {
        if index >= config.legacy_page_cap {
            break;
        }
        if started.elapsed() >= stop_after {
            tracing::debug!(page = index, "page budget exhausted, stopping iteration");
            break;
        }
        match document.extract_text(&[page_number]) {
            Ok(raw) => {
                let text = normalize_whitespace(&raw);
                if !text.is_empty() {
                    pages_text.push(text);
                }
            }
            Err(e) => {
                tracing::debug!(page = index, error = %e, "skipping page after text failure");
            }
        }
    }

    if pages_text.is_empty() {
        return Err(StrategyError::NoText);
    }
    Ok(pages_text.join("\n"))
}
