use std::time::{Duration, Instant};

use mupdf::Document;

use textsift_core::{
    normalize_whitespace, ExtractionConfig, PdfStrategy, SourceDocument, StrategyError,
    StrategyFuture,
};

use crate::mupdf_text::page_text;

const PDF_SIGNATURE: &[u8] = b"%PDF";

/// Validated full-document MuPDF strategy.
///
/// The only strategy with structural pre-validation: the byte length and
/// `%PDF` signature gates live here and fail only this strategy. Pages are
/// read in order up to the cap; a bad page is skipped, a bad document
/// aborts. Each page's text is whitespace-normalized before accumulation
/// and pages join with a line break.
pub struct FullPath;

impl PdfStrategy for FullPath {
    fn name(&self) -> &'static str {
        "full"
    }

    fn budget(&self, config: &ExtractionConfig) -> Duration {
        config.full_timeout
    }

    fn attempt<'a>(
        &'a self,
        doc: &'a SourceDocument,
        config: &'a ExtractionConfig,
    ) -> StrategyFuture<'a> {
        let bytes = doc.shared_bytes();
        let config = config.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || full_text(&bytes, &config))
                .await
                .map_err(|e| StrategyError::Worker(e.to_string()))?
        })
    }
}

fn full_text(bytes: &[u8], config: &ExtractionConfig) -> Result<String, StrategyError> {
    if bytes.len() < config.min_pdf_bytes {
        return Err(StrategyError::TooSmall(bytes.len()));
    }
    if !bytes.starts_with(PDF_SIGNATURE) {
        return Err(StrategyError::BadSignature);
    }

    let document = Document::from_bytes(bytes, "application/pdf")
        .map_err(|e| StrategyError::Open(e.to_string()))?;
    if document
        .needs_password()
        .map_err(|e| StrategyError::Open(e.to_string()))?
    {
        return Err(StrategyError::Encrypted);
    }

    let started = Instant::now();
    // Stop starting new pages once less than one page budget remains,
    // so partial text beats the driver's timeout.
    let stop_after = config.full_timeout.saturating_sub(config.page_budget);

    let mut pages_text: Vec<String> = Vec::new();
    for (index, page_result) in document
        .pages()
        .map_err(|e| StrategyError::Open(e.to_string()))?
        .enumerate()
    {
        if index >= config.full_page_cap {
            break;
        }
        if started.elapsed() >= stop_after {
            tracing::debug!(page = index, "page budget exhausted, stopping iteration");
            break;
        }
        let page = match page_result {
            Ok(page) => page,
            Err(e) => {
                tracing::debug!(page = index, error = %e, "skipping unreadable page");
                continue;
            }
        };
        match page_text(&page) {
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
