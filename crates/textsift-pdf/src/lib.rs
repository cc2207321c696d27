//! Multi-strategy PDF text extraction.
//!
//! Three strategies are tried in fixed order — a first-page-only fast path,
//! a validated full-document path (both MuPDF), and a lopdf-backed legacy
//! path — each under its own bounded wait. A strategy failure is recorded
//! and the chain moves on; only when every strategy has failed does the
//! caller see a terminal error, and that error carries every attempt's
//! original message.

use std::time::Instant;

use textsift_core::{
    ExtractError, ExtractionAttempt, ExtractionConfig, PdfStrategy, SourceDocument, StrategyError,
};

mod fast;
mod full;
mod legacy;
mod mupdf_text;

pub use fast::FastPath;
pub use full::FullPath;
pub use legacy::LegacyPath;

/// Run the standard fast → full → legacy chain.
pub async fn extract_pdf(
    doc: &SourceDocument,
    config: &ExtractionConfig,
) -> Result<String, ExtractError> {
    let strategies: [&dyn PdfStrategy; 3] = [&FastPath, &FullPath, &LegacyPath];
    extract_with_strategies(doc, config, &strategies).await
}

/// Run an explicit strategy chain. Strategies execute strictly in order;
/// the next one starts only after the previous outcome is known.
///
/// A strategy that returns text below the usable-length threshold is
/// reclassified as failed and the chain continues. A strategy that outlives
/// its budget is abandoned (the blocking parse may keep running; its result
/// is discarded), not cancelled.
pub async fn extract_with_strategies(
    doc: &SourceDocument,
    config: &ExtractionConfig,
    strategies: &[&dyn PdfStrategy],
) -> Result<String, ExtractError> {
    let mut attempts: Vec<ExtractionAttempt> = Vec::new();

    for strategy in strategies {
        let budget = strategy.budget(config);
        let started = Instant::now();
        let outcome = match tokio::time::timeout(budget, strategy.attempt(doc, config)).await {
            Ok(Ok(text)) => {
                if config.meets_threshold(&text) {
                    tracing::debug!(
                        strategy = strategy.name(),
                        chars = text.chars().count(),
                        "PDF strategy succeeded"
                    );
                    return Ok(text);
                }
                let got = text.trim().chars().count();
                if got == 0 {
                    Err(StrategyError::NoText)
                } else {
                    Err(StrategyError::TooShort {
                        got,
                        min: config.min_text_chars,
                    })
                }
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(StrategyError::Timeout(budget)),
        };

        if let Err(e) = &outcome {
            tracing::debug!(strategy = strategy.name(), error = %e, "PDF strategy failed");
        }
        attempts.push(ExtractionAttempt {
            strategy: strategy.name(),
            elapsed: started.elapsed(),
            outcome,
        });
    }

    Err(terminal_error(&attempts))
}

/// Aggregate every attempt's failure into one diagnostic error.
///
/// The kind is chosen by priority: encryption, then missing/short text,
/// then structural pre-validation failures, then timeouts, then anything
/// else — the most actionable diagnosis wins.
fn terminal_error(attempts: &[ExtractionAttempt]) -> ExtractError {
    let detail: Vec<String> = attempts.iter().filter_map(|a| a.failure_line()).collect();
    let message = format!(
        "all PDF extraction strategies failed [{}]. The file may be image-based, \
         password protected, or corrupt; try converting it to DOCX or uploading \
         the content as a .txt file",
        detail.join("; ")
    );

    let errors: Vec<&StrategyError> = attempts
        .iter()
        .filter_map(|a| a.outcome.as_ref().err())
        .collect();

    if errors
        .iter()
        .any(|e| matches!(e, StrategyError::Encrypted))
    {
        ExtractError::ProtectedOrEncrypted(message)
    } else if errors
        .iter()
        .any(|e| matches!(e, StrategyError::NoText | StrategyError::TooShort { .. }))
    {
        ExtractError::NoExtractableText(message)
    } else if errors
        .iter()
        .any(|e| matches!(e, StrategyError::TooSmall(_) | StrategyError::BadSignature))
    {
        ExtractError::EmptyOrCorrupt(message)
    } else if errors.iter().any(|e| matches!(e, StrategyError::Timeout(_))) {
        ExtractError::Timeout(message)
    } else {
        ExtractError::UnknownParsingFailure(message)
    }
}
