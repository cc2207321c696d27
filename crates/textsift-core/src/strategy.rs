use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

use crate::config::ExtractionConfig;
use crate::SourceDocument;

/// Failure of a single strategy invocation.
///
/// These never propagate raw past the strategy boundary; the driver records
/// each one as an [`ExtractionAttempt`] and moves on to the next strategy.
#[derive(Error, Debug, Clone)]
pub enum StrategyError {
    #[error("failed to open document: {0}")]
    Open(String),
    #[error("document is password protected")]
    Encrypted,
    #[error("file too small to be a valid PDF ({0} bytes)")]
    TooSmall(usize),
    #[error("missing %PDF header")]
    BadSignature,
    #[error("no extractable text (image-only or non-selectable document)")]
    NoText,
    #[error("extracted text too short ({got} chars, minimum {min})")]
    TooShort { got: usize, min: usize },
    #[error("text extraction failed: {0}")]
    Extraction(String),
    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("extraction worker failed: {0}")]
    Worker(String),
}

pub type StrategyFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, StrategyError>> + Send + 'a>>;

/// One self-contained way of turning PDF bytes into text.
///
/// Strategies are tried strictly in order by the driver, each under its own
/// bounded wait. Implementations run the actual parse on a blocking worker
/// so the caller's task is never stalled.
pub trait PdfStrategy: Send + Sync {
    /// Short name used in diagnostics (e.g. "fast", "full", "legacy").
    fn name(&self) -> &'static str;

    /// Bounded wait the driver applies to one invocation of this strategy.
    fn budget(&self, config: &ExtractionConfig) -> Duration;

    fn attempt<'a>(
        &'a self,
        doc: &'a SourceDocument,
        config: &'a ExtractionConfig,
    ) -> StrategyFuture<'a>;
}

/// Record of one strategy invocation's outcome.
#[derive(Debug)]
pub struct ExtractionAttempt {
    pub strategy: &'static str,
    pub elapsed: Duration,
    pub outcome: Result<String, StrategyError>,
}

impl ExtractionAttempt {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }

    /// "strategy: error" line for the aggregated failure report, or `None`
    /// for a successful attempt.
    pub fn failure_line(&self) -> Option<String> {
        match &self.outcome {
            Ok(_) => None,
            Err(e) => Some(format!("{}: {e}", self.strategy)),
        }
    }
}
