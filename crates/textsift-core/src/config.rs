use std::time::Duration;

/// Policy knobs for the extraction pipeline.
///
/// Defaults match the observed production policy. Use the `with_*` methods
/// to override individual values.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Minimum trimmed character count for text to count as usable.
    /// A nominally successful strategy below this is treated as failed.
    pub min_text_chars: usize,
    /// Minimum byte length the full-path strategy accepts before parsing.
    pub min_pdf_bytes: usize,
    /// Page cap for the full-path strategy.
    pub full_page_cap: usize,
    /// Page cap for the legacy-path strategy.
    pub legacy_page_cap: usize,
    /// Bounded wait for the fast-path strategy.
    pub fast_timeout: Duration,
    /// Bounded wait for the full-path strategy.
    pub full_timeout: Duration,
    /// Soft per-page budget inside multi-page strategies. Page iteration
    /// stops starting new pages once less than this remains of the
    /// strategy's overall budget.
    pub page_budget: Duration,
    /// Bounded wait for the legacy-path strategy.
    pub legacy_timeout: Duration,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_text_chars: 20,
            min_pdf_bytes: 100,
            full_page_cap: 25,
            legacy_page_cap: 10,
            fast_timeout: Duration::from_secs(30),
            full_timeout: Duration::from_secs(45),
            page_budget: Duration::from_secs(10),
            legacy_timeout: Duration::from_secs(20),
        }
    }
}

impl ExtractionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_text_chars(mut self, chars: usize) -> Self {
        self.min_text_chars = chars;
        self
    }

    pub fn with_min_pdf_bytes(mut self, bytes: usize) -> Self {
        self.min_pdf_bytes = bytes;
        self
    }

    pub fn with_page_caps(mut self, full: usize, legacy: usize) -> Self {
        self.full_page_cap = full;
        self.legacy_page_cap = legacy;
        self
    }

    pub fn with_timeouts(mut self, fast: Duration, full: Duration, legacy: Duration) -> Self {
        self.fast_timeout = fast;
        self.full_timeout = full;
        self.legacy_timeout = legacy;
        self
    }

    pub fn with_page_budget(mut self, budget: Duration) -> Self {
        self.page_budget = budget;
        self
    }

    /// Whether `text` clears the minimum usable-length threshold.
    pub fn meets_threshold(&self, text: &str) -> bool {
        let trimmed = text.trim();
        !trimmed.is_empty() && trimmed.chars().count() >= self.min_text_chars
    }
}
