use mupdf::{Page, TextPageFlags};

use textsift_core::StrategyError;

/// Extract a page's raw text via MuPDF's block/line iteration.
pub(crate) fn page_text(page: &Page) -> Result<String, StrategyError> {
    let text_page = page
        .to_text_page(TextPageFlags::empty())
        .map_err(|e| StrategyError::Extraction(e.to_string()))?;

    let mut text = String::new();
    for block in text_page.blocks() {
        for line in block.lines() {
            let line_text: String = line
                .chars()
                .map(|c| c.char().unwrap_or('\u{FFFD}'))
                .collect();
            text.push_str(&line_text);
            text.push('\n');
        }
    }
    Ok(text)
}
