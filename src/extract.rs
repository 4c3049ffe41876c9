//! PDF text extraction.
//!
//! Reads at most the first [`MAX_PAGES`] pages of an uploaded report,
//! drops pages that yield no text, and joins the rest with blank-line
//! separators. Character and line spacing tolerances are internal to the
//! extraction library.

use crate::error::{Error, Result};
use crate::models::ExtractedDocument;

/// Maximum report pages ever read, regardless of document length.
pub const MAX_PAGES: usize = 15;

/// Extracts plain text from PDF bytes.
///
/// Returns [`Error::Pdf`] when the bytes are not a parseable PDF and
/// [`Error::NoTextFound`] when the document parses but no page yields any
/// text (scanned or image-only reports).
pub fn extract_report(bytes: &[u8]) -> Result<ExtractedDocument> {
    let pages =
        pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| Error::Pdf(e.to_string()))?;
    let document = collate_pages(pages)?;
    tracing::debug!(
        pages_read = document.pages_read,
        chars = document.text.len(),
        "extracted report text"
    );
    Ok(document)
}

/// Joins per-page texts into one document: first [`MAX_PAGES`] pages only,
/// empty pages skipped (not turned into blank lines), survivors joined
/// with a double newline.
fn collate_pages<I>(pages: I) -> Result<ExtractedDocument>
where
    I: IntoIterator<Item = String>,
{
    let mut kept: Vec<String> = Vec::new();
    let mut pages_read = 0;
    for page in pages.into_iter().take(MAX_PAGES) {
        pages_read += 1;
        if !page.trim().is_empty() {
            kept.push(page);
        }
    }

    let text = kept.join("\n\n");
    if text.trim().is_empty() {
        return Err(Error::NoTextFound);
    }

    Ok(ExtractedDocument { text, pages_read })
}
