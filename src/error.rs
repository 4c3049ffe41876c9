//! Error taxonomy for the answering pipeline.
//!
//! Every variant is a user-facing condition: errors are printed as plain
//! text, never retried, and never fatal to a session — the caller stays
//! available for the next upload or question.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The PDF parsed but yielded no extractable text (scanned images,
    /// vector-only pages).
    #[error("no text found in the report — try uploading a different file")]
    NoTextFound,

    /// The uploaded bytes are not a readable spreadsheet.
    #[error("could not read spreadsheet: {0}")]
    UnreadableTable(String),

    /// The relevance filter produced an empty context, so the QA service
    /// was not invoked. Only possible when the document itself is empty.
    #[error("no relevant information found — try rephrasing the question")]
    NoRelevantContext,

    /// The uploaded filename's extension is not one we handle.
    #[error("unsupported file type: {0} (expected pdf or xlsx)")]
    UnsupportedFileType(String),

    /// The uploaded bytes are not a parseable PDF.
    #[error("could not parse PDF: {0}")]
    Pdf(String),

    /// An external capability (QA or summarization) failed or is disabled.
    #[error("{0}")]
    Capability(String),

    /// A question arrived before any document was loaded.
    #[error("no document loaded — upload a PDF or XLSX file first")]
    NothingLoaded,

    /// The operation needs extracted report text, not a table.
    #[error("this operation requires a PDF report")]
    NotAReport,
}

pub type Result<T> = std::result::Result<T, Error>;
