//! Keyword relevance filtering.
//!
//! Narrows a full extracted document down to the lines most likely relevant
//! to a question, so the context handed to the QA service stays small and
//! on-topic. The question string is matched verbatim as a case-insensitive
//! substring — stop-words and punctuation included.

use crate::models::{ExtractedDocument, RelevantContext};

/// Maximum matching lines kept in the context.
pub const MAX_CONTEXT_LINES: usize = 5;

/// Fallback size when no line matches: the leading whitespace-delimited
/// tokens of the whole document.
pub const FALLBACK_TOKENS: usize = 500;

/// Selects the context for a question.
///
/// Lines are split on newlines only, tested for case-insensitive substring
/// containment of the whole keyword, kept in document order, and capped at
/// [`MAX_CONTEXT_LINES`]. When nothing matches, the first
/// [`FALLBACK_TOKENS`] tokens of the document are returned instead — a
/// deliberate degrade-gracefully policy so the QA step still has something
/// to work with. Only an empty document produces an empty context.
pub fn relevant_context(document: &ExtractedDocument, keyword: &str) -> RelevantContext {
    let needle = keyword.to_lowercase();
    let matches: Vec<&str> = document
        .text
        .split('\n')
        .filter(|line| line.to_lowercase().contains(&needle))
        .take(MAX_CONTEXT_LINES)
        .collect();

    if matches.is_empty() {
        let fallback: Vec<&str> = document.text.split_whitespace().take(FALLBACK_TOKENS).collect();
        return RelevantContext {
            text: fallback.join(" "),
            matched_lines: 0,
        };
    }

    RelevantContext {
        matched_lines: matches.len(),
        text: matches.join("\n"),
    }
}
