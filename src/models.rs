//! Core data models used throughout finqa.
//!
//! These types represent the extracted documents, tabular data, and answers
//! that flow through the question-answering pipeline. Everything here is
//! request-scoped: loaded fresh per upload, never mutated, never persisted.

use std::fmt;

use serde::Serialize;

/// Plain text extracted from a PDF report.
///
/// Page texts are joined with blank-line separators in original page order;
/// pages that yielded no text contribute nothing. At most
/// [`crate::extract::MAX_PAGES`] pages are ever read.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Joined page text.
    pub text: String,
    /// Number of pages read from the source (capped, includes empty pages).
    pub pages_read: usize,
}

impl ExtractedDocument {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The bounded context handed to the QA capability alongside a question.
#[derive(Debug, Clone, PartialEq)]
pub struct RelevantContext {
    /// Context text: matched lines joined with newlines, or the token
    /// fallback when nothing matched.
    pub text: String,
    /// How many lines matched the keyword (0 means the fallback was used).
    pub matched_lines: usize,
}

impl RelevantContext {
    /// An empty context means the question is not answerable; the QA
    /// capability must not be invoked with it.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A scalar spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    /// Whether this cell holds the given year. Integer cells compare
    /// numerically, float cells must equal the year exactly, and string
    /// cells match after trimming.
    pub fn matches_year(&self, year: i64) -> bool {
        match self {
            Cell::Int(i) => *i == year,
            Cell::Float(f) => *f == year as f64,
            Cell::Text(s) => s.trim() == year.to_string(),
            _ => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Int(i) => write!(f, "{}", i),
            // Spreadsheet numbers arrive as floats; render whole values
            // without the trailing ".0" so "500.0" reads as "500".
            Cell::Float(v) if v.fract() == 0.0 && v.is_finite() => {
                write!(f, "{}", *v as i64)
            }
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// The first worksheet of an uploaded spreadsheet: named columns over rows
/// of scalar cells with a shared row count. Column names and row order are
/// preserved exactly as stored in the file.
#[derive(Debug, Clone)]
pub struct TabularDataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TabularDataset {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of an exactly-named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Header plus the first `limit` rows, pipe-separated.
    pub fn preview(&self, limit: usize) -> String {
        let mut out = self.columns.join(" | ");
        for row in self.rows.iter().take(limit) {
            out.push('\n');
            let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            out.push_str(&cells.join(" | "));
        }
        out
    }
}

/// The best-scoring column for a query, by token overlap. Absent entirely
/// when no column scores above zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMatch {
    pub name: String,
    pub score: usize,
}

/// An extractive answer returned by the QA capability: a span of the
/// supplied context, with the model's confidence.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub text: String,
    pub confidence: f64,
    pub span: (usize, usize),
}

/// The outcome of one question: an extractive answer for PDF reports, or a
/// formatted best-effort lookup string for tabular data.
#[derive(Debug, Clone)]
pub enum AnswerResult {
    Extractive(Answer),
    Lookup(String),
}

impl AnswerResult {
    pub fn text(&self) -> &str {
        match self {
            AnswerResult::Extractive(a) => &a.text,
            AnswerResult::Lookup(s) => s,
        }
    }
}

impl fmt::Display for AnswerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}
