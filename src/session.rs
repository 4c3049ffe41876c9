//! Upload dispatch, caching, and question routing.
//!
//! A [`Session`] is the orchestrator for one user's interaction: it holds
//! the capability handles (injected at construction), the currently loaded
//! upload, and nothing else. Dispatch is strictly by file extension — PDF
//! uploads flow through extraction and relevance filtering to the QA
//! capability, XLSX uploads through the tabular resolver.
//!
//! Loaded documents are cached by the SHA-256 digest of the uploaded bytes
//! so re-presenting the same file never re-runs a loader; new bytes
//! invalidate the cache.

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract;
use crate::filter;
use crate::models::AnswerResult;
use crate::qa::{self, QaProvider, SummaryProvider};
use crate::resolve;
use crate::table;

/// Table rows shown when previewing a freshly loaded spreadsheet.
pub const PREVIEW_ROWS: usize = 5;

/// A loaded upload: extracted report text or a parsed table.
#[derive(Debug)]
pub enum LoadedDocument {
    Report(crate::models::ExtractedDocument),
    Table(crate::models::TabularDataset),
}

/// Whether [`Session::load`] parsed the bytes or reused the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Parsed,
    Cached,
}

struct UploadCache {
    digest: String,
    doc: LoadedDocument,
}

pub struct Session {
    qa: Arc<dyn QaProvider>,
    summarizer: Arc<dyn SummaryProvider>,
    cache: Option<UploadCache>,
}

impl Session {
    /// Builds a session with explicit capability handles. Tests pass stubs
    /// here; production callers usually go through [`Session::from_config`].
    pub fn new(qa: Arc<dyn QaProvider>, summarizer: Arc<dyn SummaryProvider>) -> Self {
        Self {
            qa,
            summarizer,
            cache: None,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            qa::create_qa_provider(&config.qa)?,
            qa::create_summary_provider(&config.summarizer)?,
        ))
    }

    /// Loads an upload, dispatching on the filename's extension. Identical
    /// bytes hit the cache; anything else replaces it. A failed load leaves
    /// no document behind.
    pub fn load(&mut self, filename: &str, bytes: &[u8]) -> Result<LoadStatus> {
        let digest = upload_digest(bytes);
        if let Some(cache) = &self.cache {
            if cache.digest == digest {
                tracing::debug!(%digest, "upload unchanged, reusing cached document");
                return Ok(LoadStatus::Cached);
            }
        }

        self.cache = None;
        let doc = load_document(filename, bytes)?;
        self.cache = Some(UploadCache { digest, doc });
        Ok(LoadStatus::Parsed)
    }

    pub fn document(&self) -> Option<&LoadedDocument> {
        self.cache.as_ref().map(|c| &c.doc)
    }

    /// Answers one question against the loaded upload.
    ///
    /// Reports go through the relevance filter first; an empty context is
    /// reported as [`Error::NoRelevantContext`] without invoking the QA
    /// capability. Tables go through the column/year resolver, which always
    /// produces a best-effort string.
    pub async fn ask(&self, question: &str) -> Result<AnswerResult> {
        let doc = self.document().ok_or(Error::NothingLoaded)?;
        match doc {
            LoadedDocument::Report(report) => {
                let context = filter::relevant_context(report, question);
                if context.is_empty() {
                    return Err(Error::NoRelevantContext);
                }
                tracing::debug!(
                    matched_lines = context.matched_lines,
                    context_chars = context.text.len(),
                    "invoking QA capability"
                );
                let answer = self.qa.answer(question, &context.text).await?;
                Ok(AnswerResult::Extractive(answer))
            }
            LoadedDocument::Table(table) => {
                Ok(AnswerResult::Lookup(resolve::resolve(table, question)))
            }
        }
    }

    /// Summarizes the loaded report's extracted text.
    pub async fn summarize(&self) -> Result<String> {
        match self.document() {
            Some(LoadedDocument::Report(report)) => self.summarizer.summarize(&report.text).await,
            Some(LoadedDocument::Table(_)) => Err(Error::NotAReport),
            None => Err(Error::NothingLoaded),
        }
    }
}

/// Parses upload bytes according to the filename's final extension
/// (lower-cased). Anything other than `pdf` or `xlsx` is rejected before
/// any pipeline stage runs.
pub fn load_document(filename: &str, bytes: &[u8]) -> Result<LoadedDocument> {
    let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    match extension.as_str() {
        "pdf" => Ok(LoadedDocument::Report(extract::extract_report(bytes)?)),
        "xlsx" => Ok(LoadedDocument::Table(table::load_table(bytes)?)),
        _ => Err(Error::UnsupportedFileType(extension)),
    }
}

fn upload_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

// ============ CLI entry points ============

/// One-shot `fqa ask`: load the file, answer the question, print it.
pub async fn run_ask(config: &Config, file: &Path, question: &str) -> anyhow::Result<()> {
    let mut session = Session::from_config(config)?;
    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    session.load(&display_name(file), &bytes)?;
    let result = session.ask(question).await?;
    print_result(&result);
    Ok(())
}

/// Interactive `fqa session`: load once, then answer questions read from
/// stdin until EOF or `quit`. Errors are printed and the loop continues —
/// the session stays available after any failed question.
pub async fn run_session(config: &Config, file: &Path) -> anyhow::Result<()> {
    let mut session = Session::from_config(config)?;
    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    session.load(&display_name(file), &bytes)?;

    match session.document() {
        Some(LoadedDocument::Report(report)) => {
            println!(
                "Loaded report text from {} page(s). Ask a question, or 'quit' to exit.",
                report.pages_read
            );
        }
        Some(LoadedDocument::Table(table)) => {
            println!("--- Extracted financial data ---");
            println!("{}", table.preview(PREVIEW_ROWS));
            println!();
            println!("Ask about the data (e.g. 'Tell me about Revenue in 2020'), or 'quit' to exit.");
        }
        None => unreachable!(),
    }

    let stdin = std::io::stdin();
    loop {
        print!("question> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question == "quit" || question == "exit" {
            break;
        }
        if question == ":summarize" {
            match session.summarize().await {
                Ok(summary) => println!("{}", summary),
                Err(e) => eprintln!("Error: {}", e),
            }
            continue;
        }

        match session.ask(question).await {
            Ok(result) => print_result(&result),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    Ok(())
}

/// `fqa extract`: print what the loaders see, without any capability.
pub fn run_extract(file: &Path, rows: usize) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    match load_document(&display_name(file), &bytes)? {
        LoadedDocument::Report(report) => {
            println!("--- Report text ({} page(s) read) ---", report.pages_read);
            println!("{}", report.text);
        }
        LoadedDocument::Table(table) => {
            println!(
                "--- {} row(s) x {} column(s) ---",
                table.row_count(),
                table.columns.len()
            );
            println!("{}", table.preview(rows));
        }
    }
    Ok(())
}

/// `fqa summarize`: run the summarization capability over the report text.
pub async fn run_summarize(config: &Config, file: &Path) -> anyhow::Result<()> {
    let mut session = Session::from_config(config)?;
    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    session.load(&display_name(file), &bytes)?;
    let summary = session.summarize().await?;
    println!("{}", summary);
    Ok(())
}

fn display_name(file: &Path) -> String {
    file.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

fn print_result(result: &AnswerResult) {
    println!("Answer: {}", result.text());
    if let AnswerResult::Extractive(answer) = result {
        println!(
            "  confidence: {:.3}   span: {}..{}",
            answer.confidence, answer.span.0, answer.span.1
        );
    }
}
