//! # finqa CLI (`fqa`)
//!
//! The `fqa` binary answers natural-language questions about financial
//! reports. PDF reports are answered by an external extractive QA service
//! over a keyword-filtered context; XLSX spreadsheets are answered by a
//! column/year lookup.
//!
//! ## Usage
//!
//! ```bash
//! fqa --config ./config/finqa.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `fqa ask <file> "<question>"` | Answer one question about a report |
//! | `fqa session <file>` | Load once, then ask questions interactively |
//! | `fqa extract <file>` | Print the extracted text or table preview |
//! | `fqa summarize <file>` | Summarize the extracted report text |
//! | `fqa serve` | Start the HTTP answering service |
//!
//! ## Examples
//!
//! ```bash
//! # One-shot question against a 10-K PDF
//! fqa ask 10k-2020.pdf "What was net income in fiscal 2020?"
//!
//! # Column/year lookup against a spreadsheet
//! fqa ask statements.xlsx "Tell me about Revenue in 2020"
//!
//! # Interactive session (preview shown for spreadsheets)
//! fqa session statements.xlsx
//!
//! # HTTP service for the upload form
//! fqa serve --config ./config/finqa.toml
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use finqa::{config, server, session};

/// finqa — question answering over financial reports (PDF and XLSX).
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file; a missing file falls back to defaults with both model
/// capabilities disabled. See `config/finqa.example.toml`.
#[derive(Parser)]
#[command(
    name = "fqa",
    about = "finqa — question answering over financial reports (PDF and XLSX)",
    version,
    long_about = "finqa loads a 10-K/10-Q style report and answers free-text questions about it: \
    PDF reports through an external extractive QA service over a bounded, keyword-filtered \
    context, and XLSX spreadsheets through a best-effort column and year lookup."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Capability endpoints and the server bind address are read from this
    /// file. A missing file is not an error — capabilities default to
    /// disabled, which is enough for the spreadsheet path.
    #[arg(long, global = true, default_value = "./config/finqa.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Answer a single question about a report file.
    ///
    /// PDF files require a configured `[qa]` endpoint; XLSX lookups run
    /// entirely locally.
    Ask {
        /// Report file (.pdf or .xlsx).
        file: PathBuf,
        /// The question to answer.
        question: String,
    },

    /// Load a report once and answer questions interactively.
    ///
    /// Spreadsheets show a preview of the first rows on load. Questions
    /// are read from stdin; `quit` or EOF ends the session, and
    /// `:summarize` runs the summarization capability on a loaded report.
    Session {
        /// Report file (.pdf or .xlsx).
        file: PathBuf,
    },

    /// Print the text or table extracted from a report file.
    ///
    /// Runs only the document loader — useful for checking what the
    /// pipeline will see before asking questions.
    Extract {
        /// Report file (.pdf or .xlsx).
        file: PathBuf,
        /// Table rows to print for spreadsheets.
        #[arg(long, default_value_t = 5)]
        rows: usize,
    },

    /// Summarize the extracted report text.
    ///
    /// Requires a configured `[summarizer]` endpoint and a PDF report.
    Summarize {
        /// Report file (.pdf).
        file: PathBuf,
    },

    /// Start the HTTP answering service.
    ///
    /// Binds to `[server].bind` and exposes `POST /ask` (multipart
    /// `file` + `question`) and `GET /health`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Ask { file, question } => {
            session::run_ask(&cfg, &file, &question).await?;
        }
        Commands::Session { file } => {
            session::run_session(&cfg, &file).await?;
        }
        Commands::Extract { file, rows } => {
            session::run_extract(&file, rows)?;
        }
        Commands::Summarize { file } => {
            session::run_summarize(&cfg, &file).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
