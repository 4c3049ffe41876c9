//! # finqa
//!
//! Question answering over financial reports.
//!
//! finqa loads a 10-K/10-Q style report — a PDF or an XLSX spreadsheet —
//! and answers free-text questions about it. PDF questions are answered by
//! an external extractive QA service over a bounded, keyword-filtered text
//! context; spreadsheet questions are answered by a best-effort column and
//! year lookup over the parsed table.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────────┐   ┌─────────────────┐
//! │ Upload bytes │──▶│ extract / table    │──▶│ filter / resolve │
//! │ (pdf, xlsx)  │   │ (document loaders) │   │ (query pipeline) │
//! └──────────────┘   └───────────────────┘   └────────┬────────┘
//!                                                     │
//!                                     ┌───────────────┤
//!                                     ▼               ▼
//!                               ┌──────────┐    ┌──────────┐
//!                               │   CLI    │    │   HTTP   │
//!                               │  (fqa)   │    │  (/ask)  │
//!                               └──────────┘    └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! fqa ask report.pdf "What was net income in fiscal 2020?"
//! fqa session statements.xlsx      # load once, ask interactively
//! fqa extract report.pdf           # dump the extracted text
//! fqa serve                        # start the HTTP answering service
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`error`] | Pipeline error taxonomy |
//! | [`models`] | Core data types |
//! | [`extract`] | PDF text extraction |
//! | [`table`] | Spreadsheet parsing |
//! | [`filter`] | Keyword relevance filtering |
//! | [`resolve`] | Tabular column/year lookup |
//! | [`qa`] | External QA and summarization capabilities |
//! | [`session`] | Upload dispatch, caching, and question routing |
//! | [`server`] | HTTP answering service |

pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod models;
pub mod qa;
pub mod resolve;
pub mod server;
pub mod session;
pub mod table;

pub use error::{Error, Result};
