//! External model capabilities: question answering and summarization.
//!
//! Defines the [`QaProvider`] and [`SummaryProvider`] traits and their
//! implementations:
//! - **http** — POSTs to a configured inference endpoint (any service
//!   exposing an extractive-QA pipeline: request `{question, context}`,
//!   response `{answer, score, start, end}`).
//! - **disabled** — returns errors; used when no endpoint is configured.
//!
//! Providers are injected into the session at construction, so tests can
//! substitute stubs. Calls are single-attempt with a timeout: capability
//! failures surface directly to the user and are never retried.

use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use async_trait::async_trait;
use serde::Deserialize;

use crate::config::CapabilityConfig;
use crate::error::{Error, Result};
use crate::models::Answer;

/// Extractive question answering over a supplied context.
///
/// Implementations must only be called with a non-empty context; the
/// session substitutes a local "no relevant information" error instead of
/// invoking the capability on nothing.
#[async_trait]
pub trait QaProvider: Send + Sync {
    /// Provider identifier for logs and errors (e.g. `"http"`).
    fn name(&self) -> &str;

    /// Answers `question` with a span drawn from `context`.
    async fn answer(&self, question: &str, context: &str) -> Result<Answer>;
}

/// Abstractive summarization of report text.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn summarize(&self, text: &str) -> Result<String>;
}

/// Instantiate the QA provider selected by configuration.
pub fn create_qa_provider(config: &CapabilityConfig) -> anyhow::Result<Arc<dyn QaProvider>> {
    match config.provider.as_str() {
        "http" => Ok(Arc::new(HttpQa::new(config)?)),
        "disabled" => Ok(Arc::new(DisabledQa)),
        other => bail!("Unknown qa provider: {}", other),
    }
}

/// Instantiate the summarization provider selected by configuration.
pub fn create_summary_provider(
    config: &CapabilityConfig,
) -> anyhow::Result<Arc<dyn SummaryProvider>> {
    match config.provider.as_str() {
        "http" => Ok(Arc::new(HttpSummarizer::new(config)?)),
        "disabled" => Ok(Arc::new(DisabledSummarizer)),
        other => bail!("Unknown summarizer provider: {}", other),
    }
}

// ============ Disabled Providers ============

/// QA provider used when `[qa]` is not configured. Always errors.
pub struct DisabledQa;

#[async_trait]
impl QaProvider for DisabledQa {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn answer(&self, _question: &str, _context: &str) -> Result<Answer> {
        Err(Error::Capability(
            "question answering is disabled — set [qa] provider and endpoint in config".to_string(),
        ))
    }
}

/// Summarization provider used when `[summarizer]` is not configured.
pub struct DisabledSummarizer;

#[async_trait]
impl SummaryProvider for DisabledSummarizer {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn summarize(&self, _text: &str) -> Result<String> {
        Err(Error::Capability(
            "summarization is disabled — set [summarizer] provider and endpoint in config"
                .to_string(),
        ))
    }
}

// ============ HTTP Providers ============

/// Answer shape returned by the inference endpoint. `score`/`start`/`end`
/// default to zero for services that only return the answer text.
#[derive(Debug, Deserialize)]
struct QaResponse {
    answer: String,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    start: usize,
    #[serde(default)]
    end: usize,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    summary: String,
}

/// Extractive QA over a remote inference endpoint.
pub struct HttpQa {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpQa {
    pub fn new(config: &CapabilityConfig) -> anyhow::Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| anyhow::anyhow!("qa.endpoint required for the http provider"))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl QaProvider for HttpQa {
    fn name(&self) -> &str {
        "http"
    }

    async fn answer(&self, question: &str, context: &str) -> Result<Answer> {
        let body = serde_json::json!({
            "question": question,
            "context": context,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Capability(format!("QA request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(Error::Capability(format!(
                "QA service error {}: {}",
                status, body_text
            )));
        }

        let parsed: QaResponse = response
            .json()
            .await
            .map_err(|e| Error::Capability(format!("Invalid QA response: {}", e)))?;

        Ok(Answer {
            text: parsed.answer,
            confidence: parsed.score,
            span: (parsed.start, parsed.end),
        })
    }
}

/// Summarization over a remote inference endpoint: request `{text}`,
/// response `{summary}`.
pub struct HttpSummarizer {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpSummarizer {
    pub fn new(config: &CapabilityConfig) -> anyhow::Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or_else(|| anyhow::anyhow!("summarizer.endpoint required for the http provider"))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl SummaryProvider for HttpSummarizer {
    fn name(&self) -> &str {
        "http"
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        let body = serde_json::json!({ "text": text });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Capability(format!("Summarization request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(Error::Capability(format!(
                "Summarization service error {}: {}",
                status, body_text
            )));
        }

        let parsed: SummaryResponse = response
            .json()
            .await
            .map_err(|e| Error::Capability(format!("Invalid summarization response: {}", e)))?;

        Ok(parsed.summary)
    }
}
