//! HTTP answering service.
//!
//! Exposes the question pipeline over a small JSON API, the web-shaped
//! counterpart of the CLI's `ask` command.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/ask` | Multipart form (`file`, `question`) → JSON answer |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! All error responses follow one schema:
//!
//! ```json
//! { "error": { "code": "unsupported_file_type", "message": "unsupported file type: csv (expected pdf or xlsx)" } }
//! ```
//!
//! Pipeline errors map to 4xx, capability failures to 502. Every request
//! builds a fresh request-scoped pipeline — no state is shared across
//! requests, and a failed request never affects the next one.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::error::Error;
use crate::models::AnswerResult;
use crate::session::Session;

/// Largest accepted upload (bytes). 10-K filings run large.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
}

/// Starts the HTTP answering service on the configured bind address.
/// Runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let state = AppState {
        config: Arc::new(config.clone()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ask", post(handle_ask))
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state);

    println!("finqa server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `POST /ask` — answers one question about one uploaded file.
async fn handle_ask(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut upload_name: Option<String> = None;
    let mut upload_bytes: Option<Vec<u8>> = None;
    let mut question: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, "bad_request", e),
        };
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                upload_name = field.file_name().map(str::to_string);
                upload_bytes = match field.bytes().await {
                    Ok(bytes) => Some(bytes.to_vec()),
                    Err(e) => return error_response(StatusCode::BAD_REQUEST, "bad_request", e),
                };
            }
            Some("question") => {
                question = match field.text().await {
                    Ok(text) => Some(text),
                    Err(e) => return error_response(StatusCode::BAD_REQUEST, "bad_request", e),
                };
            }
            _ => {}
        }
    }

    let (Some(upload_name), Some(upload_bytes)) = (upload_name, upload_bytes) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "bad_request",
            "multipart field 'file' (with a filename) is required",
        );
    };
    let Some(question) = question.filter(|q| !q.trim().is_empty()) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "bad_request",
            "multipart field 'question' must not be empty",
        );
    };

    let mut session = match Session::from_config(&state.config) {
        Ok(session) => session,
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal", e),
    };

    if let Err(e) = session.load(&upload_name, &upload_bytes) {
        return pipeline_error(e);
    }

    match session.ask(&question).await {
        Ok(result) => Json(answer_json(&result)).into_response(),
        Err(e) => pipeline_error(e),
    }
}

fn answer_json(result: &AnswerResult) -> serde_json::Value {
    match result {
        AnswerResult::Extractive(answer) => serde_json::json!({
            "answer": answer.text,
            "confidence": answer.confidence,
            "span": [answer.span.0, answer.span.1],
        }),
        AnswerResult::Lookup(text) => serde_json::json!({ "answer": text }),
    }
}

/// Maps a pipeline error to the response contract.
fn error_code(err: &Error) -> (StatusCode, &'static str) {
    match err {
        Error::UnsupportedFileType(_) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_file_type"),
        Error::NoTextFound => (StatusCode::UNPROCESSABLE_ENTITY, "no_text_found"),
        Error::Pdf(_) => (StatusCode::UNPROCESSABLE_ENTITY, "unreadable_pdf"),
        Error::UnreadableTable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "unreadable_table"),
        Error::NoRelevantContext => (StatusCode::UNPROCESSABLE_ENTITY, "no_relevant_context"),
        Error::Capability(_) => (StatusCode::BAD_GATEWAY, "capability_error"),
        Error::NothingLoaded | Error::NotAReport => (StatusCode::BAD_REQUEST, "bad_request"),
    }
}

fn pipeline_error(err: Error) -> Response {
    let (status, code) = error_code(&err);
    error_response(status, code, err)
}

fn error_response(
    status: StatusCode,
    code: &'static str,
    message: impl std::fmt::Display,
) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": { "code": code, "message": message.to_string() }
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Answer;

    #[test]
    fn pipeline_errors_map_to_the_contract() {
        assert_eq!(
            error_code(&Error::UnsupportedFileType("csv".into())),
            (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_file_type")
        );
        assert_eq!(
            error_code(&Error::NoTextFound),
            (StatusCode::UNPROCESSABLE_ENTITY, "no_text_found")
        );
        assert_eq!(
            error_code(&Error::Capability("down".into())),
            (StatusCode::BAD_GATEWAY, "capability_error")
        );
    }

    #[test]
    fn extractive_answers_serialize_with_span() {
        let value = answer_json(&AnswerResult::Extractive(Answer {
            text: "$500 million".to_string(),
            confidence: 0.91,
            span: (12, 24),
        }));
        assert_eq!(value["answer"], "$500 million");
        assert_eq!(value["span"][1], 24);

        let lookup = answer_json(&AnswerResult::Lookup("Revenue in 2020: 500".to_string()));
        assert_eq!(lookup["answer"], "Revenue in 2020: 500");
        assert!(lookup.get("span").is_none());
    }
}
