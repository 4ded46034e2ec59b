//! HTTP server: webhook endpoint plus a static landing page.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
};
use serde::Serialize;
use tracing::{error, info, warn};

use mojiban_core::EventBatch;

use crate::commands;
use crate::render;
use crate::state::{AppState, RESPONSE_MAX_CHARS};

static INDEX_HTML: &str = include_str!("../static/index.html");

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Run the HTTP server
pub async fn run(state: Arc<AppState>, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler).post(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Landing page - GET /
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Webhook handler - POST /
///
/// Malformed JSON and per-event failures are logged and skipped; whatever
/// URLs were collected before a failure are still returned.
async fn webhook_handler(State(state): State<Arc<AppState>>, body: String) -> impl IntoResponse {
    let batch: EventBatch = match serde_json::from_str(&body) {
        Ok(batch) => batch,
        Err(e) => {
            error!("Malformed event batch: {}", e);
            return plain_text(String::new());
        }
    };

    plain_text(process_batch(&state, &batch).await)
}

/// Render and upload an image for every command match in the batch, and
/// collect the hosted URLs into the response body.
async fn process_batch(state: &AppState, batch: &EventBatch) -> String {
    let mut results = String::new();

    for event in &batch.events {
        let Some(message) = &event.message else {
            continue;
        };

        for m in commands::matches(&state.rules, &message.text) {
            info!(
                "Command '!{}' matched in room '{}' by '{}'",
                m.rule.name, message.room, message.nickname
            );

            let png = match render::render_png(&state.assets, &m.rule.style, &m.lines) {
                Ok(png) => png,
                Err(e) => {
                    error!("Render failed for '!{}': {}", m.rule.name, e);
                    continue;
                }
            };

            match state.uploader.upload(png).await {
                Ok(Some(url)) => {
                    results.push_str(&url);
                    results.push('\n');
                }
                Ok(None) => {
                    warn!("Image host returned no usable URL for '!{}'", m.rule.name);
                }
                Err(e) => {
                    error!("Upload failed for '!{}': {}", m.rule.name, e);
                }
            }
        }
    }

    truncate_chars(results.trim_end_matches('\n'), RESPONSE_MAX_CHARS)
}

fn plain_text(body: String) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
}

/// Cut to at most `max` characters, on a character boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_chars("hello", 1000), "hello");
        assert_eq!(truncate_chars("", 1000), "");
    }

    #[test]
    fn long_strings_cut_to_the_bound() {
        let long = "u".repeat(1500);
        let cut = truncate_chars(&long, RESPONSE_MAX_CHARS);
        assert_eq!(cut.chars().count(), 1000);
    }

    #[test]
    fn exact_length_is_kept_whole() {
        let exact = "x".repeat(1000);
        assert_eq!(truncate_chars(&exact, RESPONSE_MAX_CHARS), exact);
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let wide = "あ".repeat(1200);
        let cut = truncate_chars(&wide, RESPONSE_MAX_CHARS);
        assert_eq!(cut.chars().count(), 1000);
        assert!(cut.is_char_boundary(cut.len()));
    }

    #[test]
    fn index_page_is_embedded() {
        assert!(INDEX_HTML.contains("mojiban"));
    }
}
