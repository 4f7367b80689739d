//! HTTP surface for the capture endpoint

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::post,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::capture::{Entry, Note};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::CaptureFile;

/// Route accepting captures
pub const CAPTURE_ROUTE: &str = "/api/v0/capture";

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub file: CaptureFile,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            file: CaptureFile::from_config(config),
        }
    }
}

/// Build the router.
///
/// Request bodies are unbounded so every capture reaches the decoder.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(CAPTURE_ROUTE, post(capture))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Decode, render and append a capture.
///
/// The body is taken as raw bytes so malformed payloads still reach the
/// lenient decoder.
async fn capture(State(state): State<AppState>, body: Bytes) -> StatusCode {
    let note = Note::decode_lenient(&body);
    let entry = Entry::from(&note);

    match append_blocking(state.file, entry).await {
        Ok(_) => StatusCode::CREATED,
        Err(e) => {
            tracing::error!("Capture failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn append_blocking(file: CaptureFile, entry: Entry) -> Result<usize> {
    tokio::task::spawn_blocking(move || file.append(&entry))
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))?
}
