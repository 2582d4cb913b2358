//! HTTP surface of the enhancement service.
//!
//! `POST /enhance` takes an [`EnhancementRequest`] as JSON and answers with
//! an [`EnhancementResult`]. Failures come back as `{"kind", "message"}` with
//! a status derived from the error kind.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{error, info, warn};
use vivid_core::error::{ErrorKind, VividError};
use vivid_core::io::VideoAdapter;
use vivid_core::pipeline::config::{EnhancementRequest, EnhancementResult, VividConfig};
use vivid_core::pipeline::run_enhancement;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<VividConfig>,
    pub adapter: Arc<dyn VideoAdapter>,
}

impl AppState {
    pub fn new(config: VividConfig, adapter: Arc<dyn VideoAdapter>) -> Self {
        Self {
            config: Arc::new(config),
            adapter,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    kind: ErrorKind,
    message: String,
}

/// A failed request, rendered as a JSON error body.
#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::InputNotFound => StatusCode::NOT_FOUND,
            ErrorKind::UnsupportedFormat => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorKind::ProcessingError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::OutputWriteError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<VividError> for ApiError {
    fn from(e: VividError) -> Self {
        Self {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            kind: self.kind,
            message: self.message,
        };
        (status, Json(body)).into_response()
    }
}

/// Enhance the video named in the request body.
///
/// The frame work is CPU bound, so it runs on the blocking pool.
pub async fn enhance(
    State(state): State<AppState>,
    Json(request): Json<EnhancementRequest>,
) -> Result<Json<EnhancementResult>, ApiError> {
    info!(video = %request.video_path.display(), "Enhance request");

    let task_state = state.clone();
    let task_request = request.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        run_enhancement(
            &task_request,
            task_state.adapter.as_ref(),
            &task_state.config,
        )
    })
    .await
    .map_err(|e| {
        error!(error = %e, "Enhancement task panicked");
        ApiError {
            kind: ErrorKind::ProcessingError,
            message: format!("enhancement task failed: {e}"),
        }
    })?;

    match outcome {
        Ok(result) => {
            info!(output = %result.output_video_path.display(), "Enhance request done");
            Ok(Json(result))
        }
        Err(e) => {
            warn!(video = %request.video_path.display(), kind = %e.kind(), error = %e, "Enhance request failed");
            Err(e.into())
        }
    }
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/enhance", post(enhance))
        .route("/health", get(health))
        .with_state(state)
}

/// Serve until `shutdown` resolves.
pub async fn run_server(
    addr: SocketAddr,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
