/*!
 * HTTP endpoint.
 *
 * Thin axum adapter: parses the request body into text, hands it to the
 * orchestrator and serializes the report.
 *
 * - `POST /` and `POST /process`: JSON `{"text": ...}` or a urlencoded form
 * - `GET /health`: liveness probe
 */

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use log::{debug, info};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use url::form_urlencoded;

use crate::pipeline::{HandleStatus, Orchestrator, ResponseReport};

/// Error message for bodies that cannot be parsed
pub const INVALID_BODY: &str = "invalid request body";

/// Shared state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Request orchestrator, built once at startup
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// Create new application state
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// Request body; a missing `text` is the empty string
#[derive(Debug, Deserialize, Default)]
pub struct TextPayload {
    #[serde(default)]
    pub text: String,
}

/// Build the application router
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let cors = if cors_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/", post(process))
        .route("/process", post(process))
        .route("/health", get(health_check))
        .layer(cors)
        .with_state(state)
}

/// Liveness probe
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Process a text snippet
async fn process(State(state): State<AppState>, request: Request) -> Response {
    let payload = match read_payload(request, &state).await {
        Ok(payload) => payload,
        Err(reason) => {
            debug!("Rejected request body: {}", reason);
            return (StatusCode::BAD_REQUEST, Json(ResponseReport::error(INVALID_BODY))).into_response();
        }
    };

    let (report, status) = state.orchestrator.handle(&payload.text).await;
    (status_code(status), Json(report)).into_response()
}

fn status_code(status: HandleStatus) -> StatusCode {
    match status {
        HandleStatus::Ok => StatusCode::OK,
        HandleStatus::BadRequest => StatusCode::BAD_REQUEST,
    }
}

/// Read the payload as JSON regardless of content type, falling back to a
/// urlencoded form when the client declared one
async fn read_payload(request: Request, state: &AppState) -> Result<TextPayload, String> {
    let is_form = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));

    let body = Bytes::from_request(request, state)
        .await
        .map_err(|e| e.body_text())?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TextPayload::default());
    }

    match serde_json::from_slice::<TextPayload>(&body) {
        Ok(payload) => Ok(payload),
        Err(_) if is_form => Ok(form_payload(&body)),
        Err(e) => Err(e.to_string()),
    }
}

/// Decode a urlencoded body; a missing `text` field means empty text
fn form_payload(body: &[u8]) -> TextPayload {
    let text = form_urlencoded::parse(body)
        .find(|(key, _)| key == "text")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default();
    TextPayload { text }
}

/// Bind and serve until Ctrl-C
pub async fn serve(state: AppState, bind_address: &str, cors_origins: &[String]) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state, cors_origins))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
