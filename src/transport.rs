//! HTTP transport: routing, response-mode negotiation, response framing.
//!
//! One POST endpoint carries the JSON-RPC body. Before dispatch, the
//! caller's `Accept` preference fixes how the eventual response is
//! delivered: a plain JSON document, or exactly one framed server-sent
//! event after which the connection closes. The choice is made once per
//! request and never varies mid-response.

use crate::auth::bearer_token;
use crate::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::server::McpServer;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

/// How a single response is framed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// A single JSON document.
    Json,

    /// Exactly one framed event, then the connection closes. This is a
    /// one-shot message, not a continuing stream.
    EventStream,
}

impl ResponseMode {
    /// Fix the response mode from the caller's accept-preference.
    pub fn negotiate(headers: &HeaderMap) -> Self {
        let accepts_stream = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(|accept| accept.contains("text/event-stream"))
            .unwrap_or(false);

        if accepts_stream {
            ResponseMode::EventStream
        } else {
            ResponseMode::Json
        }
    }
}

/// Shared router state.
#[derive(Clone)]
struct AppState {
    server: Arc<McpServer>,
}

/// Build the HTTP router for the server.
pub fn router(server: Arc<McpServer>, enable_cors: bool) -> Router {
    let state = AppState { server };

    let mut router = Router::new()
        .route("/mcp", post(rpc_handler).get(health_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

/// The single JSON-RPC endpoint.
async fn rpc_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    // Fixed before dispatch; must not vary mid-response.
    let mode = ResponseMode::negotiate(&headers);
    let credential = bearer_token(&headers);

    let response = state.server.dispatch(request, credential).await;
    write_response(mode, response)
}

/// Liveness probe. Proves connectivity with a trivial database round-trip.
async fn health_handler(State(state): State<AppState>) -> Response {
    match state.server.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "server": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION")
            })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unavailable",
                "error": e.to_string()
            })),
        )
            .into_response(),
    }
}

/// Frame a dispatch outcome according to the negotiated mode.
///
/// A `None` body (the one-way notification) is acknowledged with 202 and no
/// content regardless of mode.
fn write_response(mode: ResponseMode, response: Option<JsonRpcResponse>) -> Response {
    let Some(response) = response else {
        return StatusCode::ACCEPTED.into_response();
    };

    match mode {
        ResponseMode::Json => Json(response).into_response(),
        ResponseMode::EventStream => match serde_json::to_string(&response) {
            Ok(payload) => Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, "text/event-stream")
                .header(header::CACHE_CONTROL, "no-cache")
                .body(Body::from(format!("event: message\ndata: {payload}\n\n")))
                .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
            Err(e) => {
                error!("Failed to serialize response: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
    }
}
