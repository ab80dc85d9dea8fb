//! HTTP/SSE transport for remote access.
//!
//! Exposes the same dispatcher as the stdio transport over HTTP POST, plus a
//! keep-alive SSE stream and a couple of informational endpoints:
//!
//! - `GET /` — server identity, endpoint map, available tools
//! - `GET /health` — health check
//! - `GET /mcp` — usage hint (the endpoint is POST-only)
//! - `POST /mcp` — JSON-RPC envelope in/out
//! - `GET /sse` — connection event followed by periodic heartbeats; no tool
//!   data is pushed through the stream
//!
//! Protocol-level errors still travel as JSON-RPC error envelopes with HTTP
//! 200; the HTTP status only reflects transport-level conditions.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::{Stream, StreamExt};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::HttpConfig;
use crate::mcp::dispatch::Dispatcher;
use crate::mcp::protocol::{
    parse_message, IncomingMessage, JsonRpcError, MCP_PROTOCOL_VERSION, SERVER_NAME,
};

/// Interval between SSE heartbeat events.
const HEARTBEAT_PERIOD: Duration = Duration::from_secs(15);

/// Builds the HTTP router over a shared dispatcher.
#[must_use]
pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/mcp", get(mcp_info).post(mcp_post))
        .route("/sse", get(sse_stream))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(dispatcher)
}

/// Binds and serves the HTTP transport until a termination signal.
///
/// # Errors
///
/// Returns an error if binding or serving fails.
pub async fn serve(config: &HttpConfig, dispatcher: Arc<Dispatcher>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;

    info!(
        host = %config.host,
        port = config.port,
        "HTTP transport listening"
    );

    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(_) => return tokio::signal::ctrl_c().await.unwrap_or(()),
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("Received shutdown signal, stopping HTTP transport");
}

/// Root endpoint with server information.
async fn root(State(dispatcher): State<Arc<Dispatcher>>) -> Json<Value> {
    let registry = dispatcher.registry();

    Json(json!({
        "name": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "protocolVersion": MCP_PROTOCOL_VERSION,
        "transport": "http",
        "endpoints": {
            "health": "/health",
            "mcp": "/mcp (POST only)",
            "sse": "/sse"
        },
        "tools": {
            "count": registry.len(),
            "available": registry.names()
        },
        "description": "Economic time-series data server via MCP protocol"
    }))
}

/// Health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "transport": "sse"}))
}

/// MCP endpoint info (GET request).
async fn mcp_info() -> Json<Value> {
    Json(json!({
        "message": "MCP endpoint - use POST requests",
        "methods": ["initialize", "tools/list", "tools/call"],
        "example": {
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list",
            "params": {}
        }
    }))
}

/// Handles MCP requests via HTTP POST.
///
/// The body is read raw and parsed by hand: a malformed body must still be
/// answered with a JSON-RPC error envelope at HTTP 200, which a rejecting
/// JSON extractor would preempt with a plain-text 400.
async fn mcp_post(State(dispatcher): State<Arc<Dispatcher>>, body: Bytes) -> Response {
    let text = match std::str::from_utf8(&body) {
        Ok(text) => text,
        Err(_) => return Json(JsonRpcError::parse_error()).into_response(),
    };

    let message = match parse_message(text) {
        Ok(message) => message,
        Err(error) => return Json(error).into_response(),
    };

    match message {
        IncomingMessage::Request(req) => match dispatcher.dispatch(&req) {
            Ok(response) => Json(response).into_response(),
            Err(error) => Json(error).into_response(),
        },
        // One-way message; acknowledge receipt without a body.
        IncomingMessage::Notification(_) => StatusCode::ACCEPTED.into_response(),
    }
}

/// SSE endpoint: a connection event followed by periodic heartbeats.
async fn sse_stream() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let connected = tokio_stream::once(Ok::<Event, Infallible>(
        Event::default()
            .event("connected")
            .data(json!({"type": "connection", "status": "established"}).to_string()),
    ));

    let heartbeats = IntervalStream::new(tokio::time::interval(HEARTBEAT_PERIOD))
        .skip(1) // the first interval tick fires immediately
        .map(|_| {
            Ok::<Event, Infallible>(Event::default().event("ping").data(r#"{"type":"ping"}"#))
        });

    Sse::new(connected.chain(heartbeats)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(10))
            .text("keepalive"),
    )
}
