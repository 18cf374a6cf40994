//! axum routing and the listener loop

use super::handlers::{handle_analyze_url, handle_verify, ApiResponse, AppState};
use crate::errors::{AppError, AppResult};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

type SharedState = Arc<AppState>;

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

async fn analyze_url(State(state): State<SharedState>, body: Bytes) -> ApiResponse {
    handle_analyze_url(&state, &body).await
}

async fn verify(State(state): State<SharedState>, body: Bytes) -> ApiResponse {
    handle_verify(&state, &body).await
}

async fn health(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "provider": state.gateway.capability_name(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// All API routes; `/api/analyze-url` is kept for older extension builds
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/analyze-url", post(analyze_url))
        .route("/api/analyze-url", post(analyze_url))
        .route("/api/v1/verify", post(verify))
        .route("/api/v1/health", get(health))
        .with_state(Arc::new(state))
}

/// Serve on an already-bound listener until the future is dropped
pub async fn serve_listener(listener: TcpListener, state: AppState) -> AppResult<()> {
    axum::serve(listener, router(state))
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}

/// Bind and serve until Ctrl-C
pub async fn serve(bind: &str, state: AppState) -> AppResult<()> {
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|e| AppError::Server(format!("Failed to bind {}: {}", bind, e)))?;
    let local = listener
        .local_addr()
        .map_err(|e| AppError::Server(e.to_string()))?;

    info!(
        "FakeCheck API listening on http://{} (provider: {})",
        local,
        state.gateway.capability_name()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutting down");
        })
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}
