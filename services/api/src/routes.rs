use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use credit_ai::chat::ChatMessage;
use credit_ai::portfolio::{portfolio_router, PortfolioSnapshot};
use credit_ai::scoring::scoring_router;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct ChatRequest {
    #[serde(default)]
    pub(crate) messages: Vec<ChatMessage>,
}

pub(crate) fn with_service_routes(snapshot: Arc<PortfolioSnapshot>) -> axum::Router {
    scoring_router()
        .merge(portfolio_router(snapshot))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/chat", axum::routing::post(chat_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// An empty conversation is answered with the greeting without calling the endpoint.
pub(crate) async fn chat_endpoint(
    Extension(state): Extension<AppState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let Some(client) = state.chat else {
        let payload = json!({
            "error": "chat assistant is not configured",
        });
        return (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response();
    };

    if request.messages.is_empty() {
        return (StatusCode::OK, Json(ChatMessage::greeting())).into_response();
    }

    info!(turns = request.messages.len(), "forwarding chat conversation");
    let reply = client.reply(&request.messages).await;
    (StatusCode::OK, Json(reply)).into_response()
}
