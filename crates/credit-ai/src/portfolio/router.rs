use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::PortfolioSnapshot;

/// Router serving read-only views over a generated portfolio.
pub fn portfolio_router(snapshot: Arc<PortfolioSnapshot>) -> Router {
    Router::new()
        .route("/api/v1/dashboard", get(dashboard_handler))
        .route("/api/v1/borrowers", get(borrowers_handler))
        .route("/api/v1/borrowers/:borrower_id", get(borrower_handler))
        .route("/api/v1/models", get(models_handler))
        .route("/api/v1/fairness", get(fairness_handler))
        .with_state(snapshot)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BorrowerQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

pub(crate) async fn dashboard_handler(State(snapshot): State<Arc<PortfolioSnapshot>>) -> Response {
    (StatusCode::OK, Json(snapshot.dashboard())).into_response()
}

pub(crate) async fn borrowers_handler(
    State(snapshot): State<Arc<PortfolioSnapshot>>,
    Query(query): Query<BorrowerQuery>,
) -> Response {
    let needle = query.q.as_deref().unwrap_or_default();
    let total = snapshot.search(needle, None).len();
    let matches = snapshot.search(needle, query.limit);
    let payload = json!({
        "total": total,
        "returned": matches.len(),
        "borrowers": matches,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn borrower_handler(
    State(snapshot): State<Arc<PortfolioSnapshot>>,
    Path(borrower_id): Path<String>,
) -> Response {
    match snapshot.borrower(&borrower_id) {
        Some(borrower) => (StatusCode::OK, Json(borrower)).into_response(),
        None => {
            let payload = json!({
                "error": format!("borrower {borrower_id} not found"),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn models_handler(State(snapshot): State<Arc<PortfolioSnapshot>>) -> Response {
    (StatusCode::OK, Json(&snapshot.models)).into_response()
}

pub(crate) async fn fairness_handler(State(snapshot): State<Arc<PortfolioSnapshot>>) -> Response {
    (StatusCode::OK, Json(&snapshot.fairness)).into_response()
}
