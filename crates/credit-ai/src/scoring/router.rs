use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::{compute_score, question_catalogue, AnswerSet};
use crate::advisory::generate_suggestions;
use crate::report::ScoreReport;

/// Router exposing the questionnaire catalogue, scoring and report export.
pub fn scoring_router() -> Router {
    Router::new()
        .route("/api/v1/questions", get(questions_handler))
        .route("/api/v1/score", post(score_handler))
        .route("/api/v1/score/report", post(report_handler))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportRequest {
    #[serde(default)]
    pub answers: AnswerSet,
}

pub(crate) async fn questions_handler() -> Response {
    let payload = json!({
        "questions": question_catalogue(),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

/// Body rejections share the `{"error": ...}` shape of the validation failures.
fn rejection_response(rejection: JsonRejection) -> Response {
    warn!(error = %rejection.body_text(), "unreadable answer payload");
    let payload = json!({
        "error": rejection.body_text(),
    });
    (rejection.status(), Json(payload)).into_response()
}

pub(crate) async fn score_handler(payload: Result<Json<AnswerSet>, JsonRejection>) -> Response {
    let answers = match payload {
        Ok(Json(answers)) => answers,
        Err(rejection) => return rejection_response(rejection),
    };
    if let Err(error) = answers.validate() {
        warn!(error = %error, "rejected answer set");
        let payload = json!({
            "error": error.to_string(),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    let result = compute_score(&answers);
    let suggestions = generate_suggestions(&answers, &result);
    info!(
        credit_score = result.credit_score,
        risk_band = result.risk_band.label(),
        suggestions = suggestions.len(),
        "answer set scored"
    );

    let payload = json!({
        "result": result,
        "suggestions": suggestions,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn report_handler(
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    let answers = match payload {
        Ok(Json(request)) => request.answers,
        Err(rejection) => return rejection_response(rejection),
    };
    if let Err(error) = answers.validate() {
        let payload = json!({
            "error": error.to_string(),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    let result = compute_score(&answers);
    let suggestions = generate_suggestions(&answers, &result);
    let generated_on = chrono::Local::now().date_naive();
    let report = ScoreReport::build(
        &result,
        &answers,
        &answers.age_label(),
        &suggestions,
        generated_on,
    );
    info!(
        file_name = %report.file_name,
        pages = report.page_count(),
        "score report rendered"
    );

    let disposition = format!("attachment; filename=\"{}\"", report.file_name);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.render(),
    )
        .into_response()
}
