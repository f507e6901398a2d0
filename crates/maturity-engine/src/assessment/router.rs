use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::branch::SubmissionOutcome;
use super::bracket::Bracket;
use super::domain::{AnswerRecord, Dimension, UserId};
use super::registry::CatalogError;
use super::repository::{ProfileRepository, RepositoryError};
use super::service::{AssessmentService, ServiceError};

/// Router builder exposing the engine's operations over HTTP.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: ProfileRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/users/:user_id/assessments/:dimension/answers",
            post(submit_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/assessments/:dimension/next",
            get(next_group_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/assessments/:dimension",
            get(progress_handler::<R>),
        )
        .route(
            "/api/v1/users/:user_id/baseline",
            post(baseline_handler::<R>),
        )
        .route("/api/v1/users/:user_id/score", get(score_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitAnswersRequest {
    pub(crate) bracket: Bracket,
    pub(crate) group_index: usize,
    pub(crate) answers: AnswerRecord,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BaselineRequest {
    pub(crate) score: f64,
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path((user_id, dimension)): Path<(String, String)>,
    axum::Json(request): axum::Json<SubmitAnswersRequest>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let user = UserId(user_id);
    let dimension = match Dimension::from_key(&dimension) {
        Ok(dimension) => dimension,
        Err(error) => return bad_request(error),
    };

    match service.submit_answers(
        &user,
        dimension,
        request.bracket,
        request.group_index,
        &request.answers,
    ) {
        Ok(report) => {
            let status = if matches!(report.outcome, SubmissionOutcome::Incomplete { .. }) {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::OK
            };
            (status, axum::Json(report)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn next_group_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path((user_id, dimension)): Path<(String, String)>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let user = UserId(user_id);
    let dimension = match Dimension::from_key(&dimension) {
        Ok(dimension) => dimension,
        Err(error) => return bad_request(error),
    };

    match service.next_group(&user, dimension) {
        Ok(next) => (StatusCode::OK, axum::Json(next)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn progress_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path((user_id, dimension)): Path<(String, String)>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let user = UserId(user_id);
    let dimension = match Dimension::from_key(&dimension) {
        Ok(dimension) => dimension,
        Err(error) => return bad_request(error),
    };

    match service.progress(&user, dimension) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn baseline_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(user_id): Path<String>,
    axum::Json(request): axum::Json<BaselineRequest>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let user = UserId(user_id);
    match service.record_baseline(&user, request.score) {
        Ok(overall) => (StatusCode::OK, axum::Json(overall)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let user = UserId(user_id);
    match service.overall(&user) {
        Ok(overall) => (StatusCode::OK, axum::Json(overall)).into_response(),
        Err(ServiceError::NotStarted(_)) => {
            let payload = json!({ "status": "not_started" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn bad_request(error: CatalogError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::Catalog(
            CatalogError::UnknownDimension(_)
            | CatalogError::UnknownBracket(_)
            | CatalogError::GroupIndexOutOfRange { .. },
        ) => StatusCode::BAD_REQUEST,
        ServiceError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ServiceError::Repository(RepositoryError::VersionConflict) => StatusCode::CONFLICT,
        ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ServiceError::NotStarted(_) => StatusCode::CONFLICT,
        ServiceError::OutOfRange(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
