use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::quiz::{QuizId, QuizOutcome, SubmittedAnswers};
use super::repository::{AttemptRepository, QuizRepository};
use super::service::{QuizService, QuizServiceError};
use crate::creators::CreatorHandle;

/// Body of a quiz submission. The creator is named explicitly on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRequest {
    pub creator_handle: CreatorHandle,
    #[serde(default)]
    pub answers: SubmittedAnswers,
}

/// Router exposing quiz grading and attempt history.
pub fn quiz_router<Q, A>(service: Arc<QuizService<Q, A>>) -> Router
where
    Q: QuizRepository + 'static,
    A: AttemptRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/quizzes/:quiz_id/attempts",
            post(submit_handler::<Q, A>),
        )
        .route(
            "/api/v1/quizzes/:quiz_id/attempts/:creator_handle",
            get(history_handler::<Q, A>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<Q, A>(
    State(service): State<Arc<QuizService<Q, A>>>,
    Path(quiz_id): Path<String>,
    Json(request): Json<AttemptRequest>,
) -> Response
where
    Q: QuizRepository + 'static,
    A: AttemptRepository + 'static,
{
    let quiz_id = QuizId(quiz_id);
    match service.submit(&request.creator_handle, &quiz_id, request.answers) {
        Ok(submission) => {
            let status = match submission.result {
                QuizOutcome::Scored(_) => StatusCode::OK,
                QuizOutcome::Incomplete { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            };
            (status, Json(submission)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<Q, A>(
    State(service): State<Arc<QuizService<Q, A>>>,
    Path((quiz_id, creator_handle)): Path<(String, String)>,
) -> Response
where
    Q: QuizRepository + 'static,
    A: AttemptRepository + 'static,
{
    match service.history(&CreatorHandle(creator_handle), &QuizId(quiz_id)) {
        Ok(history) => (StatusCode::OK, Json(history)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: QuizServiceError) -> Response {
    let status = match error {
        QuizServiceError::QuizNotFound(_) => StatusCode::NOT_FOUND,
        QuizServiceError::Definition(_) | QuizServiceError::Repository(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
