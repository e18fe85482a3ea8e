use axum::{
    Extension, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use app::persistence::quizzes::{create_quiz, get_quiz, quiz_view, submit_quiz};
use app::state::AppState;
use models::params::quiz::{CreateQuizParams, SubmitQuizParams};
use models::schemas::quiz::{QuizResultSchema, QuizSchema};
use models::schemas::user::AuthSchema;

use crate::ApiResponse;
use crate::error::ApiError;
use crate::extractor::{Json, Valid};
use crate::middleware::extension::require_user;
use crate::models::response::ErrorBody;

#[utoipa::path(
    post,
    path = "/quizzes",
    tag = "quizzes",
    request_body = CreateQuizParams,
    responses(
        (status = 201, description = "Quiz created", body = ApiResponse<QuizSchema>),
        (status = 400, description = "Invalid quiz", body = ErrorBody),
        (status = 401, description = "Missing identity", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn quizzes_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSchema>,
    Valid(Json(params)): Valid<Json<CreateQuizParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_user(&auth)?;
    let quiz = create_quiz(&state.conn, params, &user.id).await?;

    let response = ApiResponse::success("Quiz created successfully", Some(quiz_view(quiz, true)?));
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/quizzes/{id}",
    tag = "quizzes",
    params(("id" = String, Path, description = "Quiz id")),
    responses(
        (status = 200, description = "Quiz; correct answers only for its creator", body = ApiResponse<QuizSchema>),
        (status = 404, description = "Quiz not found", body = ErrorBody),
    ),
)]
pub async fn quizzes_id_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSchema>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let quiz = get_quiz(&state.conn, &id).await?;
    let reveal = auth.user.is_some_and(|user| user.id == quiz.creator_id);

    Ok(Json(ApiResponse::success(
        "Quiz retrieved successfully",
        Some(quiz_view(quiz, reveal)?),
    )))
}

#[utoipa::path(
    post,
    path = "/quizzes/{id}/submit",
    tag = "quizzes",
    params(("id" = String, Path, description = "Quiz id")),
    request_body = SubmitQuizParams,
    responses(
        (status = 200, description = "Scored attempt with updated stats", body = ApiResponse<QuizResultSchema>),
        (status = 401, description = "Missing identity", body = ErrorBody),
        (status = 404, description = "Quiz or user not found", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn quizzes_id_submit_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSchema>,
    Path(id): Path<String>,
    Valid(Json(params)): Valid<Json<SubmitQuizParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_user(&auth)?;
    let result = submit_quiz(&state.conn, &id, &user.id, params).await?;
    Ok(Json(ApiResponse::success("Quiz submitted successfully", Some(result))))
}

pub fn create_quiz_router() -> Router<AppState> {
    Router::new()
        .route("/", post(quizzes_post))
        .route("/{id}", get(quizzes_id_get))
        .route("/{id}/submit", post(quizzes_id_submit_post))
}
