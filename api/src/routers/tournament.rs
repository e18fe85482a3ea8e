use axum::{
    Extension, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use app::core::{
    cancel_tournament, create_tournament, get_leaderboard, get_tournament_detail, join_tournament,
    submit_answers,
};
use app::persistence::tournaments::search_tournaments;
use app::state::AppState;
use models::params::tournament::{CreateTournamentParams, SubmitTournamentParams};
use models::queries::TournamentPaginationQuery;
use models::schemas::leaderboard::LeaderboardEntry;
use models::schemas::pagination::PaginatedData;
use models::schemas::tournament::{
    JoinResultSchema, SubmitResultSchema, TournamentDetailSchema, TournamentSchema,
};
use models::schemas::user::AuthSchema;

use crate::ApiResponse;
use crate::error::ApiError;
use crate::extractor::{Json, Valid};
use crate::middleware::extension::require_user;
use crate::models::response::ErrorBody;

#[utoipa::path(
    post,
    path = "/tournaments",
    tag = "tournaments",
    request_body = CreateTournamentParams,
    responses(
        (status = 201, description = "Tournament created", body = ApiResponse<TournamentSchema>),
        (status = 400, description = "Invalid schedule or input", body = ErrorBody),
        (status = 401, description = "Missing identity", body = ErrorBody),
        (status = 404, description = "Quiz not found", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn tournaments_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSchema>,
    Valid(Json(params)): Valid<Json<CreateTournamentParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_user(&auth)?;
    let tournament = create_tournament(&state, params, &user.id).await?;

    let response = ApiResponse::success("Tournament created successfully", Some(tournament));
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/tournaments",
    tag = "tournaments",
    params(TournamentPaginationQuery),
    responses(
        (status = 200, description = "Public tournaments by start time", body = ApiResponse<PaginatedData<TournamentSchema>>),
    ),
)]
pub async fn tournaments_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSchema>,
    Query(query): Query<TournamentPaginationQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let viewer = auth.user.as_ref().map(|user| user.id.as_str());
    let result = search_tournaments(&state.conn, query, viewer, Utc::now()).await?;

    Ok(Json(ApiResponse::success(
        "Tournaments retrieved successfully",
        Some(result),
    )))
}

#[utoipa::path(
    get,
    path = "/tournaments/{id}",
    tag = "tournaments",
    params(("id" = String, Path, description = "Tournament id")),
    responses(
        (status = 200, description = "Tournament with participants", body = ApiResponse<TournamentDetailSchema>),
        (status = 404, description = "Tournament not found", body = ErrorBody),
    ),
)]
pub async fn tournaments_id_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSchema>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let viewer = auth.user.as_ref().map(|user| user.id.as_str());
    let result = get_tournament_detail(&state, &id, viewer).await?;

    Ok(Json(ApiResponse::success(
        "Tournament retrieved successfully",
        Some(result),
    )))
}

#[utoipa::path(
    post,
    path = "/tournaments/{id}/join",
    tag = "tournaments",
    params(("id" = String, Path, description = "Tournament id")),
    responses(
        (status = 200, description = "Joined", body = ApiResponse<JoinResultSchema>),
        (status = 401, description = "Missing identity", body = ErrorBody),
        (status = 404, description = "Tournament not found", body = ErrorBody),
        (status = 409, description = "INVALID_STATE, TOURNAMENT_FULL or ALREADY_JOINED", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn tournaments_id_join_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSchema>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_user(&auth)?;
    let joined = join_tournament(&state, &id, &user.id).await?;

    Ok(Json(ApiResponse::success(
        "Successfully joined tournament",
        Some(joined),
    )))
}

#[utoipa::path(
    post,
    path = "/tournaments/{id}/submit",
    tag = "tournaments",
    params(("id" = String, Path, description = "Tournament id")),
    request_body = SubmitTournamentParams,
    responses(
        (status = 200, description = "Submission scored", body = ApiResponse<SubmitResultSchema>),
        (status = 401, description = "Missing identity", body = ErrorBody),
        (status = 404, description = "Tournament not found", body = ErrorBody),
        (status = 409, description = "INVALID_STATE, NOT_REGISTERED or ALREADY_SUBMITTED", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn tournaments_id_submit_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSchema>,
    Path(id): Path<String>,
    Valid(Json(params)): Valid<Json<SubmitTournamentParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_user(&auth)?;
    let result = submit_answers(&state, &id, &user.id, params).await?;

    Ok(Json(ApiResponse::success(
        "Answers submitted successfully",
        Some(result),
    )))
}

#[utoipa::path(
    get,
    path = "/tournaments/{id}/leaderboard",
    tag = "tournaments",
    params(("id" = String, Path, description = "Tournament id")),
    responses(
        (status = 200, description = "Ranked completed participants", body = ApiResponse<Vec<LeaderboardEntry>>),
        (status = 404, description = "Tournament not found", body = ErrorBody),
    ),
)]
pub async fn tournaments_id_leaderboard_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let leaderboard = get_leaderboard(&state, &id).await?;

    Ok(Json(ApiResponse::success(
        "Leaderboard retrieved successfully",
        Some(leaderboard),
    )))
}

#[utoipa::path(
    post,
    path = "/tournaments/{id}/cancel",
    tag = "tournaments",
    params(("id" = String, Path, description = "Tournament id")),
    responses(
        (status = 200, description = "Tournament cancelled", body = ApiResponse<TournamentSchema>),
        (status = 401, description = "Missing identity", body = ErrorBody),
        (status = 403, description = "Caller is not the creator", body = ErrorBody),
        (status = 404, description = "Tournament not found", body = ErrorBody),
        (status = 409, description = "Tournament already finished", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn tournaments_id_cancel_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSchema>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_user(&auth)?;
    let tournament = cancel_tournament(&state, &id, &user.id).await?;

    Ok(Json(ApiResponse::success(
        "Tournament cancelled",
        Some(tournament),
    )))
}

pub fn create_tournament_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tournaments_get).post(tournaments_post))
        .route("/{id}", get(tournaments_id_get))
        .route("/{id}/join", post(tournaments_id_join_post))
        .route("/{id}/submit", post(tournaments_id_submit_post))
        .route("/{id}/leaderboard", get(tournaments_id_leaderboard_get))
        .route("/{id}/cancel", post(tournaments_id_cancel_post))
}
