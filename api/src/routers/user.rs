use axum::{
    Extension, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use app::persistence::users::{create_user, get_profile, global_leaderboard};
use app::state::AppState;
use models::params::user::CreateUserParams;
use models::schemas::user::{AuthSchema, GlobalRankSchema, UserProfileSchema, UserSchema};

use crate::ApiResponse;
use crate::error::ApiError;
use crate::extractor::{Json, Valid};
use crate::middleware::extension::require_user;
use crate::models::response::ErrorBody;

#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserParams,
    responses(
        (status = 201, description = "Profile created for the caller's identity", body = ApiResponse<UserSchema>),
        (status = 400, description = "Invalid input or username taken", body = ErrorBody),
        (status = 401, description = "Missing identity", body = ErrorBody),
    ),
    security(("bearer_auth" = [])),
)]
pub async fn users_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthSchema>,
    Valid(Json(params)): Valid<Json<CreateUserParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_user(&auth)?;
    let user = create_user(&state.conn, &user.id, params).await?;

    let response = ApiResponse::success("User created successfully", Some(UserSchema::from(user)));
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/users/leaderboard",
    tag = "users",
    responses(
        (status = 200, description = "Top users by average score", body = ApiResponse<Vec<GlobalRankSchema>>),
    ),
)]
pub async fn users_leaderboard_get(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let leaderboard = global_leaderboard(&state.conn).await?;
    Ok(Json(ApiResponse::success(
        "Leaderboard retrieved successfully",
        Some(leaderboard),
    )))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User profile", body = ApiResponse<UserProfileSchema>),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
)]
pub async fn users_id_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = get_profile(&state.conn, &id).await?;
    Ok(Json(ApiResponse::success("User retrieved successfully", Some(profile))))
}

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", post(users_post))
        .route("/leaderboard", get(users_leaderboard_get))
        .route("/{id}", get(users_id_get))
}
