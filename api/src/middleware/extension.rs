use app::{state::AppState, utils::decode_data};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use models::schemas::user::{AuthSchema, AuthUser};

use crate::error::ApiError;

/// Attaches the caller's identity, if any, as an `AuthSchema` extension.
/// A missing or invalid token leaves the request anonymous.
pub async fn extension(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "));

    let user = token.and_then(|token| match decode_data::<AuthUser>(&state.config, token) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!("Ignoring bearer token: {}", e);
            None
        }
    });

    req.extensions_mut().insert(AuthSchema { user });

    next.run(req).await
}

pub fn require_user(auth: &AuthSchema) -> Result<&AuthUser, ApiError> {
    auth.user.as_ref().ok_or(ApiError::Unauthorized)
}
