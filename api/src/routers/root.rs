use axum::{Router, extract::State, routing::get};
use sea_orm::{ConnectionTrait, Statement};

use app::error::ArenaError;
use app::state::AppState;

use crate::error::ApiError;

/// Liveness probe that also round-trips the database.
async fn root_get(State(state): State<AppState>) -> Result<&'static str, ApiError> {
    state
        .conn
        .query_one(Statement::from_string(
            state.conn.get_database_backend(),
            "SELECT 1",
        ))
        .await
        .map_err(ArenaError::from)?;

    Ok("OK")
}

pub fn create_root_router() -> Router<AppState> {
    Router::new().route("/", get(root_get))
}
