use axum::Router;

pub mod quiz;
pub mod root;
pub mod tournament;
pub mod user;

use app::state::AppState;
use quiz::create_quiz_router;
use root::create_root_router;
use tournament::create_tournament_router;
use user::create_user_router;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(create_root_router())
        .nest("/users", create_user_router())
        .nest("/quizzes", create_quiz_router())
        .nest("/tournaments", create_tournament_router())
        .with_state(state)
}
