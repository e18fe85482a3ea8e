use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "QuizArena API",
        version = "0.1.0",
        description = "Quiz tournaments with live leaderboards",
        license(name = "MIT"),
    ),
    paths(
        crate::routers::user::users_post,
        crate::routers::user::users_leaderboard_get,
        crate::routers::user::users_id_get,
        crate::routers::quiz::quizzes_post,
        crate::routers::quiz::quizzes_id_get,
        crate::routers::quiz::quizzes_id_submit_post,
        crate::routers::tournament::tournaments_post,
        crate::routers::tournament::tournaments_get,
        crate::routers::tournament::tournaments_id_get,
        crate::routers::tournament::tournaments_id_join_post,
        crate::routers::tournament::tournaments_id_submit_post,
        crate::routers::tournament::tournaments_id_leaderboard_get,
        crate::routers::tournament::tournaments_id_cancel_post,
    ),
    components(
        schemas(
            crate::models::response::ErrorBody,
            models::schemas::user::UserSchema,
            models::schemas::user::UserStatsSchema,
            models::schemas::user::UserProfileSchema,
            models::schemas::user::GlobalRankSchema,
            models::schemas::quiz::QuizSchema,
            models::schemas::quiz::QuestionView,
            models::schemas::quiz::QuestionResult,
            models::schemas::quiz::QuizResultSchema,
            models::schemas::tournament::TournamentSchema,
            models::schemas::tournament::TournamentDetailSchema,
            models::schemas::tournament::ParticipantSchema,
            models::schemas::tournament::AnswerRecord,
            models::schemas::tournament::Prize,
            models::schemas::tournament::JoinResultSchema,
            models::schemas::tournament::SubmitResultSchema,
            models::schemas::leaderboard::LeaderboardEntry,
            models::params::user::CreateUserParams,
            models::params::quiz::CreateQuizParams,
            models::params::quiz::QuestionParams,
            models::params::quiz::SubmitQuizParams,
            models::params::tournament::CreateTournamentParams,
            models::params::tournament::SubmitTournamentParams,
            models::params::tournament::SubmittedAnswer,
            models::domains::sea_orm_active_enums::TournamentStatus,
            models::domains::sea_orm_active_enums::Difficulty,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "users", description = "Profiles and the global leaderboard"),
        (name = "quizzes", description = "Quiz authoring and standalone attempts"),
        (name = "tournaments", description = "Tournament lifecycle, submissions and leaderboards"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT issued by the identity service"))
                        .build(),
                ),
            );
        }
    }
}
