use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domains::users;

/// Identity decoded from the bearer token.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AuthUser {
    pub id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct AuthSchema {
    pub user: Option<AuthUser>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsSchema {
    pub total_quizzes: i32,
    pub total_score: i64,
    pub average_score: f64,
    pub badges: Vec<String>,
}

#[derive(Serialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSchema {
    pub id: String,
    pub username: String,
    pub avatar: String,
    pub stats: UserStatsSchema,
    pub created_at: DateTime<Utc>,
}

impl From<&users::Model> for UserStatsSchema {
    fn from(user: &users::Model) -> Self {
        Self {
            total_quizzes: user.total_quizzes,
            total_score: user.total_score,
            average_score: user.average_score,
            badges: serde_json::from_value(user.badges.clone()).unwrap_or_default(),
        }
    }
}

impl From<users::Model> for UserSchema {
    fn from(user: users::Model) -> Self {
        Self {
            stats: UserStatsSchema::from(&user),
            id: user.id,
            username: user.username,
            avatar: user.avatar,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileSchema {
    #[serde(flatten)]
    pub user: UserSchema,
    pub created_quizzes: u64,
    /// Tournaments joined.
    pub tournaments: u64,
}

#[derive(Serialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GlobalRankSchema {
    pub rank: usize,
    pub user_id: String,
    pub username: String,
    pub avatar: String,
    pub total_quizzes: i32,
    pub total_score: i64,
    pub average_score: f64,
    pub badges: Vec<String>,
}
