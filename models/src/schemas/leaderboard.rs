use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// One ranked row of a tournament leaderboard. Derived on demand, never stored.
#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub username: String,
    pub avatar: String,
    pub score: i32,
    pub completed_at: DateTime<Utc>,
    pub rank: u32,
}
