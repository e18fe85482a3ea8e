use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::tournament::Prize;

pub const DEFAULT_MAX_PARTICIPANTS: i32 = 50;

fn default_max_participants() -> i32 {
    DEFAULT_MAX_PARTICIPANTS
}

#[derive(Deserialize, Validate, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTournamentParams {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
    #[validate(length(min = 1))]
    pub quiz_id: String,
    #[serde(default = "default_max_participants")]
    #[validate(range(min = 2))]
    pub max_participants: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    #[validate(nested)]
    pub prizes: Vec<Prize>,
    #[serde(default)]
    pub is_private: bool,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub selected_answer: Option<i32>,
    /// Seconds spent on the question.
    #[serde(default)]
    pub time_spent: u32,
}

#[derive(Deserialize, Validate, Debug, Clone, ToSchema)]
pub struct SubmitTournamentParams {
    /// Indexed by question; `null` or a missing tail means unanswered.
    pub answers: Vec<Option<SubmittedAnswer>>,
}
