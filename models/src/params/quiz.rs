use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domains::sea_orm_active_enums::Difficulty;

#[derive(Deserialize, Serialize, Validate, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionParams {
    #[validate(length(min = 1, max = 500))]
    pub question: String,
    #[validate(length(min = 2))]
    pub options: Vec<String>,
    pub correct_answer: i32,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// At most 1000.
    #[validate(range(min = 1, max = 1000))]
    pub points: Option<i32>,
    #[validate(range(min = 1))]
    pub time_limit: Option<i32>,
}

fn default_public() -> bool {
    true
}

#[derive(Deserialize, Validate, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizParams {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Between 1 and 100 questions.
    #[validate(length(min = 1, max = 100))]
    #[validate(nested)]
    pub questions: Vec<QuestionParams>,
    #[serde(default = "default_public")]
    pub is_public: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Deserialize, Validate, Debug, Clone, ToSchema)]
pub struct SubmitQuizParams {
    /// Selected option per question, `null` when unanswered.
    pub answers: Vec<Option<i32>>,
}
