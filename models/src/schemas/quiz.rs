use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domains::{quizzes, sea_orm_active_enums::Difficulty};

pub const DEFAULT_QUESTION_POINTS: i32 = 10;
pub const DEFAULT_QUESTION_TIME_LIMIT: i32 = 30;

/// A question as stored inside a quiz's `questions` JSON column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_answer: i32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_points")]
    pub points: i32,
    /// Seconds.
    #[serde(default = "default_time_limit")]
    pub time_limit: i32,
}

fn default_points() -> i32 {
    DEFAULT_QUESTION_POINTS
}

fn default_time_limit() -> i32 {
    DEFAULT_QUESTION_TIME_LIMIT
}

impl Question {
    pub fn from_value(value: serde_json::Value) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn to_value(questions: &[Self]) -> serde_json::Value {
        serde_json::to_value(questions).unwrap_or_default()
    }
}

/// What a player sees: the question without its answer.
#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub question: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<i32>,
    pub difficulty: Difficulty,
    pub points: i32,
    pub time_limit: i32,
}

impl QuestionView {
    fn new(question: Question, reveal: bool) -> Self {
        Self {
            question: question.question,
            options: question.options,
            correct_answer: reveal.then_some(question.correct_answer),
            difficulty: question.difficulty,
            points: question.points,
            time_limit: question.time_limit,
        }
    }
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizSchema {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub questions: Vec<QuestionView>,
    pub max_score: i32,
    pub creator_id: String,
    pub is_public: bool,
    pub tags: Vec<String>,
    pub total_attempts: i32,
    pub average_score: f64,
    pub created_at: DateTime<Utc>,
}

impl QuizSchema {
    /// Builds the public view from already parsed `questions`; correct answers
    /// are only included when `reveal` is set.
    pub fn new(
        quiz: quizzes::Model,
        questions: Vec<Question>,
        max_score: i32,
        reveal: bool,
    ) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            category: quiz.category,
            difficulty: quiz.difficulty,
            questions: questions
                .into_iter()
                .map(|q| QuestionView::new(q, reveal))
                .collect(),
            max_score,
            creator_id: quiz.creator_id,
            is_public: quiz.is_public,
            tags: serde_json::from_value(quiz.tags).unwrap_or_default(),
            total_attempts: quiz.total_attempts,
            average_score: quiz.average_score,
            created_at: quiz.created_at,
        }
    }
}

/// Outcome of scoring a single question.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_index: usize,
    pub selected_answer: Option<i32>,
    pub correct_answer: i32,
    pub is_correct: bool,
    pub points: i32,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultSchema {
    pub score: i32,
    pub max_score: i32,
    pub percentage: f64,
    pub results: Vec<QuestionResult>,
    pub stats: super::user::UserStatsSchema,
}
