use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domains::{participants, sea_orm_active_enums::TournamentStatus, tournaments};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prize {
    #[validate(range(min = 1))]
    pub position: i32,
    #[validate(length(max = 200))]
    pub description: String,
    #[validate(range(min = 0))]
    pub points: i32,
}

impl Prize {
    pub fn from_value(value: serde_json::Value) -> Vec<Self> {
        serde_json::from_value(value).unwrap_or_default()
    }

    pub fn to_value(prizes: &[Self]) -> serde_json::Value {
        serde_json::to_value(prizes).unwrap_or_default()
    }
}

/// Per-question record stored on a participant after submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_index: usize,
    pub selected_answer: Option<i32>,
    pub time_spent: u32,
    pub is_correct: bool,
}

impl AnswerRecord {
    pub fn from_value(value: serde_json::Value) -> Vec<Self> {
        serde_json::from_value(value).unwrap_or_default()
    }

    pub fn to_value(answers: &[Self]) -> serde_json::Value {
        serde_json::to_value(answers).unwrap_or_default()
    }
}

#[derive(Serialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSchema {
    pub id: String,
    pub title: String,
    pub description: String,
    pub quiz_id: String,
    pub created_by: String,
    pub max_participants: i32,
    pub participant_count: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: TournamentStatus,
    pub is_private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
    pub prizes: Vec<Prize>,
    pub created_at: DateTime<Utc>,
}

impl TournamentSchema {
    /// `status` is the clock-derived status, which may differ from the stored column.
    /// The invite code is only exposed to the creator.
    pub fn new(
        tournament: tournaments::Model,
        status: TournamentStatus,
        viewer: Option<&str>,
    ) -> Self {
        let invite_code = match viewer {
            Some(viewer) if viewer == tournament.created_by => tournament.invite_code,
            _ => None,
        };

        Self {
            id: tournament.id,
            title: tournament.title,
            description: tournament.description,
            quiz_id: tournament.quiz_id,
            created_by: tournament.created_by,
            max_participants: tournament.max_participants,
            participant_count: tournament.participant_count,
            start_time: tournament.start_time,
            end_time: tournament.end_time,
            status,
            is_private: tournament.is_private,
            invite_code,
            prizes: Prize::from_value(tournament.prizes),
            created_at: tournament.created_at,
        }
    }
}

#[derive(Serialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSchema {
    pub user_id: String,
    pub score: i32,
    pub completed_at: Option<DateTime<Utc>>,
    pub answers: Vec<AnswerRecord>,
    pub joined_at: DateTime<Utc>,
}

impl From<participants::Model> for ParticipantSchema {
    fn from(participant: participants::Model) -> Self {
        Self {
            user_id: participant.user_id,
            score: participant.score,
            completed_at: participant.completed_at,
            answers: AnswerRecord::from_value(participant.answers),
            joined_at: participant.joined_at,
        }
    }
}

#[derive(Serialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDetailSchema {
    #[serde(flatten)]
    pub tournament: TournamentSchema,
    pub participants: Vec<ParticipantSchema>,
}

#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinResultSchema {
    pub participant_count: i32,
}

#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultSchema {
    pub score: i32,
    pub max_score: i32,
    /// 1-based; 0 if the submitter could not be found on the fresh leaderboard.
    pub rank: u32,
}
